//! Impurity and gain computation
//!
//! A joint probability tree has no single target: every variable is a target at the same
//! time. Split candidates are therefore scored for every (target, split variable) pair, the
//! gains of each target are normalized by that target's best gain, and the normalized gains
//! of all targets are averaged into one score per candidate.
use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{debug, trace};
use ndarray::ArrayView2;
use rayon::prelude::*;

use jpt::{Float, Variable, VariableKind};

/// Gains of all candidates of one split variable for one target, in candidate order
///
/// The candidate key is `None` for a symbolic split (one child per label) and the
/// threshold for a numeric split.
pub type Gains<F = f64> = Vec<(Option<F>, F)>;

/// The best split found for a partition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split<F = f64> {
    /// Index of the split variable
    pub variable: usize,
    /// Threshold of a numeric split, `None` for symbolic splits
    pub threshold: Option<F>,
    /// Mean normalized gain over all targets
    pub score: F,
}

/// Sufficient statistics of a target variable over a set of rows
///
/// Numeric moments are accumulated around `shift`, the mean of the partition being split,
/// so the variance of a subset does not depend on the magnitude of its values.
#[derive(Clone, Debug)]
enum TargetStats<F> {
    Counts {
        counts: Vec<usize>,
        n: usize,
    },
    Moments {
        n: usize,
        shift: F,
        sum: F,
        sum_sq: F,
    },
}

impl<F: Float> TargetStats<F> {
    fn empty(target: &Variable, shift: F) -> Self {
        match target.kind() {
            VariableKind::Symbolic { labels } => TargetStats::Counts {
                counts: vec![0; labels.len()],
                n: 0,
            },
            VariableKind::Numeric { .. } => TargetStats::Moments {
                n: 0,
                shift,
                sum: F::zero(),
                sum_sq: F::zero(),
            },
        }
    }

    fn add(&mut self, value: F) {
        match self {
            TargetStats::Counts { counts, n } => {
                if let Some(c) = value.to_usize().and_then(|i| counts.get_mut(i)) {
                    *c += 1;
                    *n += 1;
                }
            }
            TargetStats::Moments {
                n,
                shift,
                sum,
                sum_sq,
            } => {
                let d = value - *shift;
                *n += 1;
                *sum += d;
                *sum_sq += d * d;
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            TargetStats::Counts { n, .. } | TargetStats::Moments { n, .. } => *n,
        }
    }

    /// Statistics of the rows in `self` but not in `part`, both accumulated around the same shift
    fn without(&self, part: &TargetStats<F>) -> TargetStats<F> {
        match (self, part) {
            (
                TargetStats::Counts { counts, n },
                TargetStats::Counts {
                    counts: part_counts,
                    n: part_n,
                },
            ) => TargetStats::Counts {
                counts: counts
                    .iter()
                    .zip(part_counts)
                    .map(|(a, b)| a.saturating_sub(*b))
                    .collect(),
                n: n.saturating_sub(*part_n),
            },
            (
                TargetStats::Moments {
                    n,
                    shift,
                    sum,
                    sum_sq,
                },
                TargetStats::Moments {
                    n: part_n,
                    sum: part_sum,
                    sum_sq: part_sum_sq,
                    ..
                },
            ) => TargetStats::Moments {
                n: n.saturating_sub(*part_n),
                shift: *shift,
                sum: *sum - *part_sum,
                sum_sq: *sum_sq - *part_sum_sq,
            },
            _ => self.clone(),
        }
    }

    fn impurity(&self) -> F {
        match self {
            TargetStats::Counts { counts, n } => F::cast(relative_entropy(counts, *n)),
            TargetStats::Moments { n, sum, sum_sq, .. } => {
                if *n == 0 {
                    return F::zero();
                }
                let n = F::cast(*n);
                let mean = *sum / n;

                (*sum_sq / n - mean * mean).max(F::zero())
            }
        }
    }
}

/// Entropy of the label frequencies relative to the maximal entropy of the domain
fn relative_entropy(counts: &[usize], n: usize) -> f64 {
    if n == 0 || counts.len() < 2 {
        return 0.;
    }

    let n = n as f64;
    let entropy: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| c as f64 / n)
        .map(|p| -p * p.log2())
        .sum();

    entropy / (counts.len() as f64).log2()
}

/// Gain evaluator over an encoded data matrix
///
/// Generic over the element type of the matrix. Trees are learned on `f64` matrices.
pub struct Impurity<'a, F = f64> {
    data: ArrayView2<'a, F>,
    variables: &'a [Variable],
    min_samples_leaf: usize,
    min_impurity_improvement: f64,
    parallel: bool,
}

impl<'a, F: Float> Impurity<'a, F> {
    /// Creates an evaluator
    ///
    /// ### Parameters
    ///
    /// * `data`: the encoded matrix, one column per variable
    /// * `variables`: the variables of the columns
    /// * `min_samples_leaf`: the minimal size of every partition of a valid split
    /// * `min_impurity_improvement`: threshold for symbolic splits on variables without their own
    ///
    pub fn new(
        data: ArrayView2<'a, F>,
        variables: &'a [Variable],
        min_samples_leaf: usize,
        min_impurity_improvement: f64,
    ) -> Self {
        Impurity {
            data,
            variables,
            min_samples_leaf,
            min_impurity_improvement,
            parallel: false,
        }
    }

    /// Evaluates the (target, split variable) pairs on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Impurity of `target` over `rows`
    ///
    /// The relative entropy of the label frequencies for symbolic targets, the mean squared
    /// error around the mean for numeric targets. Zero for an empty set of rows.
    pub fn impurity(&self, rows: &[usize], target: usize) -> F {
        if rows.is_empty() {
            return F::zero();
        }

        let column = self.data.column(target);
        match self.variables[target].kind() {
            VariableKind::Symbolic { labels } => {
                let mut counts = vec![0usize; labels.len()];
                for &r in rows {
                    if let Some(c) = column[r].to_usize().and_then(|i| counts.get_mut(i)) {
                        *c += 1;
                    }
                }
                F::cast(relative_entropy(&counts, rows.len()))
            }
            VariableKind::Numeric { .. } => {
                let mean = self.mean(rows, target);

                rows.iter()
                    .map(|&r| (column[r] - mean) * (column[r] - mean))
                    .sum::<F>()
                    / F::cast(rows.len())
            }
        }
    }

    /// Mean of the encoded `target` values of a non-empty set of rows
    fn mean(&self, rows: &[usize], target: usize) -> F {
        let column = self.data.column(target);
        rows.iter().map(|&r| column[r]).sum::<F>() / F::cast(rows.len())
    }

    fn stats(&self, rows: impl Iterator<Item = usize>, target: usize, shift: F) -> TargetStats<F> {
        let column = self.data.column(target);
        let mut stats = TargetStats::empty(&self.variables[target], shift);
        for r in rows {
            stats.add(column[r]);
        }
        stats
    }

    /// Gains of splitting `rows` on `split` with respect to `target`
    ///
    /// A symbolic split has a single candidate which partitions the rows by every distinct
    /// value. A numeric split has one candidate per midpoint between consecutive distinct
    /// values, or the value itself if there is only one. Values closer than the precision of
    /// the split variable count as one. Candidates leaving fewer than `min_samples_leaf` rows
    /// in any partition have zero gain.
    pub fn gains(&self, rows: &[usize], split: usize, target: usize) -> Gains<F> {
        if rows.is_empty() {
            return vec![(None, F::zero())];
        }

        let parent = self.impurity(rows, target);
        let n = F::cast(rows.len());
        let shift = if self.variables[target].is_numeric() {
            self.mean(rows, target)
        } else {
            F::zero()
        };
        let split_column = self.data.column(split);
        let target_column = self.data.column(target);

        match self.variables[split].kind() {
            VariableKind::Symbolic { .. } => {
                // partition rows by the distinct values of the split variable
                let mut partitions: BTreeMap<usize, TargetStats<F>> = BTreeMap::new();
                for &r in rows {
                    partitions
                        .entry(split_column[r].to_usize().unwrap_or(usize::MAX))
                        .or_insert_with(|| TargetStats::empty(&self.variables[target], shift))
                        .add(target_column[r]);
                }

                if partitions
                    .values()
                    .any(|p| p.len() < self.min_samples_leaf)
                {
                    return vec![(None, F::zero())];
                }

                let remainder = partitions
                    .values()
                    .map(|p| F::cast(p.len()) / n * p.impurity())
                    .sum::<F>();
                let gain = (parent - remainder).max(F::zero());
                let threshold = F::cast(
                    self.variables[split]
                        .min_impurity_improvement()
                        .unwrap_or(self.min_impurity_improvement),
                );
                let accepted = if gain < threshold { F::zero() } else { gain };

                trace!(
                    "gain of {} for {}: {} => {}",
                    self.variables[split].name(),
                    self.variables[target].name(),
                    gain,
                    accepted
                );

                vec![(None, accepted)]
            }
            VariableKind::Numeric { precision } => {
                let precision = precision.map_or_else(F::zero, |p| F::cast(p));
                let mut sorted = rows.to_vec();
                sorted.sort_by(|&a, &b| {
                    split_column[a]
                        .partial_cmp(&split_column[b])
                        .unwrap_or(Ordering::Greater)
                });

                let total = self.stats(sorted.iter().copied(), target, shift);
                let mut left = TargetStats::empty(&self.variables[target], shift);
                let mut gains = Vec::new();

                // move the rows one by one from the right to the left partition and
                // evaluate a candidate after the last row of every distinct value
                for i in 0..sorted.len() - 1 {
                    let (current, next) = (split_column[sorted[i]], split_column[sorted[i + 1]]);
                    left.add(target_column[sorted[i]]);

                    if next - current <= precision {
                        continue;
                    }

                    let right = total.without(&left);
                    let threshold = (current + next) / F::cast(2);
                    let gain = if left.len() < self.min_samples_leaf
                        || right.len() < self.min_samples_leaf
                    {
                        F::zero()
                    } else {
                        let remainder = (F::cast(left.len()) * left.impurity()
                            + F::cast(right.len()) * right.impurity())
                            / n;
                        (parent - remainder).max(F::zero())
                    };

                    gains.push((Some(threshold), gain));
                }

                if gains.is_empty() {
                    // a single distinct value, nothing can be separated
                    gains.push((Some(split_column[sorted[0]]), F::zero()));
                }

                gains
            }
        }
    }

    /// Finds the split of `rows` with the highest mean normalized gain over all targets
    ///
    /// Ties are resolved in favour of the first split variable, then the first candidate.
    /// Returns `None` only if there are no rows.
    pub fn best_split(&self, rows: &[usize]) -> Option<Split<F>> {
        if rows.is_empty() {
            return None;
        }

        let m = self.variables.len();
        let pairs = (0..m)
            .flat_map(|target| (0..m).map(move |split| (target, split)))
            .collect::<Vec<_>>();

        // gains[target * m + split]
        let mut gains: Vec<Gains<F>> = if self.parallel {
            pairs
                .par_iter()
                .map(|&(target, split)| self.gains(rows, split, target))
                .collect()
        } else {
            pairs
                .iter()
                .map(|&(target, split)| self.gains(rows, split, target))
                .collect()
        };

        // normalize gains for comparability across targets
        for target_gains in gains.chunks_mut(m) {
            let max = target_gains
                .iter()
                .flat_map(|g| g.iter().map(|(_, gain)| *gain))
                .fold(F::zero(), |a, b| a.max(b));

            for (_, gain) in target_gains.iter_mut().flat_map(|g| g.iter_mut()) {
                *gain = if max > F::zero() {
                    *gain / max
                } else {
                    F::zero()
                };
            }
        }

        let mut best: Option<Split<F>> = None;
        for split in 0..m {
            for (k, (threshold, _)) in gains[split].iter().enumerate() {
                let score = (0..m)
                    .map(|target| gains[target * m + split][k].1)
                    .sum::<F>()
                    / F::cast(m);

                best = match best.take() {
                    None => Some(Split {
                        variable: split,
                        threshold: *threshold,
                        score,
                    }),
                    Some(b) if score > b.score => Some(Split {
                        variable: split,
                        threshold: *threshold,
                        score,
                    }),
                    x => x,
                };
            }
        }

        if let Some(split) = &best {
            debug!(
                "best split of {} rows: {} at {:?} with score {}",
                rows.len(),
                self.variables[split.variable].name(),
                split.threshold,
                split.score
            );
        }

        best
    }
}
