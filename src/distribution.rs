//! Per-variable probability distributions
//!
//! Every leaf of a joint probability tree holds one fitted distribution per variable. A
//! distribution answers the probability mass of a [`Constraint`] and its expectation.
//! Symbolic variables are modelled by a [`Multinomial`] over the label indices, numeric
//! variables by the empirical distribution [`Numeric`] of the fitted column.
use std::collections::BTreeSet;
use std::fmt;

use ndarray::{ArrayBase, Data, Ix1};

use crate::constraint::Constraint;
use crate::interval::Interval;
use crate::variable::{Variable, VariableKind};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Categorical distribution over the label indices of a symbolic variable
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Multinomial {
    probabilities: Vec<f64>,
}

impl Multinomial {
    /// Relative frequencies of the label indices in `column`
    ///
    /// An empty column yields zero mass on every label.
    pub fn fit(n_values: usize, column: impl IntoIterator<Item = f64>) -> Self {
        let mut counts = vec![0usize; n_values];
        let mut total = 0usize;
        for value in column {
            let idx = value as usize;
            if idx < n_values {
                counts[idx] += 1;
                total += 1;
            }
        }

        let probabilities = counts
            .into_iter()
            .map(|c| if total > 0 { c as f64 / total as f64 } else { 0. })
            .collect();

        Multinomial { probabilities }
    }

    pub fn from_probabilities(probabilities: Vec<f64>) -> Self {
        Multinomial { probabilities }
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Summed mass of the given label indices
    pub fn probability(&self, labels: &BTreeSet<usize>) -> f64 {
        labels
            .iter()
            .filter_map(|&i| self.probabilities.get(i))
            .sum()
    }

    /// The most probable label index, the first one on ties
    pub fn expectation(&self) -> usize {
        self.probabilities
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            })
            .0
    }
}

/// Empirical distribution of a numeric column
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Numeric {
    sorted_values: Vec<f64>,
}

impl Numeric {
    pub fn fit(column: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted_values: Vec<f64> = column.into_iter().collect();
        sorted_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Greater));

        Numeric { sorted_values }
    }

    pub fn nsamples(&self) -> usize {
        self.sorted_values.len()
    }

    /// Fraction of the fitted values lying in `interval`
    pub fn probability(&self, interval: &Interval) -> f64 {
        if self.sorted_values.is_empty() || interval.is_empty() {
            return 0.;
        }

        let inside = self
            .sorted_values
            .iter()
            .filter(|&&x| interval.contains(x))
            .count();

        inside as f64 / self.sorted_values.len() as f64
    }

    /// Cumulative distribution function `P(X <= value)`
    pub fn cdf(&self, value: f64) -> f64 {
        self.probability(&Interval::at_most(value))
    }

    /// Mean of the fitted values
    pub fn expectation(&self) -> f64 {
        if self.sorted_values.is_empty() {
            return f64::NAN;
        }

        self.sorted_values.iter().sum::<f64>() / self.sorted_values.len() as f64
    }
}

/// Expected value of a distribution
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Expectation {
    /// The most probable label index
    Label(usize),
    /// The mean value
    Number(f64),
}

/// A fitted distribution of either kind
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    Multinomial(Multinomial),
    Numeric(Numeric),
}

impl Distribution {
    /// Fits the distribution matching the kind of `variable` to a data column
    pub fn fit<D: Data<Elem = f64>>(variable: &Variable, column: &ArrayBase<D, Ix1>) -> Self {
        match variable.kind() {
            VariableKind::Symbolic { labels } => {
                Distribution::Multinomial(Multinomial::fit(labels.len(), column.iter().copied()))
            }
            VariableKind::Numeric { .. } => {
                Distribution::Numeric(Numeric::fit(column.iter().copied()))
            }
        }
    }

    /// Probability mass of `region`, zero for a region of the wrong kind
    pub fn probability(&self, region: &Constraint) -> f64 {
        match (self, region) {
            (Distribution::Multinomial(d), Constraint::Labels(labels)) => d.probability(labels),
            (Distribution::Numeric(d), Constraint::Interval(interval)) => d.probability(interval),
            _ => 0.,
        }
    }

    pub fn expectation(&self) -> Expectation {
        match self {
            Distribution::Multinomial(d) => Expectation::Label(d.expectation()),
            Distribution::Numeric(d) => Expectation::Number(d.expectation()),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Multinomial(d) => {
                let probs = d
                    .probabilities()
                    .iter()
                    .map(|p| format!("{:.3}", p))
                    .collect::<Vec<_>>();
                write!(f, "Multinomial[{}]", probs.join(", "))
            }
            Distribution::Numeric(d) => {
                write!(f, "Numeric<n={}, mean={:.3}>", d.nsamples(), d.expectation())
            }
        }
    }
}
