//! Intervals over the real line
//!
//! Numeric variables are constrained by intervals: split constraints of decision nodes,
//! accumulated leaf paths and the numeric parts of queries are all represented by
//! [`Interval`]. Each end is either inclusive or exclusive, infinite ends are always
//! exclusive.
use std::fmt;

use ndarray_rand::rand_distr::StandardNormal;
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A connected subset of the real line
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
    left_closed: bool,
    right_closed: bool,
}

impl Interval {
    /// Creates a new interval, infinite ends are made exclusive
    pub fn new(lower: f64, upper: f64, left_closed: bool, right_closed: bool) -> Self {
        Interval {
            lower,
            upper,
            left_closed: left_closed && lower.is_finite(),
            right_closed: right_closed && upper.is_finite(),
        }
    }

    /// The closed interval `[lower, upper]`
    pub fn closed(lower: f64, upper: f64) -> Self {
        Self::new(lower, upper, true, true)
    }

    /// The open interval `(lower, upper)`
    pub fn open(lower: f64, upper: f64) -> Self {
        Self::new(lower, upper, false, false)
    }

    /// The degenerate interval `[value, value]`
    pub fn point(value: f64) -> Self {
        Self::closed(value, value)
    }

    /// The whole real line
    pub fn all() -> Self {
        Self::open(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// `(-∞, value]`, the left side of a numeric split
    pub fn at_most(value: f64) -> Self {
        Self::new(f64::NEG_INFINITY, value, false, true)
    }

    /// `(value, ∞)`, the right side of a numeric split
    pub fn greater_than(value: f64) -> Self {
        Self::open(value, f64::INFINITY)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn left_closed(&self) -> bool {
        self.left_closed
    }

    pub fn right_closed(&self) -> bool {
        self.right_closed
    }

    /// Returns true if no real number lies in the interval
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
            || (self.lower == self.upper && !(self.left_closed && self.right_closed))
    }

    /// Returns true if both ends are infinite
    pub fn is_unbounded(&self) -> bool {
        self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY
    }

    pub fn contains(&self, value: f64) -> bool {
        let above = value > self.lower || (self.left_closed && value == self.lower);
        let below = value < self.upper || (self.right_closed && value == self.upper);

        above && below
    }

    /// The largest interval contained in both `self` and `other`, possibly empty
    pub fn intersection(&self, other: &Interval) -> Interval {
        let (lower, left_closed) = if self.lower > other.lower {
            (self.lower, self.left_closed)
        } else if self.lower < other.lower {
            (other.lower, other.left_closed)
        } else {
            (self.lower, self.left_closed && other.left_closed)
        };

        let (upper, right_closed) = if self.upper < other.upper {
            (self.upper, self.right_closed)
        } else if self.upper > other.upper {
            (other.upper, other.right_closed)
        } else {
            (self.upper, self.right_closed && other.right_closed)
        };

        Interval::new(lower, upper, left_closed, right_closed)
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Draws a value from the interval
    ///
    /// Bounded intervals are sampled uniformly and the whole real line from a standard normal
    /// distribution. Intervals with exactly one infinite end have no proper distribution here:
    /// the finite end is returned, shifted inwards by one percent of its value if that end
    /// is exclusive. Returns `None` for empty intervals.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        if self.is_unbounded() {
            return Some(rng.sample(StandardNormal));
        }

        if self.lower == f64::NEG_INFINITY {
            return Some(if self.right_closed {
                self.upper
            } else {
                self.upper - 0.01 * self.upper
            });
        }

        if self.upper == f64::INFINITY {
            return Some(if self.left_closed {
                self.lower
            } else {
                self.lower + 0.01 * self.lower
            });
        }

        if self.lower == self.upper {
            return Some(self.lower);
        }

        let value = rng.gen_range(self.lower..=self.upper);
        if self.contains(value) {
            Some(value)
        } else {
            // the range is closed, fall back to the midpoint for an excluded end
            Some((self.lower + self.upper) / 2.)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::all()
    }
}

impl From<[f64; 2]> for Interval {
    fn from(bounds: [f64; 2]) -> Self {
        Interval::closed(bounds[0], bounds[1])
    }
}

fn fmt_bound(value: f64) -> String {
    if value == f64::INFINITY {
        "∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "∅");
        }

        write!(
            f,
            "{}{}, {}{}",
            if self.left_closed { '[' } else { '(' },
            fmt_bound(self.lower),
            fmt_bound(self.upper),
            if self.right_closed { ']' } else { ')' }
        )
    }
}
