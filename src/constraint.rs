//! Constraints on a single variable
//!
//! A constraint restricts the values of one variable: a set of label indices for symbolic
//! variables, an [`Interval`] for numeric ones. Split edges, leaf paths and resolved
//! query assignments are all made of constraints.
use std::collections::BTreeSet;

use crate::interval::Interval;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// Admissible label indices of a symbolic variable
    Labels(BTreeSet<usize>),
    /// Admissible range of a numeric variable
    Interval(Interval),
}

impl Constraint {
    /// A constraint admitting a single label index
    pub fn label(index: usize) -> Self {
        Constraint::Labels(std::iter::once(index).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Constraint::Labels(labels) => labels.is_empty(),
            Constraint::Interval(interval) => interval.is_empty(),
        }
    }

    /// Values admitted by both constraints
    ///
    /// Constraints of different kinds never share a value, their intersection is
    /// the empty label set.
    pub fn intersection(&self, other: &Constraint) -> Constraint {
        match (self, other) {
            (Constraint::Labels(a), Constraint::Labels(b)) => {
                Constraint::Labels(a.intersection(b).copied().collect())
            }
            (Constraint::Interval(a), Constraint::Interval(b)) => {
                Constraint::Interval(a.intersection(b))
            }
            _ => Constraint::Labels(BTreeSet::new()),
        }
    }

    /// Returns true if at least one value satisfies both constraints
    pub fn intersects(&self, other: &Constraint) -> bool {
        match (self, other) {
            (Constraint::Labels(a), Constraint::Labels(b)) => !a.is_disjoint(b),
            (Constraint::Interval(a), Constraint::Interval(b)) => a.intersects(b),
            _ => false,
        }
    }

    pub fn as_labels(&self) -> Option<&BTreeSet<usize>> {
        match self {
            Constraint::Labels(labels) => Some(labels),
            Constraint::Interval(_) => None,
        }
    }

    pub fn as_interval(&self) -> Option<&Interval> {
        match self {
            Constraint::Interval(interval) => Some(interval),
            Constraint::Labels(_) => None,
        }
    }
}

impl From<Interval> for Constraint {
    fn from(interval: Interval) -> Self {
        Constraint::Interval(interval)
    }
}
