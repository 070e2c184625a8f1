//! Variables
//!
//! A [`Variable`] declares one column of the training data. It is either symbolic, with an
//! ordered list of labels, or numeric. Variables are compared by identity: two variables
//! created separately are different even if they share a name and a domain, while clones
//! of the same variable are equal.
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::constraint::Constraint;
use crate::error::{Error, Result};
use crate::interval::Interval;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// The kind and domain of a variable
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub enum VariableKind {
    /// Categorical variable, values are stored as index into `labels`
    Symbolic { labels: Vec<String> },
    /// Real valued variable
    ///
    /// Sorted values whose difference is at most `precision` are not separated by numeric
    /// splits.
    Numeric { precision: Option<f64> },
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, PartialEq)]
struct VariableDecl {
    name: String,
    kind: VariableKind,
    min_impurity_improvement: Option<f64>,
}

/// A symbolic or numeric variable of a joint probability tree
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone)]
pub struct Variable(Arc<VariableDecl>);

/// A value of a variable as handed in by the user, in training data or in queries
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A single label of a symbolic variable
    Label(String),
    /// A truth value of a boolean variable
    Bool(bool),
    /// A set of labels of a symbolic variable
    Labels(Vec<String>),
    /// A single numeric value
    Number(f64),
    /// A range of numeric values
    Interval(Interval),
}

impl Variable {
    fn with_kind(name: &str, kind: VariableKind) -> Self {
        Variable(Arc::new(VariableDecl {
            name: name.to_string(),
            kind,
            min_impurity_improvement: None,
        }))
    }

    /// Creates a symbolic variable over the given labels
    pub fn symbolic<S: ToString>(name: &str, labels: impl IntoIterator<Item = S>) -> Self {
        let labels = labels.into_iter().map(|l| l.to_string()).collect();
        Self::with_kind(name, VariableKind::Symbolic { labels })
    }

    /// Creates a symbolic variable with the domain `["False", "True"]`
    pub fn boolean(name: &str) -> Self {
        Self::symbolic(name, vec!["False", "True"])
    }

    /// Creates a numeric variable
    pub fn numeric(name: &str) -> Self {
        Self::with_kind(name, VariableKind::Numeric { precision: None })
    }

    /// Creates a numeric variable with a minimal distinguishable precision
    ///
    /// Split candidates are only placed between consecutive training values more than
    /// `precision` apart, so no split threshold falls between such close values.
    pub fn numeric_with_precision(name: &str, precision: f64) -> Self {
        Self::with_kind(
            name,
            VariableKind::Numeric {
                precision: Some(precision),
            },
        )
    }

    /// Overrides the tree-wide minimal impurity improvement for splits on this variable
    ///
    /// This creates a new variable, previously made clones do not see the override.
    pub fn with_min_impurity_improvement(self, min_impurity_improvement: f64) -> Self {
        Variable(Arc::new(VariableDecl {
            name: self.0.name.clone(),
            kind: self.0.kind.clone(),
            min_impurity_improvement: Some(min_impurity_improvement),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> &VariableKind {
        &self.0.kind
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self.0.kind, VariableKind::Symbolic { .. })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.0.kind, VariableKind::Numeric { .. })
    }

    /// Ordered labels of a symbolic variable, `None` for numeric variables
    pub fn labels(&self) -> Option<&[String]> {
        match &self.0.kind {
            VariableKind::Symbolic { labels } => Some(labels),
            VariableKind::Numeric { .. } => None,
        }
    }

    /// Number of labels of a symbolic variable, zero for numeric variables
    pub fn n_values(&self) -> usize {
        self.labels().map(|l| l.len()).unwrap_or(0)
    }

    pub fn precision(&self) -> Option<f64> {
        match self.0.kind {
            VariableKind::Numeric { precision } => precision,
            VariableKind::Symbolic { .. } => None,
        }
    }

    pub fn min_impurity_improvement(&self) -> Option<f64> {
        self.0.min_impurity_improvement
    }

    /// Index of `label` in the domain of a symbolic variable
    pub fn label_index(&self, label: &str) -> Result<usize> {
        let labels = self.labels().ok_or_else(|| {
            Error::InvalidInput(format!("variable {} has no labels", self.name()))
        })?;

        labels.iter().position(|l| l == label).ok_or_else(|| {
            Error::InvalidInput(format!(
                "label {} is not in the domain of {}",
                label,
                self.name()
            ))
        })
    }

    /// The constraint admitting every value of the domain
    pub fn domain(&self) -> Constraint {
        match &self.0.kind {
            VariableKind::Symbolic { labels } => Constraint::Labels((0..labels.len()).collect()),
            VariableKind::Numeric { .. } => Constraint::Interval(Interval::all()),
        }
    }

    /// Encodes a single cell of training data
    ///
    /// Symbolic values are stored as their index into the label list, numeric values
    /// as they are.
    pub fn encode(&self, value: &Value) -> Result<f64> {
        match (&self.0.kind, value) {
            (VariableKind::Symbolic { .. }, Value::Label(label)) => {
                self.label_index(label).map(|i| i as f64)
            }
            (VariableKind::Symbolic { .. }, Value::Bool(b)) => {
                self.label_index(bool_label(*b)).map(|i| i as f64)
            }
            (VariableKind::Numeric { .. }, Value::Number(x)) if x.is_finite() => Ok(*x),
            _ => Err(Error::InvalidInput(format!(
                "{:?} is not a single value of {}",
                value,
                self.name()
            ))),
        }
    }

    /// Converts a value into the internal constraint representation
    ///
    /// Labels are resolved to their indices, single numbers become degenerate closed
    /// intervals.
    pub fn resolve(&self, value: &Value) -> Result<Constraint> {
        match (&self.0.kind, value) {
            (VariableKind::Symbolic { .. }, Value::Label(label)) => {
                Ok(Constraint::label(self.label_index(label)?))
            }
            (VariableKind::Symbolic { .. }, Value::Bool(b)) => {
                Ok(Constraint::label(self.label_index(bool_label(*b))?))
            }
            (VariableKind::Symbolic { .. }, Value::Labels(labels)) => labels
                .iter()
                .map(|l| self.label_index(l))
                .collect::<Result<BTreeSet<_>>>()
                .map(Constraint::Labels),
            (VariableKind::Numeric { .. }, Value::Number(x)) => {
                Ok(Constraint::Interval(Interval::point(*x)))
            }
            (VariableKind::Numeric { .. }, Value::Interval(interval)) => {
                Ok(Constraint::Interval(*interval))
            }
            _ => Err(Error::InvalidInput(format!(
                "{:?} is not a valid value of {}",
                value,
                self.name()
            ))),
        }
    }

    /// Renders a constraint on this variable in logical notation, e.g. `X ∈ (5, ∞)`
    pub fn format_constraint(&self, constraint: &Constraint) -> String {
        match (self.labels(), constraint) {
            (Some(labels), Constraint::Labels(set)) => {
                let names = set
                    .iter()
                    .map(|&i| labels.get(i).map(String::as_str).unwrap_or("?"))
                    .collect::<Vec<_>>();
                if names.len() == 1 {
                    format!("{} = {}", self.name(), names[0])
                } else {
                    format!("{} ∈ {{{}}}", self.name(), names.join(", "))
                }
            }
            (None, Constraint::Interval(iv)) if !iv.is_empty() && iv.lower() == iv.upper() => {
                format!("{} = {}", self.name(), iv.lower())
            }
            (None, Constraint::Interval(iv)) => format!("{} ∈ {}", self.name(), iv),
            _ => format!("{} ∈ ∅", self.name()),
        }
    }
}

fn bool_label(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            VariableKind::Symbolic { labels } => {
                write!(f, "SymbolicVariable<{}: {:?}>", self.name(), labels)
            }
            VariableKind::Numeric { .. } => write!(f, "NumericVariable<{}>", self.name()),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for Value {
    fn from(label: &str) -> Self {
        Value::Label(label.to_string())
    }
}

impl From<String> for Value {
    fn from(label: String) -> Self {
        Value::Label(label)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<Interval> for Value {
    fn from(interval: Interval) -> Self {
        Value::Interval(interval)
    }
}

/// A pair of numbers denotes the closed interval between them
impl From<[f64; 2]> for Value {
    fn from(bounds: [f64; 2]) -> Self {
        Value::Interval(Interval::from(bounds))
    }
}

impl From<Vec<&str>> for Value {
    fn from(labels: Vec<&str>) -> Self {
        Value::Labels(labels.into_iter().map(String::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn identity_equality() {
        let a = Variable::numeric("X");
        let b = Variable::numeric("X");

        assert_eq!(a, a.clone());
        assert_ne!(a, b);

        let mut map = HashMap::new();
        map.insert(a.clone(), 1);
        map.insert(b.clone(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&a], 1);
    }

    #[test]
    fn encode_cells() {
        let color = Variable::symbolic("color", vec!["red", "green", "blue"]);
        let flag = Variable::boolean("flag");
        let x = Variable::numeric("x");

        assert_eq!(color.encode(&"blue".into()).unwrap(), 2.);
        assert_eq!(flag.encode(&true.into()).unwrap(), 1.);
        assert_eq!(x.encode(&3.5.into()).unwrap(), 3.5);

        assert!(color.encode(&"purple".into()).is_err());
        assert!(color.encode(&1.0.into()).is_err());
        assert!(x.encode(&"red".into()).is_err());
        assert!(x.encode(&f64::NAN.into()).is_err());
    }

    #[test]
    fn resolve_query_values() {
        let color = Variable::symbolic("color", vec!["red", "green", "blue"]);
        let x = Variable::numeric("x");

        assert_eq!(
            color.resolve(&vec!["red", "blue"].into()).unwrap(),
            Constraint::Labels(vec![0, 2].into_iter().collect())
        );
        assert_eq!(
            x.resolve(&[0., 10.].into()).unwrap(),
            Constraint::Interval(Interval::closed(0., 10.))
        );
        assert_eq!(
            x.resolve(&4.0.into()).unwrap(),
            Constraint::Interval(Interval::point(4.))
        );
        assert!(x.resolve(&vec!["red"].into()).is_err());
        assert!(color.resolve(&[0., 1.].into()).is_err());
    }

    #[test]
    fn override_creates_new_identity() {
        let a = Variable::boolean("a");
        let b = a.clone().with_min_impurity_improvement(0.1);

        assert_ne!(a, b);
        assert_eq!(a.min_impurity_improvement(), None);
        assert_eq!(b.min_impurity_improvement(), Some(0.1));
        assert_eq!(b.labels().unwrap(), &["False".to_string(), "True".to_string()]);
    }

    #[test]
    fn format_constraints() {
        let color = Variable::symbolic("color", vec!["red", "green", "blue"]);
        let x = Variable::numeric("x");

        assert_eq!(color.format_constraint(&Constraint::label(1)), "color = green");
        assert_eq!(
            color.format_constraint(&color.domain()),
            "color ∈ {red, green, blue}"
        );
        assert_eq!(
            x.format_constraint(&Interval::greater_than(5.).into()),
            "x ∈ (5, ∞)"
        );
        assert_eq!(x.format_constraint(&Interval::point(2.).into()), "x = 2");
    }
}
