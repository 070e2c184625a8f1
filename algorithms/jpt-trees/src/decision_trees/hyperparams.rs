use jpt::{
    error::{Error, Result},
    ParamGuard, Variable,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::Jpt;

/// The set of hyperparameters that can be specified for fitting a
/// [joint probability tree](struct.Jpt.html).
///
/// ### Example
///
/// ```rust
/// use jpt::prelude::*;
/// use jpt_trees::Jpt;
///
/// let x = Variable::numeric("x");
///
/// // Initialize the default set of parameters
/// let params = Jpt::params(vec![x.clone()]);
/// // Set the parameters to the desired values
/// let params = params.min_samples_leaf(2).min_impurity_improvement(0.);
///
/// let rows = vec![1., 2., 3., 8., 9.]
///     .into_iter()
///     .map(|v| vec![Value::from(v)])
///     .collect();
/// let tree = params.fit(TrainingData::Rows(rows)).unwrap();
///
/// assert_eq!(tree.num_leaves(), 2);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct JptValidParams {
    variables: Vec<Variable>,
    name: String,
    min_samples_leaf: usize,
    min_impurity_improvement: f64,
    parallel: bool,
}

impl JptValidParams {
    /// The variables of the tree, their order fixes the column order of the data
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    pub fn min_impurity_improvement(&self) -> f64 {
        self.min_impurity_improvement
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct JptParams(JptValidParams);

impl JptParams {
    pub fn new(variables: impl IntoIterator<Item = Variable>) -> Self {
        Self(JptValidParams {
            variables: variables.into_iter().collect(),
            name: "regtree".to_string(),
            min_samples_leaf: 1,
            min_impurity_improvement: 0.,
            parallel: false,
        })
    }

    /// Sets the name of the tree
    pub fn name(mut self, name: &str) -> Self {
        self.0.name = name.to_string();
        self
    }

    /// Sets the minimum number of samples a partition needs to be considered for another
    /// split, and the minimum number of samples a split has to place in every child.
    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.0.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Sets the minimum combined gain a split needs to bring in order for it to be applied
    ///
    /// This is also the fallback threshold for variables without their own
    /// minimum impurity improvement.
    pub fn min_impurity_improvement(mut self, min_impurity_improvement: f64) -> Self {
        self.0.min_impurity_improvement = min_impurity_improvement;
        self
    }

    /// Evaluates the split candidates on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.0.parallel = parallel;
        self
    }
}

impl Jpt {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `name = "regtree"`
    /// * `min_samples_leaf = 1`
    /// * `min_impurity_improvement = 0.0`
    /// * `parallel = false`
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params(variables: impl IntoIterator<Item = Variable>) -> JptParams {
        JptParams::new(variables)
    }
}

impl ParamGuard for JptParams {
    type Checked = JptValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.variables.is_empty() {
            Err(Error::Parameters("a tree needs at least one variable".into()))
        } else if self.0.min_samples_leaf == 0 {
            Err(Error::Parameters(
                "Minimum samples per leaf should be at least one, but was 0".into(),
            ))
        } else if !self.0.min_impurity_improvement.is_finite()
            || self.0.min_impurity_improvement < 0.
        {
            Err(Error::Parameters(format!(
                "Minimum impurity improvement should be non-negative, but was {}",
                self.0.min_impurity_improvement
            )))
        } else if let Some(var) = self.0.variables.iter().find(|v| {
            v.min_impurity_improvement()
                .map(|m| !m.is_finite() || m < 0.)
                .unwrap_or(false)
        }) {
            Err(Error::Parameters(format!(
                "Minimum impurity improvement of {} should be non-negative",
                var.name()
            )))
        } else if let Some(var) = self
            .0
            .variables
            .iter()
            .find(|v| v.is_symbolic() && v.n_values() == 0)
        {
            Err(Error::Parameters(format!(
                "symbolic variable {} has an empty domain",
                var.name()
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = Jpt::params(vec![Variable::numeric("x")]).check().unwrap();

        assert_eq!(params.name(), "regtree");
        assert_eq!(params.min_samples_leaf(), 1);
        assert_eq!(params.min_impurity_improvement(), 0.);
        assert!(!params.parallel());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let x = Variable::numeric("x");

        assert!(Jpt::params(vec![]).check().is_err());
        assert!(Jpt::params(vec![x.clone()])
            .min_samples_leaf(0)
            .check()
            .is_err());
        assert!(Jpt::params(vec![x.clone()])
            .min_impurity_improvement(-0.1)
            .check()
            .is_err());
        assert!(Jpt::params(vec![x.with_min_impurity_improvement(f64::NAN)])
            .check()
            .is_err());
        assert!(Jpt::params(vec![Variable::symbolic("s", Vec::<&str>::new())])
            .check()
            .is_err());
    }

    #[test]
    #[should_panic]
    fn panic_on_unwrap_of_invalid_parameters() {
        Jpt::params(vec![Variable::numeric("x")])
            .min_samples_leaf(0)
            .check_unwrap();
    }
}
