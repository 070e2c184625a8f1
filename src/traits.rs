//! Provide traits for different classes of algorithms
//!

use std::error::Error;

/// Fittable algorithms
///
/// A fittable algorithm takes training data and creates a model. The hyperparameters
/// are part of the implementing type, the data is consumed by the fitted model.
pub trait Fit<D, E: Error> {
    type Object;

    fn fit(&self, data: D) -> Result<Self::Object, E>;
}
