//! `jpt-datasets` provides synthetic datasets ready to be used in tests, benchmarks and examples.
//!
//! ## The Big Picture
//!
//! `jpt-datasets` is a crate in the `jpt` workspace. Every generator returns the variables of
//! the dataset together with the sampled [`jpt::TrainingData`], so the data can be fed to a
//! tree learner right away.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * [`alarm`]: the burglary/earthquake alarm Bayesian network, five boolean variables
//! * [`restaurant`]: independent attributes of a restaurant visit, ten symbolic variables
//! * [`generate::blobs`]: gaussian blobs in the plane labelled by their blob
//!
//! ## Using a dataset
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let (variables, data) = jpt_datasets::alarm(100, &mut rng);
//!
//! assert_eq!(variables.len(), 5);
//! ```

pub mod generate;

pub use generate::{alarm, restaurant};
