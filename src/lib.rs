//! `jpt` provides the building blocks of Joint Probability Trees (JPTs).
//!
//! A JPT generalizes regression-tree induction: the data is recursively partitioned by
//! reducing the impurity of *all* variables at once, and every leaf holds a full joint
//! distribution over all variables, stored as one fitted distribution per variable. The
//! learned tree answers conditional and marginal probability queries.
//!
//! This crate contains what the learning algorithms in `jpt-trees` share:
//!
//! * [`Variable`]s declaring symbolic and numeric columns,
//! * [`Interval`]s and [`Constraint`]s restricting the values of a variable,
//! * fitted per-variable [`Distribution`]s,
//! * conversion of [`TrainingData`] into an encoded matrix,
//! * the [`ParamGuard`] and [`traits::Fit`] traits and the common [`error::Error`] type.
//!

pub mod benchmarks;
pub mod constraint;
pub mod dataset;
pub mod distribution;
pub mod error;
pub mod float;
pub mod interval;
mod param_guard;
pub mod prelude;
pub mod traits;
pub mod variable;

pub use constraint::Constraint;
pub use dataset::TrainingData;
pub use distribution::{Distribution, Expectation, Multinomial, Numeric};
pub use float::Float;
pub use interval::Interval;
pub use param_guard::ParamGuard;
pub use variable::{Value, Variable, VariableKind};
