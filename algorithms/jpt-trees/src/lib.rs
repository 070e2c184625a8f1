//!
//! # Joint probability trees
//! `jpt-trees` learns joint probability trees from mixed symbolic and numeric data and answers
//! probabilistic queries with them.
//!
//! # The big picture
//!
//! A joint probability tree partitions the training data with a decision tree which is grown for
//! all variables at once: every split is chosen by its average normalized information gain over
//! all variables as targets. Each leaf stores one independent distribution per variable, so the
//! leaves together form a mixture approximating the joint distribution of the data.
//!
//! # Current state
//!
//! `jpt-trees` provides
//! * [learning](JptValidParams) of a tree from [rows, columns or an encoded matrix](jpt::TrainingData),
//! * conditional [inference](Jpt::infer) `P(query | evidence)` with an explanation of the leaves
//! that contributed,
//! * [reverse inference](Jpt::reverse), which finds the leaves best matching a query,
//! * the [leaves](Jpt::apply) consistent with a partial assignment.
//!

mod decision_trees;

pub use decision_trees::*;

// Re-export the common Result alias for convenience
pub use jpt::error::Result;
