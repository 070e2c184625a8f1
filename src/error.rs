//! Error types in jpt
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid input {0}")]
    InvalidInput(String),
    #[error("variables not represented by this tree: {}", .0.join(", "))]
    UnknownVariables(Vec<String>),
    #[error("the evidence has zero prior probability")]
    NoSupportingEvidence,
    #[error("induction produced neither inner nodes nor leaves")]
    EmptyTree,
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}
