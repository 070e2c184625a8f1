mod algorithm;
mod hyperparams;
mod impurity;
mod inference;
mod iter;
mod node;

pub use algorithm::*;
pub use hyperparams::*;
pub use impurity::{Gains, Impurity, Split};
pub use inference::*;
pub use iter::*;
pub use node::*;
