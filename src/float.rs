//! Floating point element types
use std::fmt;
use std::iter::Sum;

use num_traits::{FromPrimitive, NumAssignOps, NumCast};

/// Floating point numbers
///
/// This trait bound multiplexes to the assumptions the split search makes about the elements
/// of an encoded matrix and is implemented for 32bit and 64bit floating points.
pub trait Float:
    num_traits::Float
    + FromPrimitive
    + NumAssignOps
    + Sum
    + Default
    + Sync
    + Send
    + fmt::Display
    + fmt::Debug
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

#[cfg(test)]
mod tests {
    use super::Float;

    #[test]
    fn casts_counts_and_precisions() {
        assert_eq!(<f32 as Float>::cast(9usize), 9.);
        assert_eq!(<f64 as Float>::cast(0.25f32), 0.25);
    }
}
