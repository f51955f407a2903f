//! Unary descriptors: elementwise maps and reductions.

use std::cmp::Ordering;

use super::{Function, UnaryFunction};
use crate::error::TensorError;
use crate::kernels::elementwise;
use crate::node::{ScalarNode, TensorNode};
use crate::scalar::Scalar;
use crate::shape::Shape;

/// Elementwise square root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqrt;

/// Elementwise absolute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Abs;

/// Elementwise power with a fixed exponent.
///
/// # Examples
///
/// ```
/// use tenseur::{Function, Pow};
///
/// assert!(Pow::PARAMETRIC);
/// assert_eq!(Pow::new(2.0).exponent(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pow {
    n: f64,
}

impl Pow {
    pub fn new(n: f64) -> Self {
        Self { n }
    }

    pub fn exponent(&self) -> f64 {
        self.n
    }
}

/// Smallest element of a tensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

/// Largest element of a tensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

impl Function for Sqrt {
    const NAME: &'static str = "sqrt";
}

impl Function for Abs {
    const NAME: &'static str = "abs";
}

impl Function for Pow {
    const NAME: &'static str = "pow";
    const PARAMETRIC: bool = true;
}

impl Function for Min {
    const NAME: &'static str = "min";
}

impl Function for Max {
    const NAME: &'static str = "max";
}

trait ElementMap {
    fn apply<T: Scalar>(&self, x: T) -> Result<T, TensorError>;
}

impl ElementMap for Sqrt {
    #[inline]
    fn apply<T: Scalar>(&self, x: T) -> Result<T, TensorError> {
        Ok(x.sqrt())
    }
}

impl ElementMap for Abs {
    #[inline]
    fn apply<T: Scalar>(&self, x: T) -> Result<T, TensorError> {
        x.checked_abs().ok_or(TensorError::Overflow { op: Self::NAME })
    }
}

impl ElementMap for Pow {
    #[inline]
    fn apply<T: Scalar>(&self, x: T) -> Result<T, TensorError> {
        // integer results saturate at the type bounds
        Ok(x.powf(self.n))
    }
}

macro_rules! impl_element_map {
    ($($func:ty),*) => {
        $(
            impl<T: Scalar, S: Shape> UnaryFunction<TensorNode<T, S>> for $func {
                type Output = TensorNode<T, S>;

                fn output_layout(&self, input: &TensorNode<T, S>) -> Result<S, TensorError> {
                    Ok(input.shape().clone())
                }

                fn call(
                    &self,
                    input: &TensorNode<T, S>,
                    output: &mut TensorNode<T, S>,
                ) -> Result<(), TensorError> {
                    elementwise::map(input, output, |x| self.apply(x))
                }
            }

            impl<T: Scalar> UnaryFunction<ScalarNode<T>> for $func {
                type Output = ScalarNode<T>;

                fn output_layout(&self, _: &ScalarNode<T>) -> Result<(), TensorError> {
                    Ok(())
                }

                fn call(&self, input: &ScalarNode<T>, output: &mut ScalarNode<T>) -> Result<(), TensorError> {
                    output.set(self.apply(input.value())?);
                    Ok(())
                }
            }
        )*
    };
}

impl_element_map!(Sqrt, Abs, Pow);

/// Fold from the first element, keeping `x` whenever it compares as `keep`
/// against the accumulator.
fn reduce<T: Scalar>(data: &[T], keep: Ordering, op: &'static str) -> Result<T, TensorError> {
    let (&first, rest) = data
        .split_first()
        .ok_or(TensorError::EmptyReduction { op })?;
    Ok(rest
        .iter()
        .fold(first, |acc, &x| if x.total_cmp(&acc) == keep { x } else { acc }))
}

macro_rules! impl_reduction {
    ($($func:ty => $keep:expr),*) => {
        $(
            impl<T: Scalar, S: Shape> UnaryFunction<TensorNode<T, S>> for $func {
                type Output = ScalarNode<T>;

                fn output_layout(&self, _: &TensorNode<T, S>) -> Result<(), TensorError> {
                    Ok(())
                }

                fn call(&self, input: &TensorNode<T, S>, output: &mut ScalarNode<T>) -> Result<(), TensorError> {
                    // order does not matter under a total order, so read storage directly
                    output.set(reduce(input.data(), $keep, Self::NAME)?);
                    Ok(())
                }
            }
        )*
    };
}

impl_reduction!(Min => Ordering::Less, Max => Ordering::Greater);
