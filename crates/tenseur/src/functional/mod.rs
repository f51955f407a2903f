//! Function descriptors.
//!
//! A descriptor knows two things: the layout of its output given its
//! inputs, and how to fill an allocated output. Which descriptor applies
//! to which operand kinds is decided by the trait impls, so an unsupported
//! combination (say, a vector times a matrix) has no impl and fails to
//! compile.
//!
//! ```text
//! Unary:  Sqrt, Abs, Pow(n)   tensor -> tensor, scalar -> scalar
//!         Min, Max            tensor -> scalar
//! Binary: Elementwise(op)     op in {Add, Sub, Div}
//!         Mul                 elementwise, matrix*matrix, matrix*vector, broadcast
//! ```

mod binary;
pub mod resolve;
mod unary;

use std::fmt::Debug;

use crate::error::TensorError;
use crate::node::ValueNode;

pub use binary::{BinaryOperation, Elementwise, Mul};
pub use resolve::{MulKernel, MulShape};
pub use unary::{Abs, Max, Min, Pow, Sqrt};

/// Common metadata of every descriptor.
pub trait Function: Clone + Debug {
    /// Name used in log events.
    const NAME: &'static str;

    /// Whether instances carry a constructor-supplied parameter.
    const PARAMETRIC: bool = false;

    /// Name of this instance; defaults to [`Function::NAME`].
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// A descriptor applicable to one input of value type `I`.
pub trait UnaryFunction<I: ValueNode>: Function {
    type Output: ValueNode;

    fn output_layout(&self, input: &I) -> Result<<Self::Output as ValueNode>::Layout, TensorError>;

    fn call(&self, input: &I, output: &mut Self::Output) -> Result<(), TensorError>;
}

/// A descriptor applicable to inputs of value types `L` and `R`.
pub trait BinaryFunction<L: ValueNode, R: ValueNode>: Function {
    type Output: ValueNode;

    fn output_layout(
        &self,
        left: &L,
        right: &R,
    ) -> Result<<Self::Output as ValueNode>::Layout, TensorError>;

    fn call(&self, left: &L, right: &R, output: &mut Self::Output) -> Result<(), TensorError>;
}
