//! The expression graph.
//!
//! Leaves are value nodes ([`TensorNode`], [`ScalarNode`]); inner vertices
//! are [`UnaryNode`] and [`BinaryNode`], each owning its function
//! descriptor, reference-counted handles to its inputs, and a memoized
//! output. Handles are `Rc`, so a graph belongs to one thread; the type
//! system rejects sending it elsewhere.

mod binary;
mod memo;
mod unary;
mod value;

use std::rc::Rc;

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::shape::Shape;

pub use binary::BinaryNode;
pub use unary::UnaryNode;
pub use value::{ScalarNode, TensorNode, ValueNode};

/// A shareable handle to a graph vertex.
///
/// Evaluating a value node hands back the node itself; evaluating an
/// evaluation node forces its inputs first and then runs its descriptor,
/// at most once.
pub trait Node: Clone {
    /// The materialized value this node produces.
    type Value: ValueNode;

    /// Materialize the value, computing it on first use only.
    fn evaluate(&self) -> Result<Rc<Self::Value>, TensorError>;

    /// Whether the value is available without computing anything.
    fn is_evaluated(&self) -> bool;
}

impl<T: Scalar, S: Shape> Node for Rc<TensorNode<T, S>> {
    type Value = TensorNode<T, S>;

    fn evaluate(&self) -> Result<Rc<Self::Value>, TensorError> {
        Ok(Rc::clone(self))
    }

    fn is_evaluated(&self) -> bool {
        true
    }
}

impl<T: Scalar> Node for Rc<ScalarNode<T>> {
    type Value = ScalarNode<T>;

    fn evaluate(&self) -> Result<Rc<Self::Value>, TensorError> {
        Ok(Rc::clone(self))
    }

    fn is_evaluated(&self) -> bool {
        true
    }
}
