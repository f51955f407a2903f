//! User-facing expression handles.
//!
//! Operators and the free functions ([`sqrt`], [`abs`], [`pow`], [`min`],
//! [`max`]) never compute anything: they build a [`UnaryExpr`] or
//! [`BinaryExpr`] around a new evaluation node. `eval()` forces the
//! subgraph, depth first, and every node computes at most once no matter
//! how many expressions share it.
//!
//! # Examples
//!
//! ```
//! use tenseur::{Vector, sqrt};
//!
//! let a = Vector::from_vec(vec![0.0_f64, 2.0, 8.0], 3).unwrap();
//! let e = sqrt(2.0_f64 * &a) + &a;
//! assert!(!e.is_evaluated());
//!
//! let r = e.eval().unwrap();
//! assert_eq!(r.data(), &[0.0, 4.0, 12.0]);
//! ```

mod binary;
mod operators;
mod unary;

use std::rc::Rc;

use crate::functional::{BinaryFunction, UnaryFunction};
use crate::node::{BinaryNode, Node, ScalarNode, TensorNode, UnaryNode};
use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::tensor::{ScalarValue, Tensor};

pub use binary::BinaryExpr;
pub use unary::{UnaryExpr, abs, max, min, pow, sqrt};

/// Anything that can appear as an operand: tensors, scalar values, plain
/// numbers, expressions, and node handles.
pub trait IntoNode {
    type Node: Node;

    fn into_node(self) -> Self::Node;
}

/// Value type of the node an operand turns into.
pub type ValueOf<E> = <<E as IntoNode>::Node as Node>::Value;

impl<T: Scalar, S: Shape> IntoNode for Tensor<T, S> {
    type Node = Rc<TensorNode<T, S>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<T: Scalar, S: Shape> IntoNode for &Tensor<T, S> {
    type Node = Rc<TensorNode<T, S>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<T: Scalar> IntoNode for ScalarValue<T> {
    type Node = Rc<ScalarNode<T>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<T: Scalar> IntoNode for &ScalarValue<T> {
    type Node = Rc<ScalarNode<T>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<I, F> IntoNode for UnaryExpr<I, F>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    type Node = Rc<UnaryNode<I, F>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<I, F> IntoNode for &UnaryExpr<I, F>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    type Node = Rc<UnaryNode<I, F>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<L, R, F> IntoNode for BinaryExpr<L, R, F>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    type Node = Rc<BinaryNode<L, R, F>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<L, R, F> IntoNode for &BinaryExpr<L, R, F>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    type Node = Rc<BinaryNode<L, R, F>>;

    fn into_node(self) -> Self::Node {
        self.node()
    }
}

impl<T: Scalar, S: Shape> IntoNode for Rc<TensorNode<T, S>> {
    type Node = Self;

    fn into_node(self) -> Self {
        self
    }
}

impl<T: Scalar> IntoNode for Rc<ScalarNode<T>> {
    type Node = Self;

    fn into_node(self) -> Self {
        self
    }
}

impl<I, F> IntoNode for Rc<UnaryNode<I, F>>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    type Node = Self;

    fn into_node(self) -> Self {
        self
    }
}

impl<L, R, F> IntoNode for Rc<BinaryNode<L, R, F>>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    type Node = Self;

    fn into_node(self) -> Self {
        self
    }
}

macro_rules! impl_into_node_primitive {
    ($($t:ty),*) => {
        $(
            impl IntoNode for $t {
                type Node = Rc<ScalarNode<$t>>;

                fn into_node(self) -> Self::Node {
                    Rc::new(ScalarNode::new(self))
                }
            }
        )*
    };
}

impl_into_node_primitive!(f32, f64, i32, i64);
