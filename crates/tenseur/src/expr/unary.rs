use std::cell::Cell;
use std::rc::Rc;

use super::{IntoNode, ValueOf};
use crate::error::TensorError;
use crate::functional::{Abs, Max, Min, Pow, Sqrt, UnaryFunction};
use crate::node::{Node, ScalarNode, TensorNode, UnaryNode, ValueNode};
use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::tensor::{ScalarValue, Tensor};

/// Handle to a pending unary computation.
///
/// Cloning is cheap and shares the node, including its cached output.
#[derive(Debug, Clone)]
pub struct UnaryExpr<I, F>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    node: Rc<UnaryNode<I, F>>,
    evaluated: Cell<bool>,
}

impl<I, F> UnaryExpr<I, F>
where
    I: Node,
    F: UnaryFunction<I::Value>,
{
    /// Apply `func` to `input`. Nothing is computed until evaluation.
    pub fn new(input: impl IntoNode<Node = I>, func: F) -> Self {
        Self::from_node(Rc::new(UnaryNode::new(input.into_node(), func)))
    }

    /// Wrap an existing node.
    pub fn from_node(node: Rc<UnaryNode<I, F>>) -> Self {
        let evaluated = Cell::new(node.is_evaluated());
        Self { node, evaluated }
    }

    pub fn node(&self) -> Rc<UnaryNode<I, F>> {
        Rc::clone(&self.node)
    }

    /// Evaluate the subgraph and return the materialized value.
    pub fn eval(&self) -> Result<<F::Output as ValueNode>::Handle, TensorError> {
        let output = self.node.evaluate()?;
        self.evaluated.set(true);
        Ok(F::Output::into_handle(output))
    }

    /// The value, returned from the cache when already evaluated.
    pub fn value(&self) -> Result<<F::Output as ValueNode>::Handle, TensorError> {
        if self.evaluated.get() {
            if let Some(output) = self.node.output() {
                return Ok(F::Output::into_handle(output));
            }
        }
        self.eval()
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated.get() || self.node.is_evaluated()
    }
}

impl<I, F, T, S> TryFrom<UnaryExpr<I, F>> for Tensor<T, S>
where
    I: Node,
    F: UnaryFunction<I::Value, Output = TensorNode<T, S>>,
    T: Scalar,
    S: Shape,
{
    type Error = TensorError;

    fn try_from(expr: UnaryExpr<I, F>) -> Result<Self, TensorError> {
        expr.eval()
    }
}

impl<I, F, T> TryFrom<UnaryExpr<I, F>> for ScalarValue<T>
where
    I: Node,
    F: UnaryFunction<I::Value, Output = ScalarNode<T>>,
    T: Scalar,
{
    type Error = TensorError;

    fn try_from(expr: UnaryExpr<I, F>) -> Result<Self, TensorError> {
        expr.eval()
    }
}

/// Elementwise square root.
pub fn sqrt<E>(expr: E) -> UnaryExpr<E::Node, Sqrt>
where
    E: IntoNode,
    Sqrt: UnaryFunction<ValueOf<E>>,
{
    UnaryExpr::new(expr, Sqrt)
}

/// Elementwise absolute value.
pub fn abs<E>(expr: E) -> UnaryExpr<E::Node, Abs>
where
    E: IntoNode,
    Abs: UnaryFunction<ValueOf<E>>,
{
    UnaryExpr::new(expr, Abs)
}

/// Elementwise power `x^n`.
pub fn pow<E>(expr: E, n: f64) -> UnaryExpr<E::Node, Pow>
where
    E: IntoNode,
    Pow: UnaryFunction<ValueOf<E>>,
{
    UnaryExpr::new(expr, Pow::new(n))
}

/// Smallest element, as a scalar.
///
/// Evaluating the minimum of an empty tensor fails with
/// `TensorError::EmptyReduction`.
///
/// # Examples
///
/// ```
/// use tenseur::{Vector, min};
///
/// let v = Vector::from_vec(vec![3.0_f64, -1.5, 2.0], 3).unwrap();
/// assert_eq!(min(&v).eval().unwrap().value(), -1.5);
/// ```
pub fn min<E>(expr: E) -> UnaryExpr<E::Node, Min>
where
    E: IntoNode,
    Min: UnaryFunction<ValueOf<E>>,
{
    UnaryExpr::new(expr, Min)
}

/// Largest element, as a scalar.
pub fn max<E>(expr: E) -> UnaryExpr<E::Node, Max>
where
    E: IntoNode,
    Max: UnaryFunction<ValueOf<E>>,
{
    UnaryExpr::new(expr, Max)
}
