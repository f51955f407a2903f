use std::cell::Cell;
use std::rc::Rc;

use super::IntoNode;
use crate::error::TensorError;
use crate::functional::BinaryFunction;
use crate::node::{BinaryNode, Node, ScalarNode, TensorNode, ValueNode};
use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::tensor::{ScalarValue, Tensor};

/// Handle to a pending binary computation.
///
/// Built by the arithmetic operators. Cloning is cheap and shares the
/// node, including its cached output.
#[derive(Debug, Clone)]
pub struct BinaryExpr<L, R, F>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    node: Rc<BinaryNode<L, R, F>>,
    evaluated: Cell<bool>,
}

impl<L, R, F> BinaryExpr<L, R, F>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value>,
{
    /// Combine two operands with `func`. Nothing is computed until
    /// evaluation.
    pub fn new(left: impl IntoNode<Node = L>, right: impl IntoNode<Node = R>, func: F) -> Self {
        Self::from_node(Rc::new(BinaryNode::new(
            left.into_node(),
            right.into_node(),
            func,
        )))
    }

    /// Wrap an existing node.
    pub fn from_node(node: Rc<BinaryNode<L, R, F>>) -> Self {
        let evaluated = Cell::new(node.is_evaluated());
        Self { node, evaluated }
    }

    pub fn node(&self) -> Rc<BinaryNode<L, R, F>> {
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

impl<L, R, F, T, S> TryFrom<BinaryExpr<L, R, F>> for Tensor<T, S>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value, Output = TensorNode<T, S>>,
    T: Scalar,
    S: Shape,
{
    type Error = TensorError;

    fn try_from(expr: BinaryExpr<L, R, F>) -> Result<Self, TensorError> {
        expr.eval()
    }
}

impl<L, R, F, T> TryFrom<BinaryExpr<L, R, F>> for ScalarValue<T>
where
    L: Node,
    R: Node,
    F: BinaryFunction<L::Value, R::Value, Output = ScalarNode<T>>,
    T: Scalar,
{
    type Error = TensorError;

    fn try_from(expr: BinaryExpr<L, R, F>) -> Result<Self, TensorError> {
        expr.eval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{Matrix, Vector};

    #[test]
    fn test_lazy_until_eval() {
        let a = Vector::from_vec(vec![1.0_f64, 2.0], 2).unwrap();
        let e = &a + &a;
        assert!(!e.is_evaluated());
        assert!(e.node().output().is_none());
        assert_eq!(e.eval().unwrap().data(), &[2.0, 4.0]);
        assert!(e.node().output().is_some());
    }

    #[test]
    fn test_runtime_mismatch_is_not_cached() {
        let a = Matrix::<f64>::ones([2, 3]);
        let b = Matrix::<f64>::ones([2, 3]);
        let e = &a * &b;
        assert!(matches!(
            e.eval(),
            Err(TensorError::DimensionMismatch { .. })
        ));
        assert!(!e.is_evaluated());
    }

    #[test]
    fn test_try_from_binary() {
        let a = Vector::from_vec(vec![1i32, 2], 2).unwrap();
        let t: Vector<i32> = (&a * 3i32).try_into().unwrap();
        assert_eq!(t.data(), &[3, 6]);
        let s: ScalarValue<f64> = (ScalarValue::new(1.5f64) + 2i32).try_into().unwrap();
        assert_eq!(s.value(), 3.5);
    }
}
