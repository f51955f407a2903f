//! `+ - * /` for every operand kind.
//!
//! `+`, `-` and `/` build an [`Elementwise`] node, `*` builds a [`Mul`]
//! node. An operator is only available when the descriptor has an impl
//! for the operand value types, so `vector * matrix` or adding tensors of
//! different static shapes does not compile.
//!
//! With a scalar on one side and a tensor on the other, the result has the
//! tensor's element type and the scalar is cast to it first. A float
//! scalar applied to an integer tensor is truncated: `&ints * 0.5` yields
//! zeros and `&ints / 0.5` fails with `TensorError::DivisionByZero`. Cast
//! the tensor (`ints.cast::<f64>()`) to keep the fraction.
//!
//! Integer results that do not fit the element type fail the evaluation
//! with `TensorError::Overflow` instead of wrapping.

use std::ops;
use std::rc::Rc;

use super::{BinaryExpr, IntoNode, UnaryExpr, ValueOf};
use crate::functional::{BinaryFunction, BinaryOperation, Elementwise, Mul, UnaryFunction};
use crate::node::{Node, ScalarNode};
use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::tensor::{ScalarValue, Tensor};

macro_rules! impl_binary_operators {
    (@op [$($gen:tt)*] $lhs:ty, $trait:ident, $method:ident, $func:ty, $ctor:expr) => {
        impl<$($gen)* Rhs> ops::$trait<Rhs> for $lhs
        where
            Rhs: IntoNode,
            $func: BinaryFunction<ValueOf<$lhs>, ValueOf<Rhs>>,
        {
            type Output = BinaryExpr<<$lhs as IntoNode>::Node, Rhs::Node, $func>;

            fn $method(self, rhs: Rhs) -> Self::Output {
                BinaryExpr::new(self, rhs, $ctor)
            }
        }
    };
    ($gen:tt $lhs:ty) => {
        impl_binary_operators!(@op $gen $lhs, Add, add, Elementwise, Elementwise::new(BinaryOperation::Add));
        impl_binary_operators!(@op $gen $lhs, Sub, sub, Elementwise, Elementwise::new(BinaryOperation::Sub));
        impl_binary_operators!(@op $gen $lhs, Div, div, Elementwise, Elementwise::new(BinaryOperation::Div));
        impl_binary_operators!(@op $gen $lhs, Mul, mul, Mul, Mul);
    };
}

impl_binary_operators!([T: Scalar, S: Shape,] Tensor<T, S>);
impl_binary_operators!(['a, T: Scalar, S: Shape,] &'a Tensor<T, S>);
impl_binary_operators!([T: Scalar,] ScalarValue<T>);
impl_binary_operators!(['a, T: Scalar,] &'a ScalarValue<T>);
impl_binary_operators!([I: Node, F: UnaryFunction<I::Value>,] UnaryExpr<I, F>);
impl_binary_operators!(['a, I: Node, F: UnaryFunction<I::Value>,] &'a UnaryExpr<I, F>);
impl_binary_operators!([L: Node, R: Node, F: BinaryFunction<L::Value, R::Value>,] BinaryExpr<L, R, F>);
impl_binary_operators!(['a, L: Node, R: Node, F: BinaryFunction<L::Value, R::Value>,] &'a BinaryExpr<L, R, F>);

// A plain number on the left needs one impl per right-hand type.
macro_rules! impl_primitive_lhs_operators {
    (@op $prim:ty, [$($gen:tt)*] $rhs:ty, $trait:ident, $method:ident, $func:ty, $ctor:expr) => {
        impl<$($gen)*> ops::$trait<$rhs> for $prim
        where
            $func: BinaryFunction<ScalarNode<$prim>, ValueOf<$rhs>>,
        {
            type Output = BinaryExpr<Rc<ScalarNode<$prim>>, <$rhs as IntoNode>::Node, $func>;

            fn $method(self, rhs: $rhs) -> Self::Output {
                BinaryExpr::new(self, rhs, $ctor)
            }
        }
    };
    (@prim $prim:ty, $gen:tt $rhs:ty) => {
        impl_primitive_lhs_operators!(@op $prim, $gen $rhs, Add, add, Elementwise, Elementwise::new(BinaryOperation::Add));
        impl_primitive_lhs_operators!(@op $prim, $gen $rhs, Sub, sub, Elementwise, Elementwise::new(BinaryOperation::Sub));
        impl_primitive_lhs_operators!(@op $prim, $gen $rhs, Div, div, Elementwise, Elementwise::new(BinaryOperation::Div));
        impl_primitive_lhs_operators!(@op $prim, $gen $rhs, Mul, mul, Mul, Mul);
    };
    ($gen:tt $rhs:ty; $($prim:ty),*) => {
        $(
            impl_primitive_lhs_operators!(@prim $prim, $gen $rhs);
        )*
    };
}

impl_primitive_lhs_operators!([T: Scalar, S: Shape,] Tensor<T, S>; f32, f64, i32, i64);
impl_primitive_lhs_operators!(['a, T: Scalar, S: Shape,] &'a Tensor<T, S>; f32, f64, i32, i64);
impl_primitive_lhs_operators!([T: Scalar,] ScalarValue<T>; f32, f64, i32, i64);
impl_primitive_lhs_operators!(['a, T: Scalar,] &'a ScalarValue<T>; f32, f64, i32, i64);
impl_primitive_lhs_operators!([I: Node, F: UnaryFunction<I::Value>,] UnaryExpr<I, F>; f32, f64, i32, i64);
impl_primitive_lhs_operators!(['a, I: Node, F: UnaryFunction<I::Value>,] &'a UnaryExpr<I, F>; f32, f64, i32, i64);
impl_primitive_lhs_operators!(
    [L: Node, R: Node, F: BinaryFunction<L::Value, R::Value>,] BinaryExpr<L, R, F>;
    f32, f64, i32, i64
);
impl_primitive_lhs_operators!(
    ['a, L: Node, R: Node, F: BinaryFunction<L::Value, R::Value>,] &'a BinaryExpr<L, R, F>;
    f32, f64, i32, i64
);

#[cfg(test)]
mod tests {
    use crate::error::TensorError;
    use crate::tensor::{Matrix, ScalarValue, Vector};

    #[test]
    fn test_all_four_operators() {
        let a = Vector::from_vec(vec![6.0_f64, 8.0], 2).unwrap();
        let b = Vector::from_vec(vec![2.0_f64, 4.0], 2).unwrap();
        assert_eq!((&a + &b).eval().unwrap().data(), &[8.0, 12.0]);
        assert_eq!((&a - &b).eval().unwrap().data(), &[4.0, 4.0]);
        assert_eq!((&a * &b).eval().unwrap().data(), &[12.0, 32.0]);
        assert_eq!((&a / &b).eval().unwrap().data(), &[3.0, 2.0]);
    }

    #[test]
    fn test_primitive_on_either_side() {
        let a = Vector::from_vec(vec![1i32, 2, 3], 3).unwrap();
        assert_eq!((10i32 - &a).eval().unwrap().data(), &[9, 8, 7]);
        assert_eq!((&a - 1i32).eval().unwrap().data(), &[0, 1, 2]);
        assert_eq!((2i64 * &a).eval().unwrap().data(), &[2, 4, 6]);
        assert_eq!((6i32 / &a).eval().unwrap().data(), &[6, 3, 2]);
    }

    #[test]
    fn test_scalar_values_compose() {
        let s = ScalarValue::new(2.0f64);
        let m = Matrix::<f64>::ones([2, 2]);
        let e = &s * &m + 1.0f64;
        assert_eq!(e.eval().unwrap().data(), &[3.0; 4]);
        assert_eq!((&s * &s).eval().unwrap().value(), 4.0);
    }

    #[test]
    fn test_expressions_nest() {
        let a = Vector::from_vec(vec![1.0_f64, 2.0], 2).unwrap();
        let sum = &a + &a;
        let e = 1.0f64 / &sum - &sum;
        assert_eq!(e.eval().unwrap().data(), &[-1.5, -3.75]);
        // the shared subexpression was evaluated along the way
        assert!(sum.is_evaluated());
    }

    #[test]
    fn test_float_scalar_is_cast_to_integer_tensor() {
        let a = Vector::from_vec(vec![2i32, 4], 2).unwrap();
        assert_eq!((&a * 0.5f64).eval().unwrap().data(), &[0, 0]);
        assert_eq!((1.5f64 + &a).eval().unwrap().data(), &[3, 5]);
        assert_eq!(
            (&a / 0.5f64).eval().unwrap_err(),
            TensorError::DivisionByZero
        );
        assert_eq!((&a.cast::<f64>() * 0.5f64).eval().unwrap().data(), &[1.0, 2.0]);
    }
}
