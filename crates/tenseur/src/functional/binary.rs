//! Binary descriptors.
//!
//! [`Elementwise`] covers `+ - /` behind one operation tag; [`Mul`] is
//! specialized per operand-kind pair. Both broadcast a scalar operand over
//! a tensor, producing the tensor's element type.

use super::resolve::{MulKernel, MulShape, elementwise_shape};
use super::{BinaryFunction, Function};
use crate::error::TensorError;
use crate::kernels::elementwise;
use crate::kernels::gemm::{self, MatrixView};
use crate::node::{ScalarNode, TensorNode};
use crate::scalar::{CastTo, Promote, Scalar};
use crate::shape::Shape;

/// Operation tag of [`Elementwise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperation {
    Add,
    Sub,
    Div,
}

/// Elementwise `+`, `-` or `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elementwise {
    op: BinaryOperation,
}

impl Elementwise {
    pub fn new(op: BinaryOperation) -> Self {
        Self { op }
    }

    pub fn op(&self) -> BinaryOperation {
        self.op
    }

    #[inline]
    fn apply<T: Scalar>(&self, a: T, b: T) -> Result<T, TensorError> {
        let result = match self.op {
            BinaryOperation::Add => a.checked_add(b),
            BinaryOperation::Sub => a.checked_sub(b),
            BinaryOperation::Div => {
                if T::IS_INTEGER && b == T::zero() {
                    return Err(TensorError::DivisionByZero);
                }
                a.checked_div(b)
            }
        };
        result.ok_or(TensorError::Overflow { op: self.name() })
    }
}

impl Function for Elementwise {
    const NAME: &'static str = "elementwise";
    // carries its operation tag
    const PARAMETRIC: bool = true;

    fn name(&self) -> &'static str {
        match self.op {
            BinaryOperation::Add => "add",
            BinaryOperation::Sub => "sub",
            BinaryOperation::Div => "div",
        }
    }
}

/// Multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mul;

impl Mul {
    #[inline]
    fn apply<T: Scalar>(&self, a: T, b: T) -> Result<T, TensorError> {
        a.checked_mul(b).ok_or(TensorError::Overflow { op: Self::NAME })
    }
}

impl Function for Mul {
    const NAME: &'static str = "mul";
}

macro_rules! impl_broadcast {
    ($($func:ty),*) => {
        $(
            impl<A, B, S> BinaryFunction<ScalarNode<A>, TensorNode<B, S>> for $func
            where
                A: CastTo<B>,
                B: Scalar,
                S: Shape,
            {
                type Output = TensorNode<B, S>;

                fn output_layout(&self, _: &ScalarNode<A>, right: &TensorNode<B, S>) -> Result<S, TensorError> {
                    Ok(right.shape().clone())
                }

                fn call(
                    &self,
                    left: &ScalarNode<A>,
                    right: &TensorNode<B, S>,
                    output: &mut TensorNode<B, S>,
                ) -> Result<(), TensorError> {
                    let alpha: B = left.value().cast();
                    elementwise::map(right, output, |x| self.apply(alpha, x))
                }
            }

            impl<A, B, S> BinaryFunction<TensorNode<A, S>, ScalarNode<B>> for $func
            where
                A: Scalar,
                B: CastTo<A>,
                S: Shape,
            {
                type Output = TensorNode<A, S>;

                fn output_layout(&self, left: &TensorNode<A, S>, _: &ScalarNode<B>) -> Result<S, TensorError> {
                    Ok(left.shape().clone())
                }

                fn call(
                    &self,
                    left: &TensorNode<A, S>,
                    right: &ScalarNode<B>,
                    output: &mut TensorNode<A, S>,
                ) -> Result<(), TensorError> {
                    let beta: A = right.value().cast();
                    elementwise::map(left, output, |x| self.apply(x, beta))
                }
            }

            impl<A, B> BinaryFunction<ScalarNode<A>, ScalarNode<B>> for $func
            where
                A: Promote<B>,
                B: Scalar,
            {
                type Output = ScalarNode<A::Common>;

                fn output_layout(&self, _: &ScalarNode<A>, _: &ScalarNode<B>) -> Result<(), TensorError> {
                    Ok(())
                }

                fn call(
                    &self,
                    left: &ScalarNode<A>,
                    right: &ScalarNode<B>,
                    output: &mut ScalarNode<A::Common>,
                ) -> Result<(), TensorError> {
                    output.set(self.apply(left.value().left(), A::right(right.value()))?);
                    Ok(())
                }
            }
        )*
    };
}

impl_broadcast!(Elementwise, Mul);

impl<A, B, S> BinaryFunction<TensorNode<A, S>, TensorNode<B, S>> for Elementwise
where
    A: Promote<B>,
    B: Scalar,
    S: Shape,
{
    type Output = TensorNode<A::Common, S>;

    fn output_layout(&self, left: &TensorNode<A, S>, right: &TensorNode<B, S>) -> Result<S, TensorError> {
        elementwise_shape(left.shape(), right.shape())
    }

    fn call(
        &self,
        left: &TensorNode<A, S>,
        right: &TensorNode<B, S>,
        output: &mut Self::Output,
    ) -> Result<(), TensorError> {
        elementwise::zip_map(left, right, output, |a, b| self.apply(a.left(), A::right(b)))
    }
}

impl<A, B, SL, SR> BinaryFunction<TensorNode<A, SL>, TensorNode<B, SR>> for Mul
where
    A: Promote<B>,
    B: Scalar,
    SL: MulShape<SR>,
    SR: Shape,
{
    type Output = TensorNode<A::Common, SL::Output>;

    fn output_layout(
        &self,
        left: &TensorNode<A, SL>,
        right: &TensorNode<B, SR>,
    ) -> Result<SL::Output, TensorError> {
        left.shape().mul_shape(right.shape())
    }

    fn call(
        &self,
        left: &TensorNode<A, SL>,
        right: &TensorNode<B, SR>,
        output: &mut Self::Output,
    ) -> Result<(), TensorError> {
        if SL::KERNEL == MulKernel::Elementwise {
            return elementwise::zip_map(left, right, output, |a, b| self.apply(a.left(), A::right(b)));
        }

        // the dense kernel needs both operands in the common type
        let lhs = A::left_slice(left.data());
        let rhs = A::right_slice(right.data());
        let a = MatrixView::new(&lhs, left.dim(0), left.dim(1), left.is_transposed());
        let b = match SL::KERNEL {
            MulKernel::MatVec => MatrixView::new(&rhs, right.dim(0), 1, false),
            _ => MatrixView::new(&rhs, right.dim(0), right.dim(1), right.is_transposed()),
        };
        gemm::matmul(output.data_mut(), a, b)
    }
}
