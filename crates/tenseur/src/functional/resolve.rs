//! Output shape resolution.
//!
//! Element types are resolved by [`Promote`](crate::scalar::Promote);
//! shapes are resolved here. Elementwise operations require both operands
//! to have the same shape type and, for dynamic shapes, the same
//! dimensions. Multiplication dispatches on the operand kinds:
//!
//! | left           | right          | output         | kernel      |
//! |----------------|----------------|----------------|-------------|
//! | vector `n`     | vector `n`     | vector `n`     | elementwise |
//! | matrix `m x k` | matrix `k x n` | matrix `m x n` | mat-mat     |
//! | matrix `m x k` | vector `k`     | vector `m`     | mat-vec     |
//!
//! Static shapes check the inner dimensions in the type. Dynamic shapes
//! check them when the output is allocated.

use crate::error::TensorError;
use crate::shape::{DynamicShape, Shape, StaticMatrixShape, StaticVectorShape};

/// Compute path selected for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulKernel {
    Elementwise,
    MatMat,
    MatVec,
}

/// Shape of `Self * Rhs`.
pub trait MulShape<Rhs: Shape>: Shape {
    type Output: Shape;

    const KERNEL: MulKernel;

    fn mul_shape(&self, rhs: &Rhs) -> Result<Self::Output, TensorError>;
}

fn mismatch<L: Shape, R: Shape>(left: &L, right: &R) -> TensorError {
    TensorError::DimensionMismatch {
        left: left.dims(),
        right: right.dims(),
    }
}

/// Output shape of an elementwise operation: the left shape, provided the
/// right one matches it.
pub(crate) fn elementwise_shape<S: Shape>(left: &S, right: &S) -> Result<S, TensorError> {
    if left.dims() != right.dims() {
        return Err(mismatch(left, right));
    }
    Ok(left.clone())
}

impl MulShape<DynamicShape<1>> for DynamicShape<1> {
    type Output = DynamicShape<1>;

    const KERNEL: MulKernel = MulKernel::Elementwise;

    fn mul_shape(&self, rhs: &DynamicShape<1>) -> Result<Self::Output, TensorError> {
        elementwise_shape(self, rhs)
    }
}

impl<const N: usize> MulShape<StaticVectorShape<N>> for StaticVectorShape<N> {
    type Output = StaticVectorShape<N>;

    const KERNEL: MulKernel = MulKernel::Elementwise;

    fn mul_shape(&self, _: &StaticVectorShape<N>) -> Result<Self::Output, TensorError> {
        Ok(StaticVectorShape)
    }
}

impl MulShape<DynamicShape<2>> for DynamicShape<2> {
    type Output = DynamicShape<2>;

    const KERNEL: MulKernel = MulKernel::MatMat;

    fn mul_shape(&self, rhs: &DynamicShape<2>) -> Result<Self::Output, TensorError> {
        if self.dim(1) != rhs.dim(0) {
            return Err(mismatch(self, rhs));
        }
        Ok(DynamicShape::new([self.dim(0), rhs.dim(1)]))
    }
}

impl<const M: usize, const K: usize, const N: usize> MulShape<StaticMatrixShape<K, N>>
    for StaticMatrixShape<M, K>
{
    type Output = StaticMatrixShape<M, N>;

    const KERNEL: MulKernel = MulKernel::MatMat;

    fn mul_shape(&self, _: &StaticMatrixShape<K, N>) -> Result<Self::Output, TensorError> {
        Ok(StaticMatrixShape)
    }
}

impl MulShape<DynamicShape<1>> for DynamicShape<2> {
    type Output = DynamicShape<1>;

    const KERNEL: MulKernel = MulKernel::MatVec;

    fn mul_shape(&self, rhs: &DynamicShape<1>) -> Result<Self::Output, TensorError> {
        if self.dim(1) != rhs.dim(0) {
            return Err(mismatch(self, rhs));
        }
        Ok(DynamicShape::new([self.dim(0)]))
    }
}

impl<const M: usize, const K: usize> MulShape<StaticVectorShape<K>> for StaticMatrixShape<M, K> {
    type Output = StaticVectorShape<M>;

    const KERNEL: MulKernel = MulKernel::MatVec;

    fn mul_shape(&self, _: &StaticVectorShape<K>) -> Result<Self::Output, TensorError> {
        Ok(StaticVectorShape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmat_shape() {
        let out = DynamicShape::new([2, 3])
            .mul_shape(&DynamicShape::new([3, 4]))
            .unwrap();
        assert_eq!(out.dims(), vec![2, 4]);
    }

    #[test]
    fn test_matmat_inner_mismatch() {
        let err = DynamicShape::new([2, 3])
            .mul_shape(&DynamicShape::new([2, 4]))
            .unwrap_err();
        assert_eq!(
            err,
            TensorError::DimensionMismatch {
                left: vec![2, 3],
                right: vec![2, 4]
            }
        );
    }

    #[test]
    fn test_matvec_shape() {
        let out = DynamicShape::new([5, 3]).mul_shape(&DynamicShape::new([3])).unwrap();
        assert_eq!(out.dims(), vec![5]);
        assert_eq!(<DynamicShape<2> as MulShape<DynamicShape<1>>>::KERNEL, MulKernel::MatVec);
    }

    #[test]
    fn test_vector_lengths_must_match() {
        assert!(DynamicShape::new([3]).mul_shape(&DynamicShape::new([4])).is_err());
    }

    #[test]
    fn test_static_shapes() {
        let out: StaticMatrixShape<2, 4> = StaticMatrixShape::<2, 3>
            .mul_shape(&StaticMatrixShape::<3, 4>)
            .unwrap();
        assert_eq!(out.dims(), vec![2, 4]);
        let v: StaticVectorShape<2> = StaticMatrixShape::<2, 3>
            .mul_shape(&StaticVectorShape::<3>)
            .unwrap();
        assert_eq!(v.size(), 2);
    }
}
