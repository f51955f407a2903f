//! Shape types.
//!
//! A shape is either dynamic ([`DynamicShape`], dimensions known at run
//! time) or static ([`StaticVectorShape`], [`StaticMatrixShape`], zero-sized
//! types whose dimensions live in the type). Rank is always a compile-time
//! constant, which is what lets operand kinds (vector, matrix) be resolved
//! by the type checker.

use std::fmt::Debug;

use crate::strides::compute_strides;

/// Dimension bookkeeping shared by all shape types.
pub trait Shape: Clone + Debug + PartialEq {
    /// Number of dimensions.
    const RANK: usize;

    /// Whether the dimensions are fixed by the type.
    const IS_STATIC: bool;

    /// Extent of dimension `i`.
    fn dim(&self, i: usize) -> usize;

    /// Column-major stride of dimension `i`.
    fn stride(&self, i: usize) -> usize;

    /// Total number of elements.
    fn size(&self) -> usize {
        (0..Self::RANK).map(|i| self.dim(i)).product()
    }

    /// All dimensions, outermost last.
    fn dims(&self) -> Vec<usize> {
        (0..Self::RANK).map(|i| self.dim(i)).collect()
    }

    fn is_dynamic(&self) -> bool {
        !Self::IS_STATIC
    }
}

/// Shapes fixed entirely at compile time.
pub trait StaticShape: Shape + Copy + Default {
    /// Total number of elements.
    const SIZE: usize;
}

/// Rank-2 shapes.
pub trait MatrixShape: Shape {
    /// Shape of the transposed matrix.
    type Transposed: MatrixShape<Transposed = Self>;

    fn transposed(&self) -> Self::Transposed;

    fn rows(&self) -> usize {
        self.dim(0)
    }

    fn cols(&self) -> usize {
        self.dim(1)
    }
}

/// Shape with run-time dimensions and cached strides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DynamicShape<const R: usize> {
    dims: [usize; R],
    strides: [usize; R],
}

impl<const R: usize> DynamicShape<R> {
    /// Create a shape from its dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::{DynamicShape, Shape};
    ///
    /// let s = DynamicShape::new([2, 3]);
    /// assert_eq!(s.size(), 6);
    /// assert_eq!(s.stride(1), 2);
    /// ```
    pub fn new(dims: [usize; R]) -> Self {
        Self {
            dims,
            strides: compute_strides(&dims),
        }
    }
}

impl<const R: usize> From<[usize; R]> for DynamicShape<R> {
    fn from(dims: [usize; R]) -> Self {
        Self::new(dims)
    }
}

impl From<usize> for DynamicShape<1> {
    fn from(len: usize) -> Self {
        Self::new([len])
    }
}

impl<const R: usize> Shape for DynamicShape<R> {
    const RANK: usize = R;
    const IS_STATIC: bool = false;

    #[inline]
    fn dim(&self, i: usize) -> usize {
        self.dims[i]
    }

    #[inline]
    fn stride(&self, i: usize) -> usize {
        self.strides[i]
    }

    fn size(&self) -> usize {
        self.dims.iter().product()
    }
}

impl MatrixShape for DynamicShape<2> {
    type Transposed = Self;

    fn transposed(&self) -> Self {
        Self::new([self.dims[1], self.dims[0]])
    }
}

/// Vector of `N` elements known at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StaticVectorShape<const N: usize>;

impl<const N: usize> Shape for StaticVectorShape<N> {
    const RANK: usize = 1;
    const IS_STATIC: bool = true;

    #[inline]
    fn dim(&self, i: usize) -> usize {
        assert!(i == 0, "dimension {i} out of range for a vector");
        N
    }

    #[inline]
    fn stride(&self, i: usize) -> usize {
        assert!(i == 0, "dimension {i} out of range for a vector");
        1
    }

    fn size(&self) -> usize {
        N
    }
}

impl<const N: usize> StaticShape for StaticVectorShape<N> {
    const SIZE: usize = N;
}

/// `R x C` matrix known at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StaticMatrixShape<const R: usize, const C: usize>;

impl<const R: usize, const C: usize> Shape for StaticMatrixShape<R, C> {
    const RANK: usize = 2;
    const IS_STATIC: bool = true;

    #[inline]
    fn dim(&self, i: usize) -> usize {
        match i {
            0 => R,
            1 => C,
            _ => panic!("dimension {i} out of range for a matrix"),
        }
    }

    #[inline]
    fn stride(&self, i: usize) -> usize {
        match i {
            0 => 1,
            1 => R,
            _ => panic!("dimension {i} out of range for a matrix"),
        }
    }

    fn size(&self) -> usize {
        R * C
    }
}

impl<const R: usize, const C: usize> StaticShape for StaticMatrixShape<R, C> {
    const SIZE: usize = R * C;
}

impl<const R: usize, const C: usize> MatrixShape for StaticMatrixShape<R, C> {
    type Transposed = StaticMatrixShape<C, R>;

    fn transposed(&self) -> Self::Transposed {
        StaticMatrixShape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_shape() {
        let s = DynamicShape::new([3, 4, 5]);
        assert_eq!(s.size(), 60);
        assert_eq!(s.dims(), vec![3, 4, 5]);
        assert_eq!(s.stride(2), 12);
        assert!(s.is_dynamic());
    }

    #[test]
    fn test_static_matrix_shape() {
        let s = StaticMatrixShape::<2, 3>;
        assert_eq!(s.size(), 6);
        assert_eq!(s.stride(1), 2);
        assert_eq!(StaticMatrixShape::<2, 3>::SIZE, 6);
        assert_eq!(std::mem::size_of::<StaticMatrixShape<2, 3>>(), 0);
        assert!(!s.is_dynamic());
    }

    #[test]
    fn test_transposed() {
        let s = DynamicShape::new([2, 5]);
        assert_eq!(s.transposed().dims(), vec![5, 2]);
        let t: StaticMatrixShape<3, 2> = StaticMatrixShape::<2, 3>.transposed();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
    }
}
