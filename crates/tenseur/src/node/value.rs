//! Leaf nodes holding materialized data.

use std::fmt::Debug;
use std::rc::Rc;

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::storage::Dense;
use crate::strides::linear_to_cartesian;
use crate::tensor::{ScalarValue, Tensor};

/// A materialized value: the output of every node and the input of every
/// function descriptor.
pub trait ValueNode: Debug {
    /// Element type.
    type Elem: Scalar;

    /// What is needed to allocate an output of this kind: the shape for a
    /// tensor, nothing for a scalar.
    type Layout: Clone + Debug;

    /// User-facing handle produced by `eval()`.
    type Handle;

    /// Allocate a zero-initialized value.
    fn allocate(layout: &Self::Layout) -> Result<Self, TensorError>
    where
        Self: Sized;

    /// Wrap an evaluated node in its user-facing handle.
    fn into_handle(node: Rc<Self>) -> Self::Handle;

    /// Number of elements held.
    fn size(&self) -> usize;
}

/// A tensor value: shape, storage handle and transposition flag.
///
/// For static shapes `S` is zero-sized, so only the storage handle and the
/// flag are stored. The storage always holds exactly `shape.size()`
/// elements.
#[derive(Debug, Clone)]
pub struct TensorNode<T: Scalar, S: Shape> {
    shape: S,
    storage: Dense<T>,
    transposed: bool,
}

impl<T: Scalar, S: Shape> TensorNode<T, S> {
    /// Create a node over existing storage.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the storage length differs
    /// from the shape's element count.
    pub fn new(shape: S, storage: Dense<T>) -> Result<Self, TensorError> {
        if storage.len() != shape.size() {
            return Err(TensorError::ShapeMismatch {
                expected: shape.size(),
                actual: storage.len(),
            });
        }
        Ok(Self {
            shape,
            storage,
            transposed: false,
        })
    }

    /// Build a node whose storage is known to match `shape`.
    pub(crate) fn from_parts(shape: S, storage: Dense<T>, transposed: bool) -> Self {
        debug_assert_eq!(storage.len(), shape.size());
        Self {
            shape,
            storage,
            transposed,
        }
    }

    pub(crate) fn with_transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }

    /// Logical shape (already transposed for transposed views).
    #[inline]
    pub fn shape(&self) -> &S {
        &self.shape
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    #[inline]
    pub fn dim(&self, i: usize) -> usize {
        self.shape.dim(i)
    }

    /// Whether the data is stored as the transpose of the logical shape.
    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    #[inline]
    pub fn storage(&self) -> &Dense<T> {
        &self.storage
    }

    /// Raw storage in physical order.
    #[inline]
    pub fn data(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Mutable raw storage; detaches shared buffers first.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Storage offset of a multi-index, with bounds checks.
    pub fn offset(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != S::RANK {
            return Err(TensorError::WrongNumberOfIndices {
                expected: S::RANK,
                actual: indices.len(),
            });
        }
        for (i, &idx) in indices.iter().enumerate() {
            let dim_size = self.shape.dim(i);
            if idx >= dim_size {
                return Err(TensorError::IndexOutOfBounds {
                    index: idx,
                    dim_size,
                });
            }
        }
        Ok(self.offset_unchecked(indices))
    }

    #[inline]
    fn offset_unchecked(&self, indices: &[usize]) -> usize {
        if self.transposed {
            // physical layout is column-major over the swapped dims
            indices[1] + indices[0] * self.shape.dim(1)
        } else {
            indices
                .iter()
                .enumerate()
                .map(|(i, &idx)| idx * self.shape.stride(i))
                .sum()
        }
    }

    /// Element at logical (column-major) position `linear`.
    #[inline]
    pub fn get_logical(&self, linear: usize) -> T {
        if self.transposed {
            let idx = linear_to_cartesian(linear, &self.shape.dims());
            self.storage[self.offset_unchecked(&idx)]
        } else {
            self.storage[linear]
        }
    }

    /// Copy the elements out in logical order.
    pub fn to_logical_vec(&self) -> Vec<T> {
        if self.transposed {
            (0..self.size()).map(|l| self.get_logical(l)).collect()
        } else {
            self.data().to_vec()
        }
    }
}

impl<T: Scalar, S: Shape> ValueNode for TensorNode<T, S> {
    type Elem = T;
    type Layout = S;
    type Handle = Tensor<T, S>;

    fn allocate(shape: &S) -> Result<Self, TensorError> {
        Self::new(shape.clone(), Dense::try_zeros(shape.size())?)
    }

    fn into_handle(node: Rc<Self>) -> Tensor<T, S> {
        Tensor::from_node(node)
    }

    fn size(&self) -> usize {
        self.shape.size()
    }
}

/// A single scalar value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScalarNode<T: Scalar> {
    value: T,
}

impl<T: Scalar> ScalarNode<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Scalar> ValueNode for ScalarNode<T> {
    type Elem = T;
    type Layout = ();
    type Handle = ScalarValue<T>;

    fn allocate(_: &()) -> Result<Self, TensorError> {
        Ok(Self::default())
    }

    fn into_handle(node: Rc<Self>) -> ScalarValue<T> {
        ScalarValue::from_node(node)
    }

    fn size(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{DynamicShape, StaticMatrixShape};

    #[test]
    fn test_new_checks_size() {
        let err = TensorNode::new(DynamicShape::new([2, 2]), Dense::<f64>::zeros(3)).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_offset_column_major() {
        let node = TensorNode::new(DynamicShape::new([2, 3]), Dense::<f64>::zeros(6)).unwrap();
        assert_eq!(node.offset(&[1, 2]).unwrap(), 5);
        assert_eq!(node.offset(&[0, 1]).unwrap(), 2);
        assert!(matches!(
            node.offset(&[2, 0]),
            Err(TensorError::IndexOutOfBounds { index: 2, dim_size: 2 })
        ));
        assert!(matches!(
            node.offset(&[0]),
            Err(TensorError::WrongNumberOfIndices { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_transposed_logical_order() {
        // physical 2x3 [[0, 2, 4], [1, 3, 5]], seen as its 3x2 transpose
        let storage = Dense::from_vec(vec![0, 1, 2, 3, 4, 5]);
        let node = TensorNode::new(StaticMatrixShape::<3, 2>, storage)
            .unwrap()
            .with_transposed(true);
        assert_eq!(node.offset(&[2, 1]).unwrap(), 5);
        assert_eq!(node.to_logical_vec(), vec![0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_allocate() {
        let node = TensorNode::<i64, _>::allocate(&DynamicShape::new([4])).unwrap();
        assert_eq!(node.data(), &[0, 0, 0, 0]);
        let s = ScalarNode::<f32>::allocate(&()).unwrap();
        assert_eq!(s.value(), 0.0);
    }
}
