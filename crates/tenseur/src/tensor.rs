//! Concrete value handles: [`Tensor`] and [`ScalarValue`].
//!
//! Both wrap a reference-counted value node, so they can be captured by
//! any number of pending expressions without copying. Writes go through
//! copy-on-write: an expression built from a tensor keeps seeing the data
//! it was built from.

use std::ops::{Index, IndexMut};
use std::rc::Rc;

use crate::error::TensorError;
use crate::node::{ScalarNode, TensorNode};
use crate::scalar::{CastTo, Scalar};
use crate::shape::{DynamicShape, MatrixShape, Shape, StaticMatrixShape, StaticShape, StaticVectorShape};
use crate::storage::Dense;

/// A tensor with element type `T` and shape type `S`.
#[derive(Debug, Clone)]
pub struct Tensor<T: Scalar, S: Shape> {
    node: Rc<TensorNode<T, S>>,
}

/// Dynamically-sized vector.
pub type Vector<T> = Tensor<T, DynamicShape<1>>;

/// Dynamically-sized matrix.
pub type Matrix<T> = Tensor<T, DynamicShape<2>>;

/// Dynamically-sized tensor of rank `R`.
pub type DynamicTensor<T, const R: usize> = Tensor<T, DynamicShape<R>>;

/// Vector whose length is part of its type.
pub type StaticVector<T, const N: usize> = Tensor<T, StaticVectorShape<N>>;

/// Matrix whose dimensions are part of its type.
pub type StaticMatrix<T, const R: usize, const C: usize> = Tensor<T, StaticMatrixShape<R, C>>;

impl<T: Scalar, S: Shape> Tensor<T, S> {
    pub(crate) fn from_node(node: Rc<TensorNode<T, S>>) -> Self {
        Self { node }
    }

    fn from_parts(shape: S, storage: Dense<T>, transposed: bool) -> Self {
        Self::from_node(Rc::new(TensorNode::from_parts(shape, storage, transposed)))
    }

    /// Create a zero-initialized tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::Matrix;
    ///
    /// let t = Matrix::<f64>::zeros([2, 3]);
    /// assert_eq!(t.dims(), vec![2, 3]);
    /// assert_eq!(t.len(), 6);
    /// ```
    pub fn zeros(shape: impl Into<S>) -> Self {
        Self::full(shape, T::zero())
    }

    pub fn ones(shape: impl Into<S>) -> Self {
        Self::full(shape, T::one())
    }

    /// Create a tensor with every element set to `value`.
    pub fn full(shape: impl Into<S>, value: T) -> Self {
        let shape = shape.into();
        let storage = Dense::from_vec(vec![value; shape.size()]);
        Self::from_parts(shape, storage, false)
    }

    /// Create a tensor holding `0, 1, 2, ...` in storage order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::Vector;
    ///
    /// let v = Vector::<i32>::iota(4);
    /// assert_eq!(v.data(), &[0, 1, 2, 3]);
    /// ```
    pub fn iota(shape: impl Into<S>) -> Self {
        let shape = shape.into();
        let data = std::iter::successors(Some(T::zero()), |&x| x.checked_add(T::one()))
            .take(shape.size())
            .collect();
        Self::from_parts(shape, Dense::from_vec(data), false)
    }

    /// Create a tensor holding `start, start + 1, ...` in storage order.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::Overflow` if the last element does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::Vector;
    ///
    /// let v = Vector::<i32>::iota_from(3, 5).unwrap();
    /// assert_eq!(v.data(), &[5, 6, 7]);
    /// assert!(Vector::<i32>::iota_from(2, i32::MAX).is_err());
    /// ```
    pub fn iota_from(shape: impl Into<S>, start: T) -> Result<Self, TensorError> {
        let shape = shape.into();
        let size = shape.size();
        let mut data = Vec::with_capacity(size);
        let mut next = start;
        for k in 0..size {
            if k > 0 {
                next = next
                    .checked_add(T::one())
                    .ok_or(TensorError::Overflow { op: "iota" })?;
            }
            data.push(next);
        }
        Ok(Self::from_parts(shape, Dense::from_vec(data), false))
    }

    /// Create a tensor from column-major data.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if data length doesn't match shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::Matrix;
    ///
    /// let t = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap();
    /// assert_eq!(t.get(&[1, 0]), Some(&2.0)); // column-major
    /// assert_eq!(t[[0, 1]], 3.0);
    /// ```
    pub fn from_vec(data: Vec<T>, shape: impl Into<S>) -> Result<Self, TensorError> {
        let node = TensorNode::new(shape.into(), Dense::from_vec(data))?;
        Ok(Self::from_node(Rc::new(node)))
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) {
        self.data_mut().fill(value);
    }

    /// The underlying value node.
    pub fn node(&self) -> Rc<TensorNode<T, S>> {
        Rc::clone(&self.node)
    }

    #[inline]
    pub fn shape(&self) -> &S {
        self.node.shape()
    }

    pub fn dims(&self) -> Vec<usize> {
        self.shape().dims()
    }

    #[inline]
    pub fn dim(&self, i: usize) -> usize {
        self.node.dim(i)
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        S::RANK
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.node.size()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Storage in physical order. For transposed views this is the
    /// storage of the original matrix.
    #[inline]
    pub fn data(&self) -> &[T] {
        self.node.data()
    }

    /// Mutable storage; detaches from any other handle first.
    pub fn data_mut(&mut self) -> &mut [T] {
        Rc::make_mut(&mut self.node).data_mut()
    }

    /// Elements in logical column-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.node.to_logical_vec()
    }

    /// Element at a multi-index, or `None` if out of bounds.
    pub fn get(&self, indices: &[usize]) -> Option<&T> {
        let offset = self.node.offset(indices).ok()?;
        self.data().get(offset)
    }

    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut T> {
        let offset = self.node.offset(indices).ok()?;
        self.data_mut().get_mut(offset)
    }

    /// Set the element at a multi-index.
    ///
    /// # Errors
    ///
    /// Returns an error for a wrong index count or an out-of-range index.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<(), TensorError> {
        let offset = self.node.offset(indices)?;
        self.data_mut()[offset] = value;
        Ok(())
    }

    /// Whether the data is stored as the transpose of the logical shape.
    pub fn is_transposed(&self) -> bool {
        self.node.is_transposed()
    }

    /// Whether another handle shares this tensor's buffer.
    pub fn is_view(&self) -> bool {
        self.node.storage().is_shared()
    }

    pub fn shares_storage_with<S2: Shape>(&self, other: &Tensor<T, S2>) -> bool {
        self.node.storage().shares_storage_with(other.node.storage())
    }

    /// A tensor with the same elements laid out in logical order.
    ///
    /// Shares storage unless `self` is a transposed view.
    pub fn contiguous(&self) -> Self {
        if !self.is_transposed() {
            return self.clone();
        }
        let data = self.node.to_logical_vec();
        Self::from_parts(self.shape().clone(), Dense::from_vec(data), false)
    }

    /// View the elements under another shape.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the element counts differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::{Matrix, Vector};
    ///
    /// let v = Vector::<f64>::iota(6);
    /// let m: Matrix<f64> = v.reshape([2, 3]).unwrap();
    /// assert_eq!(m[[1, 2]], 5.0);
    /// assert!(m.shares_storage_with(&v));
    /// assert!(v.reshape::<tenseur::DynamicShape<2>>([4, 2]).is_err());
    /// ```
    pub fn reshape<S2: Shape>(&self, shape: impl Into<S2>) -> Result<Tensor<T, S2>, TensorError> {
        let base = self.contiguous();
        let node = TensorNode::new(shape.into(), base.node.storage().view())?;
        Ok(Tensor::from_node(Rc::new(node)))
    }

    /// Convert every element to `U`.
    pub fn cast<U: Scalar>(&self) -> Tensor<U, S>
    where
        T: CastTo<U>,
    {
        let data = T::cast_slice(self.data()).into_owned();
        Tensor::from_parts(self.shape().clone(), Dense::from_vec(data), self.is_transposed())
    }
}

impl<T: Scalar, S: StaticShape> Tensor<T, S> {
    /// Reshape between static shapes. The element counts are compared at
    /// compile time.
    pub fn reshape_static<S2: StaticShape>(&self) -> Tensor<T, S2> {
        const { assert!(S::SIZE == S2::SIZE, "reshape must preserve the element count") };
        let base = self.contiguous();
        Tensor::from_parts(S2::default(), base.node.storage().view(), false)
    }
}

impl<T: Scalar, S: MatrixShape> Tensor<T, S> {
    /// Transposed view sharing this tensor's storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::Matrix;
    ///
    /// let m = Matrix::<i32>::iota([2, 3]);
    /// let t = m.transpose();
    /// assert_eq!(t.dims(), vec![3, 2]);
    /// assert_eq!(t[[2, 1]], m[[1, 2]]);
    /// assert!(t.is_transposed());
    /// ```
    pub fn transpose(&self) -> Tensor<T, S::Transposed> {
        Tensor::from_parts(
            self.shape().transposed(),
            self.node.storage().view(),
            !self.is_transposed(),
        )
    }

    pub fn rows(&self) -> usize {
        self.shape().rows()
    }

    pub fn cols(&self) -> usize {
        self.shape().cols()
    }
}

impl<T: Scalar, S: StaticShape> Default for Tensor<T, S> {
    fn default() -> Self {
        Self::zeros(S::default())
    }
}

impl<T: Scalar, S: Shape> PartialEq for Tensor<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.dims() == other.dims() && self.to_vec() == other.to_vec()
    }
}

/// Raw storage access by linear offset.
impl<T: Scalar, S: Shape> Index<usize> for Tensor<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data()[i]
    }
}

impl<T: Scalar, S: Shape> IndexMut<usize> for Tensor<T, S> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data_mut()[i]
    }
}

/// Multi-index access. The number of indices must equal the rank; this is
/// checked at compile time.
impl<T: Scalar, S: Shape, const N: usize> Index<[usize; N]> for Tensor<T, S> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        const { assert!(N == S::RANK, "wrong number of indices") };
        match self.node.offset(&indices) {
            Ok(offset) => &self.data()[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Scalar, S: Shape, const N: usize> IndexMut<[usize; N]> for Tensor<T, S> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        const { assert!(N == S::RANK, "wrong number of indices") };
        match self.node.offset(&indices) {
            Ok(offset) => &mut self.data_mut()[offset],
            Err(err) => panic!("{err}"),
        }
    }
}

/// A scalar value handle.
#[derive(Debug, Clone)]
pub struct ScalarValue<T: Scalar> {
    node: Rc<ScalarNode<T>>,
}

impl<T: Scalar> ScalarValue<T> {
    pub fn new(value: T) -> Self {
        Self::from_node(Rc::new(ScalarNode::new(value)))
    }

    pub(crate) fn from_node(node: Rc<ScalarNode<T>>) -> Self {
        Self { node }
    }

    #[inline]
    pub fn value(&self) -> T {
        self.node.value()
    }

    /// Replace the value. Expressions already holding the old node keep it.
    pub fn set(&mut self, value: T) {
        Rc::make_mut(&mut self.node).set(value);
    }

    pub fn node(&self) -> Rc<ScalarNode<T>> {
        Rc::clone(&self.node)
    }
}

impl<T: Scalar> Default for ScalarValue<T> {
    fn default() -> Self {
        Self::new(T::zero())
    }
}

impl<T: Scalar> From<T> for ScalarValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Scalar> PartialEq for ScalarValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iota_from() {
        let v = Vector::<i64>::iota_from(4, -2).unwrap();
        assert_eq!(v.data(), &[-2, -1, 0, 1]);
        let m = Matrix::<f64>::iota_from([2, 2], 0.5).unwrap();
        assert_eq!(m.data(), &[0.5, 1.5, 2.5, 3.5]);

        // the last element may be the type's maximum
        let top = Vector::<i32>::iota_from(2, i32::MAX - 1).unwrap();
        assert_eq!(top.data(), &[i32::MAX - 1, i32::MAX]);
        assert_eq!(
            Vector::<i32>::iota_from(2, i32::MAX).unwrap_err(),
            TensorError::Overflow { op: "iota" }
        );
        assert!(Vector::<i32>::iota_from(0, i32::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_zeros_ones_full() {
        let z = Vector::<f64>::zeros(3);
        assert_eq!(z.data(), &[0.0, 0.0, 0.0]);
        let o = Matrix::<i32>::ones([2, 2]);
        assert_eq!(o.data(), &[1, 1, 1, 1]);
        let f = StaticVector::<f32, 2>::full(StaticVectorShape::<2>, 2.5);
        assert_eq!(f.data(), &[2.5, 2.5]);
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let err = Matrix::from_vec(vec![1.0, 2.0, 3.0], [2, 2]).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_set_get() {
        let mut t = DynamicTensor::<f64, 3>::zeros([2, 3, 4]);
        t.set(&[1, 2, 3], 7.0).unwrap();
        assert_eq!(t.get(&[1, 2, 3]), Some(&7.0));
        assert_eq!(t[[1, 2, 3]], 7.0);
        assert_eq!(t.get(&[2, 0, 0]), None);
        assert!(matches!(
            t.set(&[0, 0], 1.0),
            Err(TensorError::WrongNumberOfIndices { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_copy_on_write() {
        let a = Vector::from_vec(vec![1.0, 2.0], 2).unwrap();
        let mut b = a.clone();
        assert!(b.shares_storage_with(&a));
        b[0] = 10.0;
        assert!(!b.shares_storage_with(&a));
        assert_eq!(a.data(), &[1.0, 2.0]);
        assert_eq!(b.data(), &[10.0, 2.0]);
    }

    #[test]
    fn test_transpose_and_contiguous() {
        let m = Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], [2, 3]).unwrap();
        let t = m.transpose();
        assert!(t.shares_storage_with(&m));
        assert_eq!(t.to_vec(), vec![1, 3, 5, 2, 4, 6]);

        let c = t.contiguous();
        assert!(!c.is_transposed());
        assert_eq!(c.data(), &[1, 3, 5, 2, 4, 6]);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_reshape_static() {
        let m = StaticMatrix::<f64, 2, 3>::iota(StaticMatrixShape::<2, 3>);
        let v: StaticVector<f64, 6> = m.reshape_static();
        assert_eq!(v.data(), m.data());
        assert!(v.shares_storage_with(&m));
        assert_eq!(std::mem::size_of_val(v.shape()), 0);
    }

    #[test]
    fn test_reshape_of_transposed_copies() {
        let m = Matrix::<i64>::iota([2, 2]);
        let v: Vector<i64> = m.transpose().reshape(4).unwrap();
        assert_eq!(v.data(), &[0, 2, 1, 3]);
        assert!(!v.shares_storage_with(&m));
    }

    #[test]
    fn test_cast() {
        let a = Vector::from_vec(vec![1.7f64, -2.2], 2).unwrap();
        let b: Vector<i32> = a.cast();
        assert_eq!(b.data(), &[1, -2]);
    }

    #[test]
    fn test_scalar_value_set() {
        let mut s = ScalarValue::new(1.5f64);
        let node = s.node();
        s.set(2.5);
        assert_eq!(s.value(), 2.5);
        assert_eq!(node.value(), 1.5);
    }

    #[test]
    fn test_default_static() {
        let m = StaticMatrix::<i32, 2, 2>::default();
        assert_eq!(m.data(), &[0, 0, 0, 0]);
    }
}
