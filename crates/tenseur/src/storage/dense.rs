//! Dense storage for tensor data.

use std::rc::Rc;

use crate::error::TensorError;
use crate::scalar::Scalar;

/// Dense storage: a reference-counted contiguous buffer in column-major
/// order.
///
/// Cloning is shallow. Views created with [`Dense::view`] share the buffer
/// and the first write through any handle detaches it
/// (copy-on-write).
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<T: Scalar> {
    data: Rc<Vec<T>>,
}

impl<T: Scalar> Dense<T> {
    /// Create dense storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![T::zero(); len])
    }

    /// Fallible [`Dense::zeros`]; reports allocation failure instead of
    /// aborting.
    pub fn try_zeros(len: usize) -> Result<Self, TensorError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| TensorError::AllocationFailed { len })?;
        data.resize(len, T::zero());
        Ok(Self::from_vec(data))
    }

    /// Create dense storage from existing vector (takes ownership).
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data: Rc::new(data),
        }
    }

    /// Another handle to the same buffer.
    pub fn view(&self) -> Self {
        Self {
            data: Rc::clone(&self.data),
        }
    }

    /// Length of storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable slice; clones the buffer first if it is shared.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        Rc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Whether both handles point at the same buffer.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Whether another handle to this buffer exists.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.data) > 1
    }
}

impl<T: Scalar> std::ops::Index<usize> for Dense<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Scalar> std::ops::IndexMut<usize> for Dense<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.as_mut_slice()[i]
    }
}
