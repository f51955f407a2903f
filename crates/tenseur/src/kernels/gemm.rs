//! Dense matrix product.
//!
//! Operands are passed as [`MatrixView`]s carrying the transpose flag and
//! leading dimension of their storage, so transposed tensors never need
//! to be copied before a product.

use tracing::debug;

use crate::error::TensorError;
use crate::scalar::Scalar;

/// Read-only column-major matrix over a slice.
///
/// `rows`/`cols` are the logical extents. When `transposed` is set the
/// slice holds the column-major `cols x rows` matrix whose transpose is
/// the logical one.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    transposed: bool,
}

impl<'a, T: Scalar> MatrixView<'a, T> {
    /// # Panics
    ///
    /// Panics if `data` does not hold exactly `rows * cols` elements.
    pub fn new(data: &'a [T], rows: usize, cols: usize, transposed: bool) -> Self {
        assert_eq!(data.len(), rows * cols, "matrix view size mismatch");
        Self {
            data,
            rows,
            cols,
            transposed,
        }
    }

    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Leading dimension of the underlying storage.
    #[inline]
    pub fn ld(&self) -> usize {
        if self.transposed { self.cols } else { self.rows }
    }

    /// Element at logical position `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        if self.transposed {
            self.data[j + i * self.ld()]
        } else {
            self.data[i + j * self.ld()]
        }
    }
}

/// Reference triple loop, used for integer types and when faer is off.
///
/// # Errors
///
/// Returns `TensorError::Overflow` if an integer product or partial sum
/// does not fit `T`.
pub fn gemm_naive<T: Scalar>(
    c: &mut [T],
    a: MatrixView<'_, T>,
    b: MatrixView<'_, T>,
) -> Result<(), TensorError> {
    let (m, n, k) = (a.rows(), b.cols(), a.cols());
    for j in 0..n {
        for i in 0..m {
            let mut acc = T::zero();
            for p in 0..k {
                acc = a
                    .get(i, p)
                    .checked_mul(b.get(p, j))
                    .and_then(|x| acc.checked_add(x))
                    .ok_or(TensorError::Overflow { op: "mul" })?;
            }
            c[i + j * m] = acc;
        }
    }
    Ok(())
}

fn backend<T: Scalar>() -> &'static str {
    if cfg!(feature = "faer") && !T::IS_INTEGER {
        "faer"
    } else {
        "naive"
    }
}

/// `C = A * B` with `C` column-major `a.rows() x b.cols()`.
pub(crate) fn matmul<T: Scalar>(
    c: &mut [T],
    a: MatrixView<'_, T>,
    b: MatrixView<'_, T>,
) -> Result<(), TensorError> {
    debug_assert_eq!(a.cols(), b.rows());
    debug_assert_eq!(c.len(), a.rows() * b.cols());
    debug!(
        m = a.rows(),
        n = b.cols(),
        k = a.cols(),
        transpose_a = a.is_transposed(),
        transpose_b = b.is_transposed(),
        backend = backend::<T>(),
        "dense matrix product"
    );
    T::gemm(c, a, b)
}
