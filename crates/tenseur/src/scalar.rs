//! Scalar traits for tensor element types.
//!
//! [`Scalar`] is the element bound used everywhere in the crate.
//! [`CastTo`] converts between element types and [`Promote`] encodes the
//! common-type table used when two operands with different element types
//! meet in a binary expression.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::TensorError;
use crate::kernels::gemm::{MatrixView, gemm_naive};

/// Trait for scalar types supported by tenseur.
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    /// Whether the type is an integer type (division by zero is an error).
    const IS_INTEGER: bool;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Square root. Integers go through `f64` and truncate.
    fn sqrt(self) -> Self;

    /// Absolute value, `None` when it is not representable (`MIN` of an
    /// integer type).
    fn checked_abs(self) -> Option<Self>;

    /// Raise to a floating-point power.
    fn powf(self, n: f64) -> Self;

    /// Total order used by the `min`/`max` reductions.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Integer arithmetic that does not fit the type yields `None`.
    /// Floating-point arithmetic always succeeds (IEEE semantics).
    fn checked_add(self, rhs: Self) -> Option<Self>;

    fn checked_sub(self, rhs: Self) -> Option<Self>;

    fn checked_mul(self, rhs: Self) -> Option<Self>;

    /// Division. For integers, both `x / 0` and `MIN / -1` yield `None`.
    fn checked_div(self, rhs: Self) -> Option<Self>;

    /// Dense product `C = A * B` into a column-major output of shape
    /// `(a.rows(), b.cols())`.
    ///
    /// Floating-point types override this with faer when the `faer`
    /// feature is enabled.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::Overflow` if an integer product or sum does
    /// not fit the element type.
    fn gemm(
        c: &mut [Self],
        a: MatrixView<'_, Self>,
        b: MatrixView<'_, Self>,
    ) -> Result<(), TensorError> {
        gemm_naive(c, a, b)
    }
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const IS_INTEGER: bool = false;

                fn one() -> Self {
                    1.0
                }

                fn sqrt(self) -> Self {
                    <$t>::sqrt(self)
                }

                fn checked_abs(self) -> Option<Self> {
                    Some(<$t>::abs(self))
                }

                fn powf(self, n: f64) -> Self {
                    (self as f64).powf(n) as $t
                }

                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$t>::total_cmp(self, other)
                }

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }

                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs)
                }

                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    Some(self * rhs)
                }

                fn checked_div(self, rhs: Self) -> Option<Self> {
                    Some(self / rhs)
                }

                #[cfg(feature = "faer")]
                fn gemm(
                    c: &mut [Self],
                    a: MatrixView<'_, Self>,
                    b: MatrixView<'_, Self>,
                ) -> Result<(), TensorError> {
                    use faer::linalg::matmul::matmul;
                    use faer::{Accum, MatMut, MatRef, Par};

                    let (m, n) = (a.rows(), b.cols());
                    let lhs = if a.is_transposed() {
                        MatRef::from_column_major_slice(a.data(), a.cols(), a.rows()).transpose()
                    } else {
                        MatRef::from_column_major_slice(a.data(), a.rows(), a.cols())
                    };
                    let rhs = if b.is_transposed() {
                        MatRef::from_column_major_slice(b.data(), b.cols(), b.rows()).transpose()
                    } else {
                        MatRef::from_column_major_slice(b.data(), b.rows(), b.cols())
                    };
                    let mut dst = MatMut::from_column_major_slice_mut(c, m, n);

                    // C = 1 * A * B, overwriting C
                    matmul(dst.as_mut(), Accum::Replace, lhs, rhs, 1.0, Par::Seq);
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! impl_int_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                const IS_INTEGER: bool = true;

                fn one() -> Self {
                    1
                }

                fn sqrt(self) -> Self {
                    (self as f64).sqrt() as $t
                }

                fn checked_abs(self) -> Option<Self> {
                    <$t>::checked_abs(self)
                }

                fn powf(self, n: f64) -> Self {
                    (self as f64).powf(n) as $t
                }

                fn total_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_sub(self, rhs)
                }

                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_mul(self, rhs)
                }

                fn checked_div(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_div(self, rhs)
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
impl_int_scalar!(i32, i64);

/// Numeric conversion between element types (`as` semantics).
pub trait CastTo<U: Scalar>: Scalar {
    /// Convert one value.
    fn cast(self) -> U;

    /// Convert a slice. Identity conversions borrow the input.
    fn cast_slice(data: &[Self]) -> Cow<'_, [U]> {
        Cow::Owned(data.iter().map(|&x| x.cast()).collect())
    }
}

macro_rules! impl_cast {
    (identity: $($t:ty),*) => {
        $(
            impl CastTo<$t> for $t {
                #[inline]
                fn cast(self) -> $t {
                    self
                }

                fn cast_slice(data: &[$t]) -> Cow<'_, [$t]> {
                    Cow::Borrowed(data)
                }
            }
        )*
    };
    ($from:ty => $($to:ty),*) => {
        $(
            impl CastTo<$to> for $from {
                #[inline]
                fn cast(self) -> $to {
                    self as $to
                }
            }
        )*
    };
}

impl_cast!(identity: f32, f64, i32, i64);
impl_cast!(f32 => f64, i32, i64);
impl_cast!(f64 => f32, i32, i64);
impl_cast!(i32 => f32, f64, i64);
impl_cast!(i64 => f32, f64, i32);

/// Common element type of two operands.
///
/// Integers widen among themselves, an integer meeting a float becomes that
/// float, and `f32` meeting `f64` becomes `f64`.
pub trait Promote<Rhs: Scalar>: Scalar {
    /// The promoted element type.
    type Common: Scalar;

    /// Convert a left operand value.
    fn left(self) -> Self::Common;

    /// Convert a right operand value.
    fn right(rhs: Rhs) -> Self::Common;

    /// Convert a left operand buffer.
    fn left_slice(data: &[Self]) -> Cow<'_, [Self::Common]>;

    /// Convert a right operand buffer.
    fn right_slice(data: &[Rhs]) -> Cow<'_, [Self::Common]>;
}

macro_rules! impl_promote {
    ($($lhs:ty, $rhs:ty => $out:ty);* $(;)?) => {
        $(
            impl Promote<$rhs> for $lhs {
                type Common = $out;

                #[inline]
                fn left(self) -> $out {
                    CastTo::<$out>::cast(self)
                }

                #[inline]
                fn right(rhs: $rhs) -> $out {
                    CastTo::<$out>::cast(rhs)
                }

                fn left_slice(data: &[$lhs]) -> Cow<'_, [$out]> {
                    <$lhs as CastTo<$out>>::cast_slice(data)
                }

                fn right_slice(data: &[$rhs]) -> Cow<'_, [$out]> {
                    <$rhs as CastTo<$out>>::cast_slice(data)
                }
            }
        )*
    };
}

impl_promote! {
    f32, f32 => f32;
    f32, f64 => f64;
    f32, i32 => f32;
    f32, i64 => f32;
    f64, f32 => f64;
    f64, f64 => f64;
    f64, i32 => f64;
    f64, i64 => f64;
    i32, f32 => f32;
    i32, f64 => f64;
    i32, i32 => i32;
    i32, i64 => i64;
    i64, f32 => f32;
    i64, f64 => f64;
    i64, i32 => i64;
    i64, i64 => i64;
}
