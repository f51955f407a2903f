//! Elementwise loops.
//!
//! Outputs are always freshly allocated and untransposed, so they are
//! written in storage order. Inputs that are transposed views are read in
//! logical order; everything else takes the slice fast path.

use crate::error::TensorError;
use crate::node::TensorNode;
use crate::scalar::Scalar;
use crate::shape::Shape;

/// `output[i] = f(input[i])` over logical positions.
pub(crate) fn map<A, B, SI, SO, F>(
    input: &TensorNode<A, SI>,
    output: &mut TensorNode<B, SO>,
    mut f: F,
) -> Result<(), TensorError>
where
    A: Scalar,
    B: Scalar,
    SI: Shape,
    SO: Shape,
    F: FnMut(A) -> Result<B, TensorError>,
{
    debug_assert_eq!(input.size(), output.size());
    let out = output.data_mut();

    if input.is_transposed() {
        for (l, o) in out.iter_mut().enumerate() {
            *o = f(input.get_logical(l))?;
        }
    } else {
        for (o, &x) in out.iter_mut().zip(input.data()) {
            *o = f(x)?;
        }
    }
    Ok(())
}

/// `output[i] = f(left[i], right[i])` over logical positions.
///
/// Operands must have the same number of elements; callers resolve the
/// output shape (and reject mismatches) before allocating.
pub(crate) fn zip_map<A, B, C, SL, SR, SO, F>(
    left: &TensorNode<A, SL>,
    right: &TensorNode<B, SR>,
    output: &mut TensorNode<C, SO>,
    mut f: F,
) -> Result<(), TensorError>
where
    A: Scalar,
    B: Scalar,
    C: Scalar,
    SL: Shape,
    SR: Shape,
    SO: Shape,
    F: FnMut(A, B) -> Result<C, TensorError>,
{
    debug_assert_eq!(left.size(), output.size());
    debug_assert_eq!(right.size(), output.size());
    let out = output.data_mut();

    if left.is_transposed() || right.is_transposed() {
        for (l, o) in out.iter_mut().enumerate() {
            *o = f(left.get_logical(l), right.get_logical(l))?;
        }
    } else {
        for ((o, &a), &b) in out.iter_mut().zip(left.data()).zip(right.data()) {
            *o = f(a, b)?;
        }
    }
    Ok(())
}
