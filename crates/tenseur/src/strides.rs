//! Stride computation utilities.
//!
//! Tensors are stored in column-major (Fortran) order, the layout faer
//! expects for its matrix views.

use smallvec::SmallVec;

/// Cartesian index buffer. Ranks used in practice fit inline.
pub type Indices = SmallVec<[usize; 4]>;

/// Compute column-major strides from dimensions.
///
/// For dims `[d0, d1, d2, ...]`, returns `[1, d0, d0*d1, ...]`.
///
/// # Examples
///
/// ```
/// use tenseur::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), [1, 3, 12]);
/// assert_eq!(compute_strides(&[2, 3]), [1, 2]);
/// assert_eq!(compute_strides(&[5]), [1]);
/// ```
pub fn compute_strides<const R: usize>(dims: &[usize; R]) -> [usize; R] {
    let mut strides = [0; R];
    let mut stride = 1;

    for (s, &dim) in strides.iter_mut().zip(dims.iter()) {
        *s = stride;
        stride *= dim;
    }

    strides
}

/// Convert a linear index to column-major cartesian indices.
pub fn linear_to_cartesian(mut linear: usize, dims: &[usize]) -> Indices {
    let mut indices = Indices::with_capacity(dims.len());

    for &dim in dims {
        indices.push(linear % dim);
        linear /= dim;
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_strides_3d() {
        assert_eq!(compute_strides(&[3, 4, 5]), [1, 3, 12]);
    }

    #[test]
    fn test_compute_strides_rank0() {
        assert_eq!(compute_strides::<0>(&[]), []);
    }

    #[test]
    fn test_linear_to_cartesian_inverts() {
        let dims = [3, 4, 5];
        let strides = compute_strides(&dims);
        for linear in 0..60 {
            let idx = linear_to_cartesian(linear, &dims);
            let offset: usize = idx.iter().zip(&strides).map(|(i, s)| i * s).sum();
            assert_eq!(offset, linear);
        }
        assert_eq!(linear_to_cartesian(12, &dims).as_slice(), &[0, 0, 1]);
    }
}
