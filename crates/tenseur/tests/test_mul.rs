//! Integration tests for multiplication: products, broadcasting, shapes.

use approx::assert_relative_eq;
use tenseur::{
    Matrix, ScalarValue, StaticMatrix, StaticMatrixShape, StaticVector, StaticVectorShape,
    TensorError, Vector,
};

/// Row-major fill: element (i, j) is `i * cols + j`.
fn row_major_iota(rows: usize, cols: usize) -> Matrix<f64> {
    let mut m = Matrix::zeros([rows, cols]);
    for i in 0..rows {
        for j in 0..cols {
            m[[i, j]] = (i * cols + j) as f64;
        }
    }
    m
}

/// Reference product computed element by element.
fn reference_matmul(a: &Matrix<f64>, b: &Matrix<f64>) -> Vec<Vec<f64>> {
    let (m, k, n) = (a.dim(0), a.dim(1), b.dim(1));
    let mut c = vec![vec![0.0; n]; m];
    for (i, row) in c.iter_mut().enumerate() {
        for (j, x) in row.iter_mut().enumerate() {
            for p in 0..k {
                *x += a[[i, p]] * b[[p, j]];
            }
        }
    }
    c
}

#[test]
fn test_matmul_2x3_by_3x4() {
    let a = row_major_iota(2, 3);
    let b = row_major_iota(3, 4);

    let c = (&a * &b).eval().unwrap();
    assert_eq!(c.dims(), vec![2, 4]);

    let expected = reference_matmul(&a, &b);
    for (i, row) in expected.iter().enumerate() {
        for (j, &x) in row.iter().enumerate() {
            assert_relative_eq!(c[[i, j]], x, epsilon = 1e-12);
        }
    }
    // first row: [0 1 2] * B
    assert_relative_eq!(c[[0, 0]], 20.0);
    assert_relative_eq!(c[[1, 3]], 92.0);
}

#[test]
fn test_matmul_shape_law() {
    for &(m, k, n) in &[(1, 1, 1), (3, 5, 2), (4, 1, 6), (7, 3, 7)] {
        let a = Matrix::<f64>::randn_seeded([m, k], 3);
        let b = Matrix::<f64>::randn_seeded([k, n], 4);
        let c = (&a * &b).eval().unwrap();
        assert_eq!(c.dims(), vec![m, n]);

        let expected = reference_matmul(&a, &b);
        for i in 0..m {
            for j in 0..n {
                assert_relative_eq!(c[[i, j]], expected[i][j], epsilon = 1e-10);
            }
        }
    }
}

#[test]
fn test_matvec_size() {
    let a = Matrix::<f64>::randn_seeded([5, 3], 9);
    let v = Vector::<f64>::randn_seeded(3, 10);
    let y = (&a * &v).eval().unwrap();
    assert_eq!(y.size(), 5);

    for i in 0..5 {
        let expected: f64 = (0..3).map(|p| a[[i, p]] * v[[p]]).sum();
        assert_relative_eq!(y[[i]], expected, epsilon = 1e-12);
    }
}

#[test]
fn test_inner_dimension_mismatch() {
    let a = Matrix::<f64>::ones([2, 3]);
    let v = Vector::<f64>::ones(4);
    assert_eq!(
        (&a * &v).eval().unwrap_err(),
        TensorError::DimensionMismatch {
            left: vec![2, 3],
            right: vec![4]
        }
    );
}

#[test]
fn test_vector_product_is_elementwise() {
    let a = Vector::from_vec(vec![1.0_f64, 2.0, 3.0], 3).unwrap();
    let b = Vector::from_vec(vec![4.0_f64, 5.0, 6.0], 3).unwrap();
    assert_eq!((&a * &b).eval().unwrap().data(), &[4.0, 10.0, 18.0]);

    let short = Vector::<f64>::ones(2);
    assert!(matches!(
        (&a * &short).eval(),
        Err(TensorError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_scalar_broadcast() {
    let t = Matrix::<f64>::randn_seeded([3, 4], 11);
    let alpha = 2.5_f64;

    let left = (alpha * &t).eval().unwrap();
    let right = (&t * alpha).eval().unwrap();
    assert_eq!(left.shape(), t.shape());
    assert_eq!(right.shape(), t.shape());
    for i in 0..t.len() {
        assert_relative_eq!(left[i], alpha * t[i]);
        assert_relative_eq!(right[i], t[i] * alpha);
    }
}

#[test]
fn test_scalar_broadcast_keeps_tensor_element_type() {
    let t = Vector::from_vec(vec![1.0f32, 2.0], 2).unwrap();
    let r: Vector<f32> = (3i64 * &t).try_into().unwrap();
    assert_eq!(r.data(), &[3.0, 6.0]);

    let s = ScalarValue::new(0.5f64);
    let q: Vector<f32> = (&t * &s).try_into().unwrap();
    assert_eq!(q.data(), &[0.5, 1.0]);
}

#[test]
fn test_transposed_operands() {
    // A is 3x2, so A^T * B multiplies (2x3) by (3x4)
    let a = Matrix::<f64>::randn_seeded([3, 2], 21);
    let b = Matrix::<f64>::randn_seeded([3, 4], 22);
    let at = a.transpose();
    assert!(at.is_transposed());

    let c = (&at * &b).eval().unwrap();
    let expected = reference_matmul(&at.contiguous(), &b);
    assert_eq!(c.dims(), vec![2, 4]);
    for i in 0..2 {
        for j in 0..4 {
            assert_relative_eq!(c[[i, j]], expected[i][j], epsilon = 1e-12);
        }
    }

    // B^T * A = (A^T * B)^T
    let d = (&b.transpose() * &a).eval().unwrap();
    assert_eq!(d.dims(), vec![4, 2]);
    assert_relative_eq!(d[[3, 1]], c[[1, 3]], epsilon = 1e-12);
}

#[test]
fn test_integer_matmul() {
    // [[1, 2], [3, 4]] * [[5, 6], [7, 8]]
    let a = Matrix::from_vec(vec![1i32, 3, 2, 4], [2, 2]).unwrap();
    let b = Matrix::from_vec(vec![5i32, 7, 6, 8], [2, 2]).unwrap();
    let c = (&a * &b).eval().unwrap();
    assert_eq!(c.data(), &[19, 43, 22, 50]);
}

#[test]
fn test_mixed_type_matmul_promotes() {
    let a = Matrix::from_vec(vec![1i32, 3, 2, 4], [2, 2]).unwrap();
    let b = Matrix::from_vec(vec![0.5f64, 0.0, 0.0, 0.5], [2, 2]).unwrap();
    let c: Matrix<f64> = (&a * &b).try_into().unwrap();
    assert_eq!(c.data(), &[0.5, 1.5, 1.0, 2.0]);
}

#[test]
fn test_static_shapes() {
    let a = StaticMatrix::<f64, 2, 3>::iota(StaticMatrixShape::<2, 3>);
    let b = StaticMatrix::<f64, 3, 4>::ones(StaticMatrixShape::<3, 4>);
    let c: StaticMatrix<f64, 2, 4> = (&a * &b).eval().unwrap();
    // column-major iota: row 0 is [0, 2, 4], row 1 is [1, 3, 5]
    assert_eq!(c[[0, 0]], 6.0);
    assert_eq!(c[[1, 3]], 9.0);

    let v = StaticVector::<f64, 3>::ones(StaticVectorShape::<3>);
    let y: StaticVector<f64, 2> = (&a * &v).eval().unwrap();
    assert_eq!(y.data(), &[6.0, 9.0]);
}

#[test]
fn test_chained_products() {
    let a = row_major_iota(2, 3);
    let b = row_major_iota(3, 4);
    let v = Vector::<f64>::ones(4);

    let y = ((&a * &b) * &v).eval().unwrap();
    let ab = (&a * &b).eval().unwrap();
    assert_eq!(y.size(), 2);
    for i in 0..2 {
        let expected: f64 = (0..4).map(|j| ab[[i, j]]).sum();
        assert_relative_eq!(y[[i]], expected);
    }
}

#[test]
fn test_integer_matmul_overflow() {
    // [MAX, MAX] * [2, 2]^T
    let a = Matrix::from_vec(vec![i32::MAX, i32::MAX], [1, 2]).unwrap();
    let b = Matrix::from_vec(vec![2i32, 2], [2, 1]).unwrap();
    assert_eq!(
        (&a * &b).eval().unwrap_err(),
        TensorError::Overflow { op: "mul" }
    );

    let v = Vector::from_vec(vec![2i32, 2], 2).unwrap();
    assert!(matches!(
        (&a * &v).eval(),
        Err(TensorError::Overflow { .. })
    ));
}

#[test]
fn test_float_scalar_truncates_on_integer_tensor() {
    let t = Vector::from_vec(vec![3i32, 8], 2).unwrap();
    // the scalar takes the tensor's element type: 0.5 becomes 0
    assert_eq!((&t * 0.5f64).eval().unwrap().data(), &[0, 0]);
    assert_eq!((2.9f64 * &t).eval().unwrap().data(), &[6, 16]);
    assert_eq!(
        (&t / 0.5f64).eval().unwrap_err(),
        TensorError::DivisionByZero
    );

    let f: Vector<f64> = (&t.cast::<f64>() * 0.5f64).try_into().unwrap();
    assert_eq!(f.data(), &[1.5, 4.0]);
}
