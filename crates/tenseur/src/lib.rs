//! tenseur - lazy tensor expressions
//!
//! Arithmetic on tensors and scalars builds an expression graph instead of
//! computing eagerly. Nothing runs until `eval()` is called; then each node
//! is computed once, bottom-up, and its output is cached on the node so
//! that every expression sharing it reuses the result.
//!
//! # Architecture
//!
//! ```text
//! Expressions (expr)       UnaryExpr / BinaryExpr, operators, sqrt/abs/pow/min/max
//!     -> Nodes (node)      UnaryNode / BinaryNode with a memoized output
//!     -> Descriptors       Sqrt, Abs, Pow, Min, Max, Elementwise(op), Mul
//!        (functional)      + output type/shape resolution
//!     -> Kernels           elementwise loops, dense matrix product (faer)
//! Values                   TensorNode / ScalarNode behind Tensor / ScalarValue
//! ```
//!
//! Operand kinds (scalar, vector, matrix) and element types are resolved
//! by the type checker: `vector * matrix` does not compile, while
//! `matrix * vector` produces a vector expression. Dimensions of
//! dynamically-shaped operands are checked at evaluation time.
//!
//! # Example
//!
//! ```
//! use tenseur::{Matrix, Vector};
//!
//! // Data is column-major: [[1, 2], [3, 4]]
//! let a = Matrix::from_vec(vec![1.0_f64, 3.0, 2.0, 4.0], [2, 2]).unwrap();
//! let x = Vector::from_vec(vec![1.0_f64, 1.0], 2).unwrap();
//!
//! let y = &a * &x;
//! assert_eq!(y.eval().unwrap().data(), &[3.0, 7.0]);
//!
//! let z = 2.0_f64 * &y - &x;
//! assert_eq!(z.eval().unwrap().data(), &[5.0, 13.0]);
//! ```

pub mod error;
pub mod expr;
pub mod functional;
pub mod kernels;
pub mod node;
#[cfg(feature = "random")]
pub mod random;
pub mod scalar;
pub mod shape;
pub mod storage;
pub mod strides;
pub mod tensor;

pub use error::TensorError;
pub use expr::{BinaryExpr, IntoNode, UnaryExpr, abs, max, min, pow, sqrt};
pub use functional::{
    Abs, BinaryFunction, BinaryOperation, Elementwise, Function, Max, Min, Mul, MulKernel,
    MulShape, Pow, Sqrt, UnaryFunction,
};
pub use node::{BinaryNode, Node, ScalarNode, TensorNode, UnaryNode, ValueNode};
#[cfg(feature = "random")]
pub use random::{RandomNormal, RandomUniform};
pub use scalar::{CastTo, Promote, Scalar};
pub use shape::{
    DynamicShape, MatrixShape, Shape, StaticMatrixShape, StaticShape, StaticVectorShape,
};
pub use storage::Dense;
pub use tensor::{
    DynamicTensor, Matrix, ScalarValue, StaticMatrix, StaticVector, Tensor, Vector,
};
