//! Compute loops the function descriptors delegate to.
//!
//! - [`elementwise`]: per-element map and zip over tensor nodes
//! - [`gemm`]: dense matrix product (faer for floats, a plain loop otherwise)

pub(crate) mod elementwise;
pub mod gemm;

pub use gemm::MatrixView;
