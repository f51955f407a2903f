//! Storage types for tensor data.
//!
//! Storage is always a flat buffer; shape and transposition live in the
//! value node that owns it.

mod dense;

pub use dense::Dense;
