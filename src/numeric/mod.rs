// ============================================================================
// Numeric Module
// Canonical arbitrary-precision decimals
// ============================================================================
//
// This module provides:
// - Decimal: immutable decimal value stored as its canonical string encoding
// - NumericError / ErrorKind: error types shared by the whole crate
//
// Design principles:
// - The canonical encoding is the value; equality is structural over it
// - Construction validates, everything after construction is infallible
//   or returns Result (no panics)
// - Floats only cross the boundary explicitly (from_float / to_float)

mod decimal;
mod errors;

pub use decimal::{Decimal, MAX_LENGTH};
pub use errors::{ErrorKind, NumericError, NumericResult};
