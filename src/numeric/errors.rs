// ============================================================================
// Numeric Errors
// Error types for canonical decimal construction and arithmetic
// ============================================================================

use std::fmt;

/// Coarse classification of a [`NumericError`].
///
/// Callers that only care about *why* something failed (bad input, bad call,
/// broken invariant) can match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input does not denote a valid decimal (grammar, NaN/Infinity, length)
    MalformedValue,
    /// Structurally wrong call (empty unit, unsupported configuration)
    InvalidArgument,
    /// A value-level invariant would be broken (bound ordering)
    InvariantViolation,
}

/// Errors that can occur when building or computing with decimals and quantities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Input string does not match the canonical decimal grammar
    InvalidInput(String),
    /// Encoded result would be longer than the maximum encoding length
    TooLong(usize),
    /// Floating-point input was NaN or infinite
    NotFinite,
    /// Conversion to a fixed-width decimal would lose significant digits
    PrecisionLoss,
    /// Structurally invalid argument
    InvalidArgument(&'static str),
    /// Bounds do not enclose the amount
    BoundsViolation {
        amount: String,
        lower: String,
        upper: String,
    },
}

impl NumericError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NumericError::InvalidInput(_)
            | NumericError::TooLong(_)
            | NumericError::NotFinite
            | NumericError::PrecisionLoss => ErrorKind::MalformedValue,
            NumericError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            NumericError::BoundsViolation { .. } => ErrorKind::InvariantViolation,
        }
    }
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidInput(value) => {
                write!(f, "invalid input: {value:?} is not a canonical decimal")
            },
            NumericError::TooLong(len) => write!(
                f,
                "value too long: {len} characters exceeds the 127 character limit"
            ),
            NumericError::NotFinite => write!(f, "invalid number: NaN or infinite value"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            NumericError::BoundsViolation {
                amount,
                lower,
                upper,
            } => write!(
                f,
                "illegal value: bounds [{lower}, {upper}] do not enclose amount {amount}"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
