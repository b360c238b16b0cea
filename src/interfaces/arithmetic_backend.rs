// ============================================================================
// Arithmetic Backend Interface
// Defines the contract for pluggable decimal arithmetic strategies
// ============================================================================

use crate::numeric::{Decimal, NumericResult};

/// Strategy pattern interface for decimal arithmetic.
///
/// Implementations: `ExactBackend` (string-digit arithmetic, authoritative)
/// and `FloatBackend` (f64 fallback).
///
/// A backend is chosen once when a `DecimalMath` is built and shared behind an
/// `Arc`, so all implementations must be `Send + Sync`.
pub trait ArithmeticBackend: Send + Sync {
    /// `a + b`, with as many fractional digits as the more precise operand.
    fn sum(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal>;

    /// `a * b`, with as many fractional digits as both operands together.
    ///
    /// Results that would not fit the encoding limit are rounded until they do.
    fn product(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal>;

    /// The smaller of `a` and `b`. Ties return `a`.
    fn min(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal>;

    /// The larger of `a` and `b`. Ties return `a`.
    fn max(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal>;

    /// Get the backend name for logging
    fn name(&self) -> &'static str;

    /// Whether results are exact. Float backends return false.
    fn is_exact(&self) -> bool {
        true
    }
}
