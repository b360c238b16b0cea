// ============================================================================
// Float Backend
// Fallback arithmetic through f64 (non-exact)
// ============================================================================

use super::fit_to_length;
use crate::interfaces::ArithmeticBackend;
use crate::numeric::{Decimal, NumericError, NumericResult, MAX_LENGTH};

/// Float fallback implementation.
///
/// Operands are projected onto `f64`, combined, and converted back with
/// [`Decimal::from_float`]. Expansions too long for the encoding (tiny
/// magnitudes) are rounded to fit the same way the exact backend rounds its
/// products. Results are only as precise as `f64` and lose the operands'
/// scale; use [`super::ExactBackend`] wherever exactness matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatBackend;

impl FloatBackend {
    /// Create a new float backend.
    pub fn new() -> Self {
        Self
    }
}

fn from_f64(value: f64) -> NumericResult<Decimal> {
    match Decimal::from_float(value) {
        Err(NumericError::TooLong(_)) => {
            let expansion = value.to_string();
            fit_to_length(value.is_sign_negative(), expansion.trim_start_matches('-'))
        },
        converted => converted,
    }
}

impl ArithmeticBackend for FloatBackend {
    fn sum(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        from_f64(a.to_float() + b.to_float())
    }

    fn product(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        let product = a.to_float() * b.to_float();
        let decimal = from_f64(product)?;

        // whole product of two fractional operands keeps a ".0"
        let fractional_operands =
            !a.fractional_part().is_empty() && !b.fractional_part().is_empty();
        let fits = decimal.value().len() + 2 <= MAX_LENGTH;
        if fractional_operands && fits && product.fract() == 0.0 {
            return Decimal::parse(&format!("{decimal}.0"));
        }
        Ok(decimal)
    }

    fn min(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        from_f64(a.to_float().min(b.to_float()))
    }

    fn max(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        from_f64(a.to_float().max(b.to_float()))
    }

    fn name(&self) -> &'static str {
        "Float"
    }

    fn is_exact(&self) -> bool {
        false
    }
}
