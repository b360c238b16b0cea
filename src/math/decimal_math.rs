// ============================================================================
// Decimal Math
// Arithmetic, rounding, bumping and shifting of canonical decimals
// ============================================================================

use super::config::MathConfig;
use super::digits;
use crate::backend::{create_backend, create_exact_backend};
use crate::interfaces::ArithmeticBackend;
use crate::numeric::{Decimal, NumericError, NumericResult, MAX_LENGTH};
use std::fmt;
use std::sync::Arc;

/// Decimal arithmetic with a backend selected once at construction.
///
/// `sum`, `product`, `min` and `max` go through the injected
/// [`ArithmeticBackend`]. Rounding, bump/slump and shifting are digit-level
/// algorithms and behave the same for every backend.
///
/// Cloning is cheap; the backend is shared.
///
/// # Example
/// ```
/// use precise_quantity::math::DecimalMath;
/// use precise_quantity::numeric::Decimal;
///
/// let math = DecimalMath::default();
/// let half = Decimal::parse("+0.5")?;
/// assert_eq!(math.sum(&half, &half)?.value(), "+1.0");
/// assert_eq!(math.round_to_digit(&Decimal::parse("+1.45")?, 3)?.value(), "+1.5");
/// # Ok::<(), precise_quantity::numeric::NumericError>(())
/// ```
#[derive(Clone)]
pub struct DecimalMath {
    backend: Arc<dyn ArithmeticBackend>,
}

#[inline]
fn signed(sign: char, magnitude: &str) -> NumericResult<Decimal> {
    Decimal::parse(&format!("{sign}{magnitude}"))
}

impl DecimalMath {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create with an explicit backend.
    pub fn new(backend: Arc<dyn ArithmeticBackend>) -> Self {
        Self { backend }
    }

    /// Create from configuration.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the configuration does not validate.
    pub fn from_config(config: &MathConfig) -> NumericResult<Self> {
        config.validate()?;
        tracing::debug!(backend = %config.backend, "Building DecimalMath from config");
        Ok(Self::new(create_backend(config.backend)))
    }

    /// Exact arithmetic.
    pub fn exact() -> Self {
        Self::new(create_exact_backend())
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Whether the backend produces exact results
    pub fn is_exact(&self) -> bool {
        self.backend.is_exact()
    }

    // ========================================================================
    // Backend Arithmetic
    // ========================================================================

    /// `a + b` at the larger of the two scales.
    pub fn sum(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        self.backend.sum(a, b)
    }

    /// `a * b` at the sum of the two scales, rounded to fit if needed.
    pub fn product(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        self.backend.product(a, b)
    }

    /// The smaller operand; ties return `a`.
    pub fn min(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        self.backend.min(a, b)
    }

    /// The larger operand; ties return `a`.
    pub fn max(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        self.backend.max(a, b)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Keep `significant_digits` characters, counting the decimal point but
    /// not the sign, rounding half away from zero.
    ///
    /// - `0` gives `+0`
    /// - `+99` at 1 gives `+100`, `+1.45` at 3 gives `+1.5`
    /// - values with fewer characters are returned as they are, except that a
    ///   value with a decimal point is padded with fractional zeros
    ///
    /// # Errors
    /// `TooLong` if carrying or padding pushes the encoding over the limit.
    pub fn round_to_digit(
        &self,
        value: &Decimal,
        significant_digits: usize,
    ) -> NumericResult<Decimal> {
        if significant_digits >= MAX_LENGTH && !value.fractional_part().is_empty() {
            return Err(NumericError::TooLong(significant_digits.saturating_add(1)));
        }
        signed(
            value.sign(),
            &digits::round(value.magnitude(), significant_digits),
        )
    }

    /// Round so that the last kept digit is the one for `10^exponent`.
    ///
    /// `+123` at exponent 1 gives `+120`; `+1.45` at exponent -1 gives `+1.5`.
    pub fn round_to_exponent(&self, value: &Decimal, exponent: i32) -> NumericResult<Decimal> {
        let position = self.position_for_exponent(exponent, value);
        self.round_to_digit(value, position)
    }

    /// Character count (point included, sign excluded) that keeps digits down
    /// to `10^exponent` in `value`.
    pub fn position_for_exponent(&self, exponent: i32, value: &Decimal) -> usize {
        digits::position_for_exponent(value.magnitude(), exponent)
    }

    // ========================================================================
    // Unit in the Last Place
    // ========================================================================

    /// Increase by one unit in the last place.
    ///
    /// `+0` gives `+1`, `+9.9` gives `+10.0`, `-0.01` gives `+0.00`.
    pub fn bump(&self, value: &Decimal) -> NumericResult<Decimal> {
        let magnitude = value.magnitude();
        if value.is_negative() {
            signed('-', &digits::decrement(magnitude))
        } else {
            signed('+', &digits::increment(magnitude))
        }
    }

    /// Decrease by one unit in the last place.
    ///
    /// `+0` gives `-1`, `+0.00` gives `-0.01`, `+10` gives `+9`.
    pub fn slump(&self, value: &Decimal) -> NumericResult<Decimal> {
        let magnitude = value.magnitude();
        if value.is_negative() || value.is_zero() {
            signed('-', &digits::increment(magnitude))
        } else {
            signed('+', &digits::decrement(magnitude))
        }
    }

    // ========================================================================
    // Shifting
    // ========================================================================

    /// Multiply by `10^exponent` by moving the decimal point.
    ///
    /// `+1.234` shifted by 2 is `+123.4`; shifted by -2 it is `+0.01234`.
    pub fn shift(&self, value: &Decimal, exponent: i32) -> NumericResult<Decimal> {
        if exponent == 0 {
            return Ok(value.clone());
        }

        let steps = exponent.unsigned_abs() as usize;
        if steps > 2 * MAX_LENGTH {
            // far right shifts of zero collapse to "0"; everything else overflows
            if exponent > 0 && value.is_zero() {
                return Ok(Decimal::zero());
            }
            return Err(NumericError::TooLong(value.value().len() + steps));
        }

        signed(value.sign(), &digits::shift(value.magnitude(), exponent))
    }
}

impl Default for DecimalMath {
    fn default() -> Self {
        Self::exact()
    }
}

impl fmt::Debug for DecimalMath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecimalMath")
            .field("backend", &self.backend.name())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
