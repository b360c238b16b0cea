// ============================================================================
// Transformation Interface
// Defines the contract for value transformations applied to quantities
// ============================================================================

use crate::math::DecimalMath;
use crate::numeric::{Decimal, NumericResult};

/// A value transformation, applied independently to a quantity's amount and
/// bounds by `Quantity::transform`.
///
/// The transformation should be monotonic and differentiable, otherwise the
/// re-rounding after the transform is meaningless. This is not checked.
///
/// Any `Fn(&Decimal) -> NumericResult<Decimal>` is a transformation, so extra
/// parameters are captured by the closure:
///
/// ```
/// use precise_quantity::prelude::*;
///
/// let math = DecimalMath::default();
/// let factor = Decimal::parse("+2.54")?;
/// let inches_to_cm = |x: &Decimal| math.product(x, &factor);
///
/// let length = Quantity::new_exact(Decimal::parse("+10")?, "in")?;
/// let converted = length.transform("cm", &inches_to_cm, &math)?;
/// assert_eq!(converted.amount().value(), "+25.40");
/// # Ok::<(), precise_quantity::numeric::NumericError>(())
/// ```
pub trait Transformation {
    /// Transform a single value
    fn apply(&self, value: &Decimal) -> NumericResult<Decimal>;
}

impl<F> Transformation for F
where
    F: Fn(&Decimal) -> NumericResult<Decimal>,
{
    #[inline]
    fn apply(&self, value: &Decimal) -> NumericResult<Decimal> {
        self(value)
    }
}

/// Multiply by a constant factor (unit conversion).
#[derive(Clone)]
pub struct ScaleBy {
    factor: Decimal,
    math: DecimalMath,
}

impl ScaleBy {
    /// Create a scaling transformation computing with `math`.
    pub fn new(factor: Decimal, math: &DecimalMath) -> Self {
        Self {
            factor,
            math: math.clone(),
        }
    }

    /// The conversion factor
    pub fn factor(&self) -> &Decimal {
        &self.factor
    }
}

impl Transformation for ScaleBy {
    fn apply(&self, value: &Decimal) -> NumericResult<Decimal> {
        self.math.product(value, &self.factor)
    }
}

/// Multiply by a power of ten by moving the decimal point (SI prefixes).
#[derive(Clone)]
pub struct ShiftBy {
    exponent: i32,
    math: DecimalMath,
}

impl ShiftBy {
    /// Create a shifting transformation; positive exponents scale up.
    pub fn new(exponent: i32, math: &DecimalMath) -> Self {
        Self {
            exponent,
            math: math.clone(),
        }
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }
}

impl Transformation for ShiftBy {
    fn apply(&self, value: &Decimal) -> NumericResult<Decimal> {
        self.math.shift(value, self.exponent)
    }
}
