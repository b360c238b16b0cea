// ============================================================================
// Quantity Domain Model
// Amount + unit, with optional uncertainty bounds
// ============================================================================

use crate::interfaces::Transformation;
use crate::math::DecimalMath;
use crate::numeric::{Decimal, NumericError, NumericResult};
use std::cmp::Ordering;

/// Compensates for floating point error in `log10` near exact powers of ten.
const UNCERTAINTY_EPSILON: f64 = 5e-10;

/// Upper and lower bound of a quantity's uncertainty interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bounds {
    upper: Decimal,
    lower: Decimal,
}

impl Bounds {
    pub fn upper(&self) -> &Decimal {
        &self.upper
    }

    pub fn lower(&self) -> &Decimal {
        &self.lower
    }
}

/// A measured amount in some unit, optionally with an uncertainty interval.
///
/// Bounded quantities always satisfy `lower <= amount <= upper`; constructors
/// reject anything else instead of clamping. The unit is an opaque non-empty
/// identifier, `"1"` by convention for unitless values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity {
    amount: Decimal,
    unit: String,
    bounds: Option<Bounds>,
}

fn validated_unit(unit: impl Into<String>) -> NumericResult<String> {
    let unit = unit.into();
    if unit.is_empty() {
        return Err(NumericError::InvalidArgument("unit must not be empty"));
    }
    Ok(unit)
}

impl Quantity {
    // ========================================================================
    // Construction
    // ========================================================================

    /// A quantity without uncertainty information.
    pub fn new_unbounded(amount: Decimal, unit: impl Into<String>) -> NumericResult<Self> {
        Ok(Self {
            amount,
            unit: validated_unit(unit)?,
            bounds: None,
        })
    }

    /// A quantity whose bounds both equal the amount.
    pub fn new_exact(amount: Decimal, unit: impl Into<String>) -> NumericResult<Self> {
        let bounds = Bounds {
            upper: amount.clone(),
            lower: amount.clone(),
        };
        Ok(Self {
            amount,
            unit: validated_unit(unit)?,
            bounds: Some(bounds),
        })
    }

    /// A quantity with an explicit uncertainty interval.
    ///
    /// # Errors
    /// - `InvalidArgument` if `unit` is empty
    /// - `BoundsViolation` unless `lower <= amount <= upper`
    pub fn new_with_bounds(
        amount: Decimal,
        unit: impl Into<String>,
        upper: Decimal,
        lower: Decimal,
    ) -> NumericResult<Self> {
        let unit = validated_unit(unit)?;
        let bounds = enclosing_bounds(&amount, upper, lower)?;
        Ok(Self {
            amount,
            unit,
            bounds: Some(bounds),
        })
    }

    /// Build a bounded quantity from decimal strings.
    ///
    /// A missing bound defaults to the amount, so passing no bounds gives an
    /// exact quantity.
    ///
    /// ```
    /// use precise_quantity::quantity::Quantity;
    ///
    /// let q = Quantity::from_number_strs("1.5", "m", Some("1.6"), None)?;
    /// assert_eq!(q.upper_bound().map(|d| d.value()), Some("+1.6"));
    /// assert_eq!(q.lower_bound().map(|d| d.value()), Some("+1.5"));
    /// # Ok::<(), precise_quantity::numeric::NumericError>(())
    /// ```
    pub fn from_number_strs(
        amount: &str,
        unit: impl Into<String>,
        upper: Option<&str>,
        lower: Option<&str>,
    ) -> NumericResult<Self> {
        let amount = Decimal::parse(amount)?;
        let upper = upper.map_or_else(|| Ok(amount.clone()), Decimal::parse)?;
        let lower = lower.map_or_else(|| Ok(amount.clone()), Decimal::parse)?;
        Self::new_with_bounds(amount, unit, upper, lower)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn amount(&self) -> &Decimal {
        &self.amount
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn upper_bound(&self) -> Option<&Decimal> {
        self.bounds.as_ref().map(Bounds::upper)
    }

    pub fn lower_bound(&self) -> Option<&Decimal> {
        self.bounds.as_ref().map(Bounds::lower)
    }

    /// Whether the quantity carries an uncertainty interval
    pub fn is_bounded(&self) -> bool {
        self.bounds.is_some()
    }

    /// Whether both bounds are numerically equal to the amount
    pub fn is_exact(&self) -> bool {
        self.bounds.as_ref().is_some_and(|b| {
            b.upper.compare(&self.amount) == Ordering::Equal
                && b.lower.compare(&self.amount) == Ordering::Equal
        })
    }

    /// Approximate numeric key for sorting and display heuristics.
    pub fn sort_key(&self) -> f64 {
        self.amount.to_float()
    }

    // ========================================================================
    // Uncertainty
    // ========================================================================

    /// Width of the uncertainty interval (`upper - lower`), approximated in
    /// `f64`. `None` for unbounded quantities.
    pub fn uncertainty(&self) -> Option<f64> {
        self.bounds
            .as_ref()
            .map(|b| b.upper.to_float() - b.lower.to_float())
    }

    /// Symmetric `±` margin: the larger of `amount - lower` and
    /// `upper - amount`, computed exactly.
    pub fn uncertainty_margin(&self, math: &DecimalMath) -> NumericResult<Option<Decimal>> {
        let Some(bounds) = &self.bounds else {
            return Ok(None);
        };
        let below = math.sum(&self.amount, &bounds.lower.compute_complement())?;
        let above = math.sum(&bounds.upper, &self.amount.compute_complement())?;
        Ok(Some(math.max(&below, &above)?))
    }

    /// Decimal exponent of the least significant reliable digit.
    ///
    /// Derived from the smaller distance between the amount and a bound. An
    /// exact quantity treats all of its existing digits as significant, so
    /// `+1.50` gives `-2`. `None` for unbounded quantities.
    pub fn order_of_uncertainty(&self) -> Option<i32> {
        self.bounds
            .as_ref()
            .map(|bounds| order_of_uncertainty(&self.amount, bounds))
    }

    // ========================================================================
    // Transformation
    // ========================================================================

    /// Apply a monotonically increasing transformation and re-round.
    ///
    /// The amount and both bounds are transformed independently, then all
    /// three are rounded to the order of uncertainty of the transformed
    /// interval. Unbounded quantities only transform the amount and are not
    /// rounded.
    ///
    /// # Errors
    /// - `InvalidArgument` if `new_unit` is empty
    /// - `BoundsViolation` if the transformation is not increasing
    /// - whatever the transformation or the rounding reports
    pub fn transform<T>(
        &self,
        new_unit: impl Into<String>,
        transformation: &T,
        math: &DecimalMath,
    ) -> NumericResult<Self>
    where
        T: Transformation + ?Sized,
    {
        let unit = validated_unit(new_unit)?;
        let amount = transformation.apply(&self.amount)?;

        let Some(bounds) = &self.bounds else {
            return Ok(Self {
                amount,
                unit,
                bounds: None,
            });
        };

        let upper = transformation.apply(&bounds.upper)?;
        let lower = transformation.apply(&bounds.lower)?;
        let bounds = enclosing_bounds(&amount, upper, lower)?;

        let exponent = order_of_uncertainty(&amount, &bounds);
        tracing::trace!(
            unit = %unit,
            exponent,
            "Rounding transformed quantity to its order of uncertainty"
        );

        let round = |value: &Decimal| math.round_to_exponent(value, exponent);
        Self::new_with_bounds(
            round(&amount)?,
            unit,
            round(&bounds.upper)?,
            round(&bounds.lower)?,
        )
    }
}

fn enclosing_bounds(amount: &Decimal, upper: Decimal, lower: Decimal) -> NumericResult<Bounds> {
    if lower.compare(amount) == Ordering::Greater || upper.compare(amount) == Ordering::Less {
        return Err(NumericError::BoundsViolation {
            amount: amount.to_string(),
            lower: lower.to_string(),
            upper: upper.to_string(),
        });
    }
    Ok(Bounds { upper, lower })
}

fn order_of_uncertainty(amount: &Decimal, bounds: &Bounds) -> i32 {
    let value = amount.to_float();
    let distance = (value - bounds.lower.to_float()).min(bounds.upper.to_float() - value);

    if distance == 0.0 {
        return -(amount.fractional_part().len() as i32);
    }
    (distance + UNCERTAINTY_EPSILON).log10().floor() as i32
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{ScaleBy, ShiftBy};
    use crate::numeric::ErrorKind;

    fn dec(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    fn bounded(amount: &str, upper: &str, lower: &str) -> Quantity {
        Quantity::new_with_bounds(dec(amount), "m", dec(upper), dec(lower)).unwrap()
    }

    #[test]
    fn test_unbounded_creation() {
        let q = Quantity::new_unbounded(dec("+1.5"), "m").unwrap();
        assert_eq!(q.amount(), &dec("+1.5"));
        assert_eq!(q.unit(), "m");
        assert!(!q.is_bounded());
        assert!(!q.is_exact());
        assert_eq!(q.bounds(), None);
        assert_eq!(q.upper_bound(), None);
        assert_eq!(q.uncertainty(), None);
        assert_eq!(q.order_of_uncertainty(), None);
        assert_eq!(q.uncertainty_margin(&DecimalMath::default()).unwrap(), None);
    }

    #[test]
    fn test_exact_creation() {
        let q = Quantity::new_exact(dec("+1.50"), "1").unwrap();
        assert!(q.is_bounded());
        assert!(q.is_exact());
        assert_eq!(q.upper_bound(), Some(&dec("+1.50")));
        assert_eq!(q.lower_bound(), Some(&dec("+1.50")));
        assert_eq!(q.uncertainty(), Some(0.0));
        assert_eq!(q.order_of_uncertainty(), Some(-2));
    }

    #[test]
    fn test_bounded_creation() {
        let q = bounded("+10", "+11", "+9");
        assert!(q.is_bounded());
        assert!(!q.is_exact());
        let bounds = q.bounds().unwrap();
        assert_eq!(bounds.upper(), &dec("+11"));
        assert_eq!(bounds.lower(), &dec("+9"));
        assert_eq!(q.sort_key(), 10.0);
    }

    #[test]
    fn test_bound_violation() {
        let err = Quantity::new_with_bounds(dec("+10"), "m", dec("+11"), dec("+10.5"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(
            err,
            NumericError::BoundsViolation {
                amount: "+10".to_string(),
                lower: "+10.5".to_string(),
                upper: "+11".to_string(),
            }
        );

        let err = Quantity::new_with_bounds(dec("+10"), "m", dec("+9.99"), dec("+9"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);

        // equal at a different scale is still enclosed
        assert!(Quantity::new_with_bounds(dec("+10"), "m", dec("+10.00"), dec("+10.0")).is_ok());
    }

    #[test]
    fn test_empty_unit_rejected() {
        for result in [
            Quantity::new_unbounded(dec("+1"), ""),
            Quantity::new_exact(dec("+1"), ""),
            Quantity::new_with_bounds(dec("+1"), "", dec("+2"), dec("+0")),
        ] {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_from_number_strs() {
        let exact = Quantity::from_number_strs("2.50", "kg", None, None).unwrap();
        assert!(exact.is_exact());
        assert_eq!(exact.amount().value(), "+2.50");

        let q = Quantity::from_number_strs("-1", "K", Some("+0.5"), Some("-2")).unwrap();
        assert_eq!(q.upper_bound(), Some(&dec("+0.5")));
        assert_eq!(q.lower_bound(), Some(&dec("-2")));

        let malformed = Quantity::from_number_strs("01", "K", None, None).unwrap_err();
        assert_eq!(malformed.kind(), ErrorKind::MalformedValue);

        let violated = Quantity::from_number_strs("1", "K", Some("0.5"), None).unwrap_err();
        assert_eq!(violated.kind(), ErrorKind::InvariantViolation);
    }

    #[test]
    fn test_uncertainty() {
        let q = bounded("+10", "+11", "+9");
        assert_eq!(q.uncertainty(), Some(2.0));
    }

    #[test]
    fn test_uncertainty_margin() {
        let math = DecimalMath::default();
        assert_eq!(
            bounded("+10", "+12", "+9").uncertainty_margin(&math).unwrap(),
            Some(dec("+2"))
        );
        assert_eq!(
            bounded("+1.5", "+1.6", "+1.25").uncertainty_margin(&math).unwrap(),
            Some(dec("+0.25"))
        );
        assert_eq!(
            bounded("-3", "-2.5", "-3.5").uncertainty_margin(&math).unwrap(),
            Some(dec("+0.5"))
        );
    }

    #[test]
    fn test_order_of_uncertainty() {
        assert_eq!(bounded("+10", "+11", "+9").order_of_uncertainty(), Some(0));
        assert_eq!(bounded("+1000", "+1331", "+729").order_of_uncertainty(), Some(2));
        assert_eq!(bounded("+1.5", "+1.6", "+1.45").order_of_uncertainty(), Some(-2));
        assert_eq!(bounded("+100", "+200", "+0").order_of_uncertainty(), Some(2));
        // one-sided: the smaller distance is zero
        assert_eq!(bounded("+7.25", "+8", "+7.25").order_of_uncertainty(), Some(-2));
        assert_eq!(bounded("+7", "+8", "+7").order_of_uncertainty(), Some(0));
    }

    #[test]
    fn test_transform_cube() {
        let math = DecimalMath::default();
        let cube = |x: &Decimal| math.product(&math.product(x, x)?, x);

        let q = bounded("+10", "+11", "+9");
        let cubed = q.transform("m^3", &cube, &math).unwrap();

        assert_eq!(cubed.unit(), "m^3");
        assert_eq!(cubed.amount().value(), "+1000");
        assert_eq!(cubed.upper_bound().unwrap().value(), "+1300");
        assert_eq!(cubed.lower_bound().unwrap().value(), "+700");

        // the source is untouched
        assert_eq!(q.upper_bound(), Some(&dec("+11")));
    }

    #[test]
    fn test_transform_scale_rounds_to_uncertainty() {
        let math = DecimalMath::default();
        let double = ScaleBy::new(dec("+2"), &math);

        let q = bounded("+1.50", "+1.60", "+1.45");
        let doubled = q.transform("m", &double, &math).unwrap();

        assert_eq!(doubled.amount().value(), "+3.0");
        assert_eq!(doubled.upper_bound().unwrap().value(), "+3.2");
        assert_eq!(doubled.lower_bound().unwrap().value(), "+2.9");
    }

    #[test]
    fn test_transform_exact_keeps_digits() {
        let math = DecimalMath::default();
        let to_cm = ScaleBy::new(dec("+2.54"), &math);

        let q = Quantity::new_exact(dec("+10"), "in").unwrap();
        let converted = q.transform("cm", &to_cm, &math).unwrap();

        assert!(converted.is_exact());
        assert_eq!(converted.amount().value(), "+25.40");
    }

    #[test]
    fn test_transform_unbounded_skips_rounding() {
        let math = DecimalMath::default();
        let centi = ShiftBy::new(2, &math);

        let q = Quantity::new_unbounded(dec("+1.2345"), "m").unwrap();
        let shifted = q.transform("cm", &centi, &math).unwrap();

        assert_eq!(shifted.amount().value(), "+123.45");
        assert_eq!(shifted.unit(), "cm");
        assert!(!shifted.is_bounded());
    }

    #[test]
    fn test_transform_errors() {
        let math = DecimalMath::default();
        let q = bounded("+10", "+11", "+9");

        let identity = |x: &Decimal| -> NumericResult<Decimal> { Ok(x.clone()) };
        let err = q.transform("", &identity, &math).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let negate = |x: &Decimal| -> NumericResult<Decimal> { Ok(x.compute_complement()) };
        let err = q.transform("m", &negate, &math).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);

        let failing = |_: &Decimal| Decimal::parse("not a number");
        let err = q.transform("m", &failing, &math).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedValue);
    }

    #[test]
    fn test_transform_with_trait_object() {
        let math = DecimalMath::default();
        let strategies: Vec<Box<dyn Transformation>> = vec![
            Box::new(ShiftBy::new(3, &math)),
            Box::new(ScaleBy::new(dec("+0.001"), &math)),
        ];

        let q = Quantity::new_unbounded(dec("+4"), "g").unwrap();
        let kilo = q.transform("mg", strategies[0].as_ref(), &math).unwrap();
        let back = kilo.transform("g", strategies[1].as_ref(), &math).unwrap();

        assert_eq!(kilo.amount().value(), "+4000");
        assert_eq!(back.amount().value(), "+4.000");
    }

    #[test]
    fn test_quantity_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Quantity>();
        assert_send_sync::<DecimalMath>();
    }
}
