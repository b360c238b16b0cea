// ============================================================================
// Precise Quantity Library
// Arbitrary-precision canonical decimals and uncertainty-bearing quantities
// ============================================================================

//! # Precise Quantity
//!
//! Exact decimal arithmetic over a canonical string encoding, and quantities
//! with uncertainty bounds built on top of it.
//!
//! ## Features
//!
//! - **Canonical decimals**: `[+-]digits[.digits]`, at most 127 characters,
//!   trailing fractional zeros significant, zero always `+`
//! - **Pluggable arithmetic backends** (exact string-digit, f64 fallback)
//! - **Digit-level rounding**, unit-in-last-place bump/slump, point shifting
//! - **Quantities** with optional bounds, uncertainty margin and order of
//!   uncertainty, and re-rounding monotonic transformations
//! - **Serde support** (default `serde` feature)
//!
//! ## Example
//!
//! ```rust
//! use precise_quantity::prelude::*;
//!
//! let math = DecimalMath::from_config(&MathConfig::exact())?;
//!
//! let half = Decimal::parse("+0.5")?;
//! assert_eq!(math.sum(&half, &half)?.value(), "+1.0");
//! assert_eq!(math.bump(&Decimal::parse("+9.9")?)?.value(), "+10.0");
//!
//! // 10 ± 1 cubed, re-rounded to its uncertainty
//! let length = Quantity::from_number_strs("10", "m", Some("11"), Some("9"))?;
//! let cube = |x: &Decimal| math.product(&math.product(x, x)?, x);
//! let volume = length.transform("m^3", &cube, &math)?;
//!
//! assert_eq!(volume.amount().value(), "+1000");
//! assert_eq!(volume.upper_bound().map(Decimal::value), Some("+1300"));
//! assert_eq!(volume.lower_bound().map(Decimal::value), Some("+700"));
//! # Ok::<(), NumericError>(())
//! ```

pub mod backend;
pub mod interfaces;
pub mod math;
pub mod numeric;
pub mod quantity;

// Re-exports for convenience
pub mod prelude {
    pub use crate::backend::{create_backend, BackendKind};
    pub use crate::interfaces::{ArithmeticBackend, ScaleBy, ShiftBy, Transformation};
    pub use crate::math::{DecimalMath, MathConfig};
    pub use crate::numeric::{Decimal, ErrorKind, NumericError, NumericResult};
    pub use crate::quantity::{Bounds, Quantity};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::numeric::MAX_LENGTH;
    use std::cmp::Ordering;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    #[test]
    fn test_end_to_end_unit_conversion() {
        let math = DecimalMath::from_config(&MathConfig::exact()).unwrap();

        // 12.0 ± 0.5 in, converted to cm then to mm
        let length = Quantity::from_number_strs("12.0", "in", Some("12.5"), Some("11.5")).unwrap();
        let to_cm = ScaleBy::new(dec("+2.54"), &math);
        let cm = length.transform("cm", &to_cm, &math).unwrap();

        // 30.480, 31.750, 29.210; distance 1.27 gives exponent 0
        assert_eq!(cm.amount().value(), "+30");
        assert_eq!(cm.upper_bound().unwrap().value(), "+32");
        assert_eq!(cm.lower_bound().unwrap().value(), "+29");

        let mm = cm.transform("mm", &ShiftBy::new(1, &math), &math).unwrap();
        assert_eq!(mm.amount().value(), "+300");
        assert_eq!(mm.unit(), "mm");
        assert!(mm.is_bounded());

        let margin = mm.uncertainty_margin(&math).unwrap().unwrap();
        assert_eq!(margin, dec("+20"));
    }

    #[test]
    fn test_backend_selection_is_fixed_at_construction() {
        let exact = DecimalMath::default();
        let float = DecimalMath::from_config(&MathConfig::float_fallback()).unwrap();

        let a = dec("+0.1");
        let b = dec("+0.2");
        assert_eq!(exact.sum(&a, &b).unwrap(), dec("+0.3"));
        // f64 can't represent 0.1 + 0.2 exactly
        assert_eq!(float.sum(&a, &b).unwrap(), dec("+0.30000000000000004"));

        // digit operations don't depend on the backend
        assert_eq!(
            exact.round_to_digit(&dec("+1.45"), 3).unwrap(),
            float.round_to_digit(&dec("+1.45"), 3).unwrap()
        );
    }

    #[test]
    fn test_custom_backend_injection() {
        struct SaturatingBackend;

        impl ArithmeticBackend for SaturatingBackend {
            fn sum(&self, _: &Decimal, _: &Decimal) -> NumericResult<Decimal> {
                Ok(Decimal::from(i64::MAX))
            }
            fn product(&self, _: &Decimal, _: &Decimal) -> NumericResult<Decimal> {
                Ok(Decimal::from(i64::MAX))
            }
            fn min(&self, a: &Decimal, _: &Decimal) -> NumericResult<Decimal> {
                Ok(a.clone())
            }
            fn max(&self, a: &Decimal, _: &Decimal) -> NumericResult<Decimal> {
                Ok(a.clone())
            }
            fn name(&self) -> &'static str {
                "Saturating"
            }
        }

        let math = DecimalMath::new(Arc::new(SaturatingBackend));
        assert_eq!(math.backend_name(), "Saturating");
        assert_eq!(
            math.sum(&dec("+1"), &dec("+1")).unwrap().value(),
            "+9223372036854775807"
        );
    }

    #[test]
    fn test_length_limit_across_operations() {
        let math = DecimalMath::default();
        let long = dec(&format!("+0.{}", "3".repeat(120)));

        // product rounds to fit instead of failing
        let squared = math.product(&long, &long).unwrap();
        assert!(squared.value().len() <= MAX_LENGTH);
        assert_eq!(squared.compare(&dec("+0.1")), Ordering::Greater);

        let huge = dec(&format!("+{}", "9".repeat(70)));
        let err = math.product(&huge, &huge).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedValue);

        assert!(Decimal::parse(&format!("+{}", "1".repeat(127))).is_err());
        assert!(Decimal::parse(&format!("+{}", "1".repeat(126))).is_ok());
    }

    #[test]
    fn test_rust_decimal_boundary() {
        let value = dec("-12.340");
        let converted = value.to_rust_decimal().unwrap();
        assert_eq!(converted.to_string(), "-12.340");
        assert_eq!(Decimal::from_rust_decimal(converted).unwrap(), value);
    }

    #[test]
    fn test_sorting_quantities() {
        let mut quantities = [
            Quantity::from_number_strs("2.5", "m", None, None).unwrap(),
            Quantity::from_number_strs("-1", "m", None, None).unwrap(),
            Quantity::from_number_strs("10", "m", None, None).unwrap(),
        ];
        quantities.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));

        let amounts: Vec<&str> = quantities.iter().map(|q| q.amount().value()).collect();
        assert_eq!(amounts, ["-1", "+2.5", "+10"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let q = Quantity::from_number_strs("-0.0", "1", Some("+0.5"), Some("-0.5")).unwrap();
        assert_eq!(q.amount().value(), "+0.0");

        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(
            json,
            r#"{"amount":"+0.0","unit":"1","upperBound":"+0.5","lowerBound":"-0.5"}"#
        );
        let back: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);

        let values: Vec<Decimal> = serde_json::from_str(r#"["+1.50", "-2", "0.001"]"#).unwrap();
        assert_eq!(values[2].value(), "+0.001");
    }
}
