// ============================================================================
// Quantity Serialization
// Dual-shape record: {amount, unit} or {amount, unit, upperBound, lowerBound}
// ============================================================================

use super::Quantity;
use crate::numeric::{Decimal, NumericError};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuantityRecordRef<'a> {
    amount: &'a Decimal,
    unit: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    upper_bound: Option<&'a Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lower_bound: Option<&'a Decimal>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuantityRecord {
    amount: Decimal,
    unit: String,
    #[serde(default)]
    upper_bound: Option<Decimal>,
    #[serde(default)]
    lower_bound: Option<Decimal>,
}

impl TryFrom<QuantityRecord> for Quantity {
    type Error = NumericError;

    fn try_from(record: QuantityRecord) -> Result<Self, Self::Error> {
        match (record.upper_bound, record.lower_bound) {
            (None, None) => Quantity::new_unbounded(record.amount, record.unit),
            (Some(upper), Some(lower)) => {
                Quantity::new_with_bounds(record.amount, record.unit, upper, lower)
            },
            _ => Err(NumericError::InvalidArgument(
                "quantity record must carry both bounds or neither",
            )),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        QuantityRecordRef {
            amount: self.amount(),
            unit: self.unit(),
            upper_bound: self.upper_bound(),
            lower_bound: self.lower_bound(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = QuantityRecord::deserialize(deserializer)?;
        Quantity::try_from(record).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_unbounded() {
        let q = Quantity::new_unbounded(Decimal::parse("+1.50").unwrap(), "m").unwrap();
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"{"amount":"+1.50","unit":"m"}"#);
    }

    #[test]
    fn test_serialize_bounded() {
        let q = Quantity::from_number_strs("10", "kg", Some("11"), Some("9")).unwrap();
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(
            json,
            r#"{"amount":"+10","unit":"kg","upperBound":"+11","lowerBound":"+9"}"#
        );
    }

    #[test]
    fn test_round_trip() {
        let quantities = [
            Quantity::new_unbounded(Decimal::parse("-0.001").unwrap(), "1").unwrap(),
            Quantity::new_exact(Decimal::parse("+2.50").unwrap(), "s").unwrap(),
            Quantity::from_number_strs("10", "kg", Some("11.5"), Some("9")).unwrap(),
        ];
        for q in quantities {
            let json = serde_json::to_string(&q).unwrap();
            let back: Quantity = serde_json::from_str(&json).unwrap();
            assert_eq!(back, q);
        }
    }

    #[test]
    fn test_deserialize_shapes() {
        let unbounded: Quantity = serde_json::from_str(r#"{"amount":"5","unit":"m"}"#).unwrap();
        assert!(!unbounded.is_bounded());
        assert_eq!(unbounded.amount().value(), "+5");

        let bounded: Quantity = serde_json::from_str(
            r#"{"amount":"+5","unit":"m","upperBound":"+6","lowerBound":"+4"}"#,
        )
        .unwrap();
        assert!(bounded.is_bounded());
        assert_eq!(bounded.uncertainty(), Some(2.0));
    }

    #[test]
    fn test_deserialize_rejects_invalid_records() {
        let one_bound = r#"{"amount":"+5","unit":"m","upperBound":"+6"}"#;
        assert!(serde_json::from_str::<Quantity>(one_bound).is_err());

        let violated = r#"{"amount":"+5","unit":"m","upperBound":"+4","lowerBound":"+3"}"#;
        let err = serde_json::from_str::<Quantity>(violated).unwrap_err();
        assert!(err.to_string().contains("do not enclose"));

        let empty_unit = r#"{"amount":"+5","unit":""}"#;
        assert!(serde_json::from_str::<Quantity>(empty_unit).is_err());

        let malformed = r#"{"amount":"5.","unit":"m"}"#;
        assert!(serde_json::from_str::<Quantity>(malformed).is_err());

        let missing_unit = r#"{"amount":"+5"}"#;
        assert!(serde_json::from_str::<Quantity>(missing_unit).is_err());
    }
}
