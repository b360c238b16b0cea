// ============================================================================
// Canonical Decimal
// Arbitrary-precision decimal stored as its canonical string encoding
// ============================================================================

use super::errors::{NumericError, NumericResult};
use arrayvec::ArrayString;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// Maximum length of a canonical encoding, sign included.
pub const MAX_LENGTH: usize = 127;

/// Arbitrary-precision decimal number in canonical string form.
///
/// The encoding is always `sign integer [. fraction]`:
/// - the sign (`+` or `-`) is always present, and zero is always `+`
/// - the integer part has no leading zeros except a single `0`
/// - the fraction, if present, is non-empty and its trailing zeros are
///   significant (`+1.50` carries one more digit of precision than `+1.5`)
/// - the whole encoding is at most [`MAX_LENGTH`] characters
///
/// Values are immutable. Every transformation returns a new `Decimal`.
///
/// Equality and hashing are structural: `+1.0 != +1`. Use [`Decimal::compare`]
/// for numeric comparison. `Ord` orders numerically and places numerically
/// equal values with fewer fractional digits first.
///
/// # Example
/// ```
/// use precise_quantity::numeric::Decimal;
///
/// let x: Decimal = "-0.0".parse()?;
/// assert_eq!(x.value(), "+0.0");
/// assert!(x.is_zero());
/// # Ok::<(), precise_quantity::numeric::NumericError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Decimal(ArrayString<MAX_LENGTH>);

// ============================================================================
// Grammar
// ============================================================================

/// Checks `value` against `^[+-](0|[1-9][0-9]*)(\.[0-9]+)?$`.
fn is_canonical(value: &str) -> bool {
    let bytes = value.as_bytes();
    let Some((&sign, digits)) = bytes.split_first() else {
        return false;
    };
    if sign != b'+' && sign != b'-' {
        return false;
    }

    let (int_part, frac_part) = match digits.iter().position(|&b| b == b'.') {
        Some(pos) => (&digits[..pos], Some(&digits[pos + 1..])),
        None => (digits, None),
    };

    if int_part.is_empty() || !int_part.iter().all(u8::is_ascii_digit) {
        return false;
    }
    if int_part.len() > 1 && int_part[0] == b'0' {
        return false;
    }

    match frac_part {
        Some(frac) => !frac.is_empty() && frac.iter().all(u8::is_ascii_digit),
        None => true,
    }
}

/// Re-sign a canonical encoding; the length does not change.
fn with_sign(encoded: &str, sign: char) -> ArrayString<MAX_LENGTH> {
    let mut out = ArrayString::new();
    out.push(sign);
    out.push_str(&encoded[1..]);
    out
}

impl Decimal {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Parse a decimal from its canonical string form.
    ///
    /// A missing sign is treated as `+`, and any zero is normalized to `+`.
    ///
    /// # Errors
    /// - `InvalidInput` if the string does not follow the canonical grammar
    ///   (empty, several signs, leading zeros, dangling decimal point, ...)
    /// - `TooLong` if the signed encoding exceeds [`MAX_LENGTH`] characters
    pub fn parse(value: &str) -> NumericResult<Self> {
        let signed: Cow<'_, str> = match value.as_bytes().first() {
            Some(b'+') | Some(b'-') => Cow::Borrowed(value),
            Some(_) => Cow::Owned(format!("+{value}")),
            None => return Err(NumericError::InvalidInput(String::new())),
        };

        if !is_canonical(&signed) {
            return Err(NumericError::InvalidInput(value.to_string()));
        }
        if signed.len() > MAX_LENGTH {
            return Err(NumericError::TooLong(signed.len()));
        }

        let encoded = ArrayString::from(signed.as_ref())
            .map_err(|_| NumericError::TooLong(signed.len()))?;

        // "-0", "-0.00" and friends
        if encoded.starts_with('-') && encoded[1..].bytes().all(|b| b == b'0' || b == b'.') {
            return Ok(Self(with_sign(&encoded, '+')));
        }

        Ok(Self(encoded))
    }

    /// Convert a float to a decimal.
    ///
    /// Uses the shortest decimal expansion that converts back to exactly the
    /// same `f64`, without scientific notation and without insignificant
    /// trailing zeros. `-0.0` becomes `+0`.
    ///
    /// The output can be shorter than a fixed 17-significant-digit expansion:
    /// `0.1` gives `+0.1`, not `+0.10000000000000001`. Both parse back to the
    /// same `f64`.
    ///
    /// # Errors
    /// - `NotFinite` for NaN and infinities
    /// - `TooLong` if the expansion does not fit (e.g. `1e300`)
    pub fn from_float(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::NotFinite);
        }
        Ok(Self::parse(&value.to_string())?.trimmed())
    }

    /// Convert from a `rust_decimal::Decimal`, keeping its scale.
    pub fn from_rust_decimal(value: rust_decimal::Decimal) -> NumericResult<Self> {
        Self::parse(&value.to_string())
    }

    fn from_integer_magnitude(negative: bool, magnitude: u64) -> Self {
        let mut encoded = ArrayString::new();
        encoded.push(if negative && magnitude != 0 { '-' } else { '+' });
        encoded.push_str(&magnitude.to_string());
        Self(encoded)
    }

    /// `+0`
    pub fn zero() -> Self {
        Self::from_integer_magnitude(false, 0)
    }

    /// `+1`
    pub fn one() -> Self {
        Self::from_integer_magnitude(false, 1)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The canonical string encoding, e.g. `+12.50`.
    #[inline]
    pub fn value(&self) -> &str {
        self.0.as_str()
    }

    /// Alias of [`Decimal::value`].
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// `+` or `-`.
    #[inline]
    pub fn sign(&self) -> char {
        if self.0.starts_with('-') {
            '-'
        } else {
            '+'
        }
    }

    #[inline]
    fn point_position(&self) -> Option<usize> {
        self.0.find('.')
    }

    /// Integer digits, without sign.
    pub fn integer_part(&self) -> &str {
        match self.point_position() {
            Some(pos) => &self.0[1..pos],
            None => &self.0[1..],
        }
    }

    /// Fractional digits, without the decimal point. Empty if there is none.
    pub fn fractional_part(&self) -> &str {
        match self.point_position() {
            Some(pos) => &self.0[pos + 1..],
            None => "",
        }
    }

    /// The digits without the sign, decimal point included.
    #[inline]
    pub(crate) fn magnitude(&self) -> &str {
        &self.0[1..]
    }

    /// True if every digit is zero.
    pub fn is_zero(&self) -> bool {
        self.magnitude().bytes().all(|b| b == b'0' || b == b'.')
    }

    /// True if the sign is `-` (zero never is).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign() == '-'
    }

    /// True if greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// The value with its sign flipped. Zero is its own complement.
    pub fn compute_complement(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let flipped = if self.is_negative() { '+' } else { '-' };
        Self(with_sign(&self.0, flipped))
    }

    /// The absolute value.
    pub fn compute_absolute(&self) -> Self {
        if self.is_negative() {
            self.compute_complement()
        } else {
            self.clone()
        }
    }

    /// The value without insignificant trailing zeros.
    ///
    /// `+1.500` becomes `+1.5`, `+2.00` becomes `+2`, `+100` stays `+100`.
    pub fn trimmed(&self) -> Self {
        let Some(pos) = self.point_position() else {
            return self.clone();
        };
        let trimmed = self.0.trim_end_matches('0');
        let end = if trimmed.len() == pos + 1 {
            pos
        } else {
            trimmed.len()
        };

        let mut encoded = self.0;
        encoded.truncate(end);
        Self(encoded)
    }

    /// Lossy projection onto `f64`.
    ///
    /// Only meant for heuristics such as uncertainty estimates and sort keys.
    pub fn to_float(&self) -> f64 {
        // canonical encodings are always valid float literals
        self.0.parse().unwrap_or(f64::NAN)
    }

    /// Convert to `rust_decimal::Decimal`, keeping the scale.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if the value has more than 28 fractional digits
    /// or does not fit into 96 bits.
    pub fn to_rust_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let unsigned = self.value().trim_start_matches('+');
        rust_decimal::Decimal::from_str_exact(unsigned)
            .map_err(|_| NumericError::PrecisionLoss)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Numeric comparison.
    ///
    /// Integer parts are compared by length first, which is valid because the
    /// canonical form has no leading zeros. Fractions are compared lexically
    /// after dropping trailing zeros, which is valid because they are
    /// left-aligned.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }

        match (self.is_negative(), other.is_negative()) {
            (false, true) => return Ordering::Greater,
            (true, false) => return Ordering::Less,
            _ => {},
        }

        let magnitude_order = {
            let (a_int, b_int) = (self.integer_part(), other.integer_part());
            a_int
                .len()
                .cmp(&b_int.len())
                .then_with(|| a_int.cmp(b_int))
                .then_with(|| {
                    let a_frac = self.fractional_part().trim_end_matches('0');
                    let b_frac = other.fractional_part().trim_end_matches('0');
                    a_frac.cmp(b_frac)
                })
        };

        if self.is_negative() {
            magnitude_order.reverse()
        } else {
            magnitude_order
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialOrd for Decimal {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).then_with(|| {
            self.fractional_part()
                .len()
                .cmp(&other.fractional_part().len())
        })
    }
}

impl Neg for Decimal {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.compute_complement()
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    #[inline]
    fn neg(self) -> Self::Output {
        self.compute_complement()
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_integer_magnitude(value < 0, value.unsigned_abs())
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::from_integer_magnitude(false, value)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl TryFrom<f64> for Decimal {
    type Error = NumericError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_float(value)
    }
}

impl TryFrom<&str> for Decimal {
    type Error = NumericError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<rust_decimal::Decimal> for Decimal {
    type Error = NumericError;

    fn try_from(value: rust_decimal::Decimal) -> Result<Self, Self::Error> {
        Self::from_rust_decimal(value)
    }
}

impl FromStr for Decimal {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Decimal {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self.0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Serialization (canonical string)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(DecimalVisitor)
    }
}

#[cfg(feature = "serde")]
struct DecimalVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a canonical decimal string such as \"+1.25\"")
    }

    fn visit_str<E>(self, s: &str) -> Result<Decimal, E>
    where
        E: serde::de::Error,
    {
        use serde::de::Unexpected;
        Decimal::parse(s).map_err(|_| E::invalid_value(Unexpected::Str(s), &self))
    }
}

// ============================================================================
// Tests
// ============================================================================
