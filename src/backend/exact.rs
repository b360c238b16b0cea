// ============================================================================
// Exact Backend
// Arbitrary-precision arithmetic on decimal digit strings
// ============================================================================

use super::{fit_to_length, signed};
use crate::interfaces::ArithmeticBackend;
use crate::math::digits::{self, DigitBuf};
use crate::numeric::{Decimal, NumericResult};
use std::cmp::Ordering;

/// Exact decimal arithmetic.
///
/// Operands are turned into a coefficient (all digits, point removed) and a
/// scale (number of fractional digits), combined digit by digit, and turned
/// back into a canonical encoding. This is the authoritative backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactBackend;

impl ExactBackend {
    /// Create a new exact backend.
    pub fn new() -> Self {
        Self
    }
}

/// Coefficient digits (ASCII) and scale of a decimal.
struct Scaled {
    negative: bool,
    digits: DigitBuf,
    scale: usize,
}

impl Scaled {
    fn of(value: &Decimal) -> Self {
        let mut digits = DigitBuf::new();
        digits.extend_from_slice(value.integer_part().as_bytes());
        digits.extend_from_slice(value.fractional_part().as_bytes());
        Self {
            negative: value.is_negative(),
            digits,
            scale: value.fractional_part().len(),
        }
    }

    /// Append zeros until the coefficient has `scale` fractional digits.
    fn rescale(mut self, scale: usize) -> Self {
        if scale > self.scale {
            self.digits
                .extend(std::iter::repeat(b'0').take(scale - self.scale));
            self.scale = scale;
        }
        self
    }
}

fn compare_magnitudes(a: &[u8], b: &[u8]) -> Ordering {
    let width = a.len().max(b.len());
    let padded = |d: &[u8]| {
        std::iter::repeat(b'0')
            .take(width - d.len())
            .chain(d.iter().copied())
            .collect::<DigitBuf>()
    };
    padded(a).cmp(&padded(b))
}

fn add_magnitudes(a: &[u8], b: &[u8]) -> DigitBuf {
    let mut out = DigitBuf::new();
    let mut carry = 0u8;
    let mut a_iter = a.iter().rev();
    let mut b_iter = b.iter().rev();
    loop {
        let (x, y) = (a_iter.next(), b_iter.next());
        if x.is_none() && y.is_none() {
            break;
        }
        let total = x.map_or(0, |d| d - b'0') + y.map_or(0, |d| d - b'0') + carry;
        out.push(b'0' + total % 10);
        carry = total / 10;
    }
    if carry > 0 {
        out.push(b'0' + carry);
    }
    out.reverse();
    out
}

/// `a - b` where `a >= b`.
fn sub_magnitudes(a: &[u8], b: &[u8]) -> DigitBuf {
    let mut out = DigitBuf::new();
    let mut borrow = 0i8;
    let mut b_iter = b.iter().rev();
    for &x in a.iter().rev() {
        let y = b_iter.next().map_or(0, |d| (d - b'0') as i8);
        let mut diff = (x - b'0') as i8 - y - borrow;
        borrow = if diff < 0 {
            diff += 10;
            1
        } else {
            0
        };
        out.push(b'0' + diff as u8);
    }
    out.reverse();
    out
}

fn mul_magnitudes(a: &[u8], b: &[u8]) -> DigitBuf {
    let mut acc = vec![0u32; a.len() + b.len()];
    for (i, &x) in a.iter().rev().enumerate() {
        for (j, &y) in b.iter().rev().enumerate() {
            acc[i + j] += u32::from(x - b'0') * u32::from(y - b'0');
        }
    }
    let mut carry = 0u32;
    for slot in acc.iter_mut() {
        let total = *slot + carry;
        *slot = total % 10;
        carry = total / 10;
    }
    // the buffer is wide enough that nothing is carried out
    acc.iter().rev().map(|&d| b'0' + d as u8).collect()
}

/// Render a coefficient with `scale` fractional digits as a magnitude string.
fn render_magnitude(coefficient: &[u8], scale: usize) -> String {
    let mut digits = DigitBuf::new();
    if coefficient.len() <= scale {
        digits.extend(std::iter::repeat(b'0').take(scale + 1 - coefficient.len()));
    }
    digits.extend_from_slice(coefficient);
    if scale > 0 {
        let point = digits.len() - scale;
        digits.insert(point, b'.');
    }
    digits::strip_leading_zeros(&mut digits);
    digits::into_string(&digits)
}

impl ArithmeticBackend for ExactBackend {
    fn sum(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        let scale = a.fractional_part().len().max(b.fractional_part().len());
        let a = Scaled::of(a).rescale(scale);
        let b = Scaled::of(b).rescale(scale);

        let (negative, coefficient) = if a.negative == b.negative {
            (a.negative, add_magnitudes(&a.digits, &b.digits))
        } else {
            match compare_magnitudes(&a.digits, &b.digits) {
                Ordering::Less => (b.negative, sub_magnitudes(&b.digits, &a.digits)),
                _ => (a.negative, sub_magnitudes(&a.digits, &b.digits)),
            }
        };

        Decimal::parse(&signed(negative, &render_magnitude(&coefficient, scale)))
    }

    fn product(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        let a = Scaled::of(a);
        let b = Scaled::of(b);
        let scale = a.scale + b.scale;
        let coefficient = mul_magnitudes(&a.digits, &b.digits);

        fit_to_length(
            a.negative != b.negative,
            &render_magnitude(&coefficient, scale),
        )
    }

    fn min(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        Ok(match a.compare(b) {
            Ordering::Greater => b.clone(),
            _ => a.clone(),
        })
    }

    fn max(&self, a: &Decimal, b: &Decimal) -> NumericResult<Decimal> {
        Ok(match a.compare(b) {
            Ordering::Less => b.clone(),
            _ => a.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "Exact"
    }
}
