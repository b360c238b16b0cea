// ============================================================================
// Digit Algorithms
// Carry/borrow, rounding and point shifting on unsigned digit strings
// ============================================================================
//
// Everything here works on a *magnitude*: the canonical encoding without its
// sign, e.g. "123.450". Inputs are assumed canonical; outputs may be longer
// than the encoding limit and are validated when turned back into a Decimal.

use smallvec::SmallVec;

/// Working buffer for digit manipulation; spills to the heap for long values.
pub(crate) type DigitBuf = SmallVec<[u8; 128]>;

#[inline]
pub(crate) fn into_string(digits: &[u8]) -> String {
    digits.iter().map(|&b| char::from(b)).collect()
}

/// Index of the decimal point, or the length if there is none.
#[inline]
pub(crate) fn point_position(magnitude: &str) -> usize {
    magnitude.find('.').unwrap_or(magnitude.len())
}

/// Drop leading zeros of the integer part, keeping at least one digit.
pub(crate) fn strip_leading_zeros(digits: &mut DigitBuf) {
    let int_len = digits
        .iter()
        .position(|&b| b == b'.')
        .unwrap_or(digits.len());
    let zeros = digits[..int_len].iter().take_while(|&&b| b == b'0').count();
    let excess = zeros.min(int_len.saturating_sub(1));
    if excess > 0 {
        digits.drain(..excess);
    }
}

/// Add one unit in the last place. `"9.9"` becomes `"10.0"`.
pub(crate) fn increment(magnitude: &str) -> String {
    let mut digits: DigitBuf = magnitude.bytes().collect();
    for d in digits.iter_mut().rev() {
        match *d {
            b'.' => continue,
            b'9' => *d = b'0',
            _ => {
                *d += 1;
                return into_string(&digits);
            },
        }
    }
    digits.insert(0, b'1');
    into_string(&digits)
}

/// Subtract one unit in the last place. `"10.0"` becomes `"9.9"`.
///
/// The magnitude must not be zero.
pub(crate) fn decrement(magnitude: &str) -> String {
    let mut digits: DigitBuf = magnitude.bytes().collect();
    for d in digits.iter_mut().rev() {
        match *d {
            b'.' => continue,
            b'0' => *d = b'9',
            _ => {
                *d -= 1;
                break;
            },
        }
    }
    strip_leading_zeros(&mut digits);
    into_string(&digits)
}

/// Keep `significant` characters of `magnitude` (decimal point included),
/// rounding half away from zero.
///
/// Integer digits past the cut become zeros, fractional digits past the cut
/// are dropped. When the value already has a decimal point and asks for more
/// characters than it has, the fraction is padded with zeros.
pub(crate) fn round(magnitude: &str, significant: usize) -> String {
    if significant == 0 {
        return String::from("0");
    }

    let len = magnitude.len();
    let point = point_position(magnitude);

    if significant >= len {
        let mut padded = String::from(magnitude);
        if point < len {
            padded.extend(std::iter::repeat('0').take(significant - len));
        }
        return padded;
    }

    let (kept, rest) = magnitude.split_at(significant);
    let next_digit = rest.bytes().find(u8::is_ascii_digit).unwrap_or(b'0');
    let kept = kept.strip_suffix('.').unwrap_or(kept);

    let mut rounded = if next_digit >= b'5' {
        increment(kept)
    } else {
        String::from(kept)
    };

    if significant < point {
        rounded.extend(std::iter::repeat('0').take(point - significant));
    }
    rounded
}

/// Number of characters (point included) needed to keep digits down to
/// `10^exponent`.
pub(crate) fn position_for_exponent(magnitude: &str, exponent: i32) -> usize {
    let point = point_position(magnitude);
    let steps = exponent.unsigned_abs() as usize;
    if exponent < 0 {
        point + 1 + steps
    } else {
        point.saturating_sub(steps)
    }
}

/// Move the decimal point `exponent` places to the right (positive) or to the
/// left (negative), padding with zeros.
pub(crate) fn shift(magnitude: &str, exponent: i32) -> String {
    if exponent == 0 {
        return String::from(magnitude);
    }

    let point = point_position(magnitude);
    let int_part = &magnitude[..point];
    let frac_part = magnitude.get(point + 1..).unwrap_or("");
    let steps = exponent.unsigned_abs() as usize;

    let mut int_digits: DigitBuf = SmallVec::new();
    let mut frac_digits: DigitBuf = SmallVec::new();

    if exponent > 0 {
        int_digits.extend_from_slice(int_part.as_bytes());
        if steps < frac_part.len() {
            int_digits.extend_from_slice(&frac_part.as_bytes()[..steps]);
            frac_digits.extend_from_slice(&frac_part.as_bytes()[steps..]);
        } else {
            int_digits.extend_from_slice(frac_part.as_bytes());
            int_digits.extend(std::iter::repeat(b'0').take(steps - frac_part.len()));
        }
        strip_leading_zeros(&mut int_digits);
    } else if steps < int_part.len() {
        let split = int_part.len() - steps;
        int_digits.extend_from_slice(&int_part.as_bytes()[..split]);
        frac_digits.extend_from_slice(&int_part.as_bytes()[split..]);
        frac_digits.extend_from_slice(frac_part.as_bytes());
    } else {
        int_digits.push(b'0');
        frac_digits.extend(std::iter::repeat(b'0').take(steps - int_part.len()));
        frac_digits.extend_from_slice(int_part.as_bytes());
        frac_digits.extend_from_slice(frac_part.as_bytes());
    }

    if !frac_digits.is_empty() {
        int_digits.push(b'.');
        int_digits.extend_from_slice(&frac_digits);
    }
    into_string(&int_digits)
}
