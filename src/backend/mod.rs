// ============================================================================
// Arithmetic Backends Module
// Implementations of the ArithmeticBackend strategy
//
// Available backends:
// - Exact: string-digit arbitrary-precision arithmetic (default, authoritative)
// - Float: f64 fallback
// ============================================================================

mod exact;
mod factory;
mod float;

pub use exact::ExactBackend;
pub use factory::{create_backend, create_exact_backend, create_float_backend, BackendKind};
pub use float::FloatBackend;

use crate::math::digits;
use crate::numeric::{Decimal, NumericError, NumericResult, MAX_LENGTH};

#[inline]
fn signed(negative: bool, magnitude: &str) -> String {
    format!("{}{magnitude}", if negative { '-' } else { '+' })
}

/// Build a decimal from a computed magnitude, rounding away fractional digits
/// until it fits. Fails only if the integer part alone is too long.
fn fit_to_length(negative: bool, magnitude: &str) -> NumericResult<Decimal> {
    let budget = MAX_LENGTH - 1;
    if magnitude.len() <= budget {
        return Decimal::parse(&signed(negative, magnitude));
    }

    let int_len = digits::point_position(magnitude);
    if int_len > budget {
        return Err(NumericError::TooLong(magnitude.len() + 1));
    }

    tracing::trace!(
        length = magnitude.len() + 1,
        "Rounding result to fit the encoding limit"
    );

    let mut significant = budget;
    loop {
        let rounded = digits::round(magnitude, significant);
        if rounded.len() <= budget {
            return Decimal::parse(&signed(negative, &rounded));
        }
        if significant <= int_len {
            return Err(NumericError::TooLong(rounded.len() + 1));
        }
        significant -= 1;
    }
}
