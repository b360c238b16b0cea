// ============================================================================
// Quantity Module
// Uncertainty-bearing quantities built on canonical decimals
// ============================================================================

#[allow(clippy::module_inception)]
mod quantity;

#[cfg(feature = "serde")]
mod record;

pub use quantity::{Bounds, Quantity};
