// ============================================================================
// Math Module
// DecimalMath facade, its configuration, and digit-string algorithms
// ============================================================================

mod config;
mod decimal_math;
pub(crate) mod digits;

pub use config::MathConfig;
pub use decimal_math::DecimalMath;
