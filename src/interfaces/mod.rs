// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod arithmetic_backend;
mod transformation;

pub use arithmetic_backend::ArithmeticBackend;
pub use transformation::{ScaleBy, ShiftBy, Transformation};
