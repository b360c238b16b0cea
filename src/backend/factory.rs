// ============================================================================
// Backend Selection and Factory
// Construction-time selection of the arithmetic backend
// ============================================================================

use super::exact::ExactBackend;
use super::float::FloatBackend;
use crate::interfaces::ArithmeticBackend;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Available arithmetic backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackendKind {
    /// Arbitrary-precision string-digit arithmetic (authoritative)
    #[default]
    Exact,
    /// f64 fallback; loses precision and scale
    Float,
}

impl BackendKind {
    /// Whether this backend produces exact results.
    pub fn is_exact(self) -> bool {
        matches!(self, BackendKind::Exact)
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Exact => write!(f, "exact"),
            BackendKind::Float => write!(f, "float"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(BackendKind::Exact),
            "float" => Ok(BackendKind::Float),
            other => Err(format!("Unknown arithmetic backend: {other}")),
        }
    }
}

/// Create the backend for `kind`.
///
/// # Example
/// ```
/// use precise_quantity::backend::{create_backend, BackendKind};
///
/// let backend = create_backend(BackendKind::Exact);
/// assert_eq!(backend.name(), "Exact");
/// ```
pub fn create_backend(kind: BackendKind) -> Arc<dyn ArithmeticBackend> {
    let backend: Arc<dyn ArithmeticBackend> = match kind {
        BackendKind::Exact => Arc::new(ExactBackend::new()),
        BackendKind::Float => Arc::new(FloatBackend::new()),
    };
    tracing::debug!(backend = backend.name(), "Created arithmetic backend");
    backend
}

/// Create the exact backend.
pub fn create_exact_backend() -> Arc<dyn ArithmeticBackend> {
    create_backend(BackendKind::Exact)
}

/// Create the float fallback backend (for testing or comparison).
pub fn create_float_backend() -> Arc<dyn ArithmeticBackend> {
    create_backend(BackendKind::Float)
}
