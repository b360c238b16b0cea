// ============================================================================
// Math Configuration
// Backend selection and validation for DecimalMath
// ============================================================================

use crate::backend::BackendKind;
use crate::numeric::{NumericError, NumericResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for building a [`super::DecimalMath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MathConfig {
    /// Which arithmetic backend computes sums, products, minima and maxima
    pub backend: BackendKind,

    /// Opt-in for backends that do not produce exact results.
    /// The float backend is rejected unless this is set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_inexact: bool,
}

impl MathConfig {
    /// Create a new configuration for `backend`
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            allow_inexact: !backend.is_exact(),
        }
    }

    /// Builder method: Select the backend
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Builder method: Allow or forbid inexact backends
    pub fn with_allow_inexact(mut self, allow: bool) -> Self {
        self.allow_inexact = allow;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> NumericResult<()> {
        if !self.backend.is_exact() && !self.allow_inexact {
            return Err(NumericError::InvalidArgument(
                "inexact backend selected without allow_inexact",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl MathConfig {
    /// Exact string-digit arithmetic (the default)
    pub fn exact() -> Self {
        Self::new(BackendKind::Exact)
    }

    /// f64 fallback arithmetic
    pub fn float_fallback() -> Self {
        Self::new(BackendKind::Float)
    }
}
