// hdkey-core/src/config.rs
//
// Engine configuration

use crate::error::{KeyError, KeyResult};
use serde::{Deserialize, Serialize};

/// Upper bound on HMAC re-rolls in the Weierstrass validity loops.
///
/// One re-roll happens with probability below 2^-127 per step, so this bound is
/// never reached by honest inputs; it only turns a theoretical hang into an error.
pub const DEFAULT_MAX_SCALAR_RETRIES: u32 = 256;

/// Tunables for [`DerivationEngine`](crate::crypto::DerivationEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of HMAC evaluations per master-key or child-key step
    /// before giving up with `RetryLimitExceeded`.
    pub max_scalar_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_scalar_retries: DEFAULT_MAX_SCALAR_RETRIES,
        }
    }
}

impl EngineConfig {
    #[inline]
    pub fn with_max_scalar_retries(mut self, max: u32) -> Self {
        self.max_scalar_retries = max;
        self
    }

    pub fn validate(&self) -> KeyResult<()> {
        if self.max_scalar_retries == 0 {
            return Err(KeyError::Validation(
                "max_scalar_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
