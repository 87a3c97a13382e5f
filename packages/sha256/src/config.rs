//! Dispatch configuration
//!
//! Resolved at most once per process by [`crate::dispatch::Dispatcher::global`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::backend::Backend;
use crate::capabilities::Capabilities;
use crate::error::Result;

/// Environment variable forcing a backend by name
pub const BACKEND_ENV: &str = "SHA256_SIMD_BACKEND";

/// Environment variable overriding the capability flags
pub const CAPS_ENV: &str = "SHA256_SIMD_CAPS";

/// Inputs to backend selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Capability flags, defaulting to the compile-time target features
    #[serde(default = "default_capabilities")]
    pub capabilities: Capabilities,
    /// Backend to use instead of the priority order
    #[serde(default)]
    pub backend: Option<Backend>,
}

fn default_capabilities() -> Capabilities {
    Capabilities::from_target_features()
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            capabilities: default_capabilities(),
            backend: None,
        }
    }
}

impl DispatchConfig {
    /// Configuration with explicit capabilities and priority-order selection
    #[must_use]
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            backend: None,
        }
    }

    /// Force `backend` regardless of priority order
    #[must_use]
    pub fn force_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Build a configuration from optional override strings
    ///
    /// # Errors
    ///
    /// Returns an error if either value does not parse.
    pub fn from_overrides(caps: Option<&str>, backend: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(list) = caps {
            config.capabilities = Capabilities::parse_list(list)?;
        }
        if let Some(name) = backend.map(str::trim).filter(|n| !n.is_empty()) {
            config.backend = Some(name.parse()?);
        }
        Ok(config)
    }

    /// Read [`CAPS_ENV`] and [`BACKEND_ENV`], falling back to defaults
    ///
    /// Invalid values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let caps = std::env::var(CAPS_ENV).ok();
        let backend = std::env::var(BACKEND_ENV).ok();
        match Self::from_overrides(caps.as_deref(), backend.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Ignoring invalid SHA-256 dispatch environment");
                Self::default()
            }
        }
    }
}
