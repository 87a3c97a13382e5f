//! Hardware capability flags consumed by backend selection
//!
//! Flags are resolved once and never change afterwards. How they are
//! obtained is left to the caller: the default reflects the target features
//! the crate was compiled with, and configuration may override them.

use serde::{Deserialize, Serialize};

use crate::error::{HashError, Result};

/// Which accelerated compression backends the host can run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Capabilities {
    /// x86 SHA extensions (SHA-NI)
    pub sha_ni: bool,
    /// ARMv8 SHA2 crypto extensions
    pub arm_sha2: bool,
}

impl Capabilities {
    /// No accelerated backend available
    pub const NONE: Self = Self {
        sha_ni: false,
        arm_sha2: false,
    };

    /// Capabilities implied by compile-time target features
    #[must_use]
    pub const fn from_target_features() -> Self {
        Self {
            sha_ni: cfg!(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "sha"
            )),
            arm_sha2: cfg!(all(target_arch = "aarch64", target_feature = "sha2")),
        }
    }

    /// Parse a comma-separated flag list such as `"sha-ni,arm-sha2"`
    ///
    /// `"none"` and the empty string both yield [`Capabilities::NONE`].
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Configuration`] for an unrecognised flag.
    pub fn parse_list(list: &str) -> Result<Self> {
        let mut caps = Self::NONE;
        for flag in list.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            match flag.to_ascii_lowercase().as_str() {
                "sha-ni" | "sha_ni" | "shani" => caps.sha_ni = true,
                "arm-sha2" | "arm_sha2" | "armsha2" => caps.arm_sha2 = true,
                "none" => {}
                other => {
                    return Err(HashError::configuration(format!(
                        "unknown capability flag `{other}`"
                    )));
                }
            }
        }
        Ok(caps)
    }

    /// Whether any accelerated backend is usable
    #[must_use]
    pub const fn any_accelerated(&self) -> bool {
        self.sha_ni || self.arm_sha2
    }
}
