//! Interchangeable SHA-256 compression backends
//!
//! Every backend implements the same contract: given the running state and a
//! run of whole 64-byte blocks, compress the blocks in order, each one chained
//! on the output of the previous. An empty run leaves the state untouched.
//! Backends differ only in how they execute, never in what they compute.

mod generic;
mod hardware;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capabilities::Capabilities;
use crate::error::HashError;

/// Block compression function shared by all backends
///
/// The slice length is always a multiple of [`crate::BLOCK_SIZE`].
pub type CompressBlocksFn = fn(&mut [u32; 8], &[u8]);

/// Compression backend identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Backend {
    /// x86 SHA extensions
    ShaNi = 0,
    /// ARMv8 SHA2 extensions
    ArmSha2 = 1,
    /// Portable reference kernel
    Generic = 2,
}

impl Backend {
    /// All backends, most specialized first
    pub const ALL: [Backend; 3] = [Backend::ShaNi, Backend::ArmSha2, Backend::Generic];

    /// Stable backend name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShaNi => "sha-ni",
            Self::ArmSha2 => "arm-sha2",
            Self::Generic => "generic",
        }
    }

    /// Whether `caps` allows this backend to run
    #[inline]
    #[must_use]
    pub const fn is_supported(self, caps: &Capabilities) -> bool {
        match self {
            Self::ShaNi => caps.sha_ni,
            Self::ArmSha2 => caps.arm_sha2,
            Self::Generic => true,
        }
    }

    /// Capability flags this backend needs
    #[must_use]
    pub const fn required_capabilities(self) -> Capabilities {
        match self {
            Self::ShaNi => Capabilities {
                sha_ni: true,
                arm_sha2: false,
            },
            Self::ArmSha2 => Capabilities {
                sha_ni: false,
                arm_sha2: true,
            },
            Self::Generic => Capabilities::NONE,
        }
    }

    /// Whether this backend depends on a hardware capability
    #[inline]
    #[must_use]
    pub const fn is_accelerated(self) -> bool {
        !matches!(self, Self::Generic)
    }

    /// First backend in priority order that `caps` supports
    #[must_use]
    pub fn select(caps: &Capabilities) -> Backend {
        Self::ALL
            .into_iter()
            .find(|backend| backend.is_supported(caps))
            .unwrap_or(Backend::Generic)
    }

    /// Kernel implementing this backend
    #[must_use]
    pub(crate) fn compress_blocks_fn(self) -> CompressBlocksFn {
        match self {
            Self::ShaNi | Self::ArmSha2 => hardware::compress_blocks,
            Self::Generic => generic::compress_blocks,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = HashError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha-ni" | "sha_ni" | "shani" => Ok(Self::ShaNi),
            "arm-sha2" | "arm_sha2" | "armsha2" => Ok(Self::ArmSha2),
            "generic" | "portable" => Ok(Self::Generic),
            _ => Err(HashError::UnknownBackend(name.to_string())),
        }
    }
}
