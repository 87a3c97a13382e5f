//! SHA-256 over hardware-selected compression backends
//!
//! One compression backend is chosen per process from the configured
//! capability flags, most specialized first: `sha-ni`, then `arm-sha2`, then
//! the portable `generic` kernel. All backends produce bit-identical digests.
//!
//! # Streaming
//!
//! ```
//! use sha256_simd::Sha256;
//!
//! let mut state = Sha256::new();
//! state.write(b"some ");
//! state.write(b"data!");
//! let digest: [u8; 32] = state.finalize();
//! assert_eq!(digest, sha256_simd::sum256(b"some data!"));
//! ```
//!
//! # One-shot
//!
//! ```
//! let digest = sha256_simd::sum256(b"abc");
//! let rehashed = sha256_simd::sum256_of_32_bytes(&digest);
//! assert_eq!(rehashed, sha256_simd::sum256(&digest));
//! ```
//!
//! # Configuration
//!
//! The process-wide dispatcher reads `SHA256_SIMD_CAPS` and
//! `SHA256_SIMD_BACKEND` on first use unless [`install`] was called earlier.

#![forbid(unsafe_code)]

pub mod backend;
pub mod capabilities;
pub mod config;
pub mod digest;
pub mod dispatch;
pub mod error;
pub mod hasher;
pub mod oneshot;

// Re-export error types
pub use error::{HashError, Result};

pub use backend::Backend;
pub use capabilities::Capabilities;
pub use config::DispatchConfig;
pub use digest::{state_to_bytes, Sha256};
pub use dispatch::{install, Dispatcher};
pub use hasher::Hasher;
pub use oneshot::{compress, sum256, sum256_of_32_bytes, try_sum256_of_32_bytes};

/// Digest size in bytes
pub const SIZE: usize = 32;

/// Block size in bytes
pub const BLOCK_SIZE: usize = 64;

/// Initial hash value (FIPS 180-4, section 5.3.3)
pub const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// New streaming hasher
///
/// Uses the dispatched engine when an accelerated capability flag is set and the
/// platform `sha2` implementation otherwise.
#[must_use]
pub fn new() -> Hasher {
    Hasher::default()
}
