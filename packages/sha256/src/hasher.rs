//! Streaming hasher facade
//!
//! Hosts with an accelerated capability flag get the dispatched engine.
//! Everywhere else the platform `sha2` hasher is used as-is.

use std::fmt;
use std::io;

use sha2::Digest as _;

use crate::backend::Backend;
use crate::digest::Sha256;
use crate::dispatch::Dispatcher;
use crate::{BLOCK_SIZE, SIZE};

/// Streaming SHA-256 hasher returned by [`crate::new`]
#[derive(Clone)]
pub enum Hasher {
    /// Engine running an accelerated backend
    Dispatched(Sha256),
    /// Platform fallback implementation
    Fallback(sha2::Sha256),
}

impl Hasher {
    /// Pick the engine for `dispatcher`
    ///
    /// Without any accelerated capability flag the platform hasher is used,
    /// even if a backend was forced.
    #[must_use]
    pub fn for_dispatcher(dispatcher: &Dispatcher) -> Self {
        if dispatcher.capabilities().any_accelerated() {
            Self::Dispatched(Sha256::with_dispatcher(*dispatcher))
        } else {
            Self::Fallback(sha2::Sha256::new())
        }
    }

    /// Restore the initial state
    pub fn reset(&mut self) {
        match self {
            Self::Dispatched(engine) => engine.reset(),
            Self::Fallback(hasher) => sha2::Digest::reset(hasher),
        }
    }

    /// Absorb `data`, returning the number of bytes consumed
    pub fn write(&mut self, data: &[u8]) -> usize {
        match self {
            Self::Dispatched(engine) => engine.write(data),
            Self::Fallback(hasher) => {
                hasher.update(data);
                data.len()
            }
        }
    }

    /// Append the digest so far to `prefix`, leaving the hasher usable
    #[must_use]
    pub fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        match self {
            Self::Dispatched(engine) => engine.sum(prefix),
            Self::Fallback(hasher) => {
                let mut out = Vec::with_capacity(prefix.len() + SIZE);
                out.extend_from_slice(prefix);
                out.extend_from_slice(&hasher.clone().finalize());
                out
            }
        }
    }

    /// Consume the hasher and return the digest
    #[must_use]
    pub fn finalize(self) -> [u8; SIZE] {
        match self {
            Self::Dispatched(engine) => engine.finalize(),
            Self::Fallback(hasher) => hasher.finalize().into(),
        }
    }

    /// Digest size in bytes
    #[must_use]
    pub const fn size(&self) -> usize {
        SIZE
    }

    /// Block size in bytes
    #[must_use]
    pub const fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Backend in use, `None` for the platform fallback
    #[must_use]
    pub fn backend(&self) -> Option<Backend> {
        match self {
            Self::Dispatched(engine) => Some(engine.backend()),
            Self::Fallback(_) => None,
        }
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::for_dispatcher(Dispatcher::global())
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatched(engine) => f.debug_tuple("Dispatched").field(engine).finish(),
            Self::Fallback(_) => f.write_str("Fallback"),
        }
    }
}

impl io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Hasher::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
