//! Backend selection
//!
//! A [`Dispatcher`] binds one [`Backend`] to its kernel at construction and
//! never re-evaluates the choice. The process-wide instance is resolved the
//! first time it is needed, from an installed [`DispatchConfig`] or the
//! environment, and is read-only from then on.

use std::fmt;

use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::backend::{Backend, CompressBlocksFn};
use crate::capabilities::Capabilities;
use crate::config::DispatchConfig;
use crate::error::{HashError, Result};
use crate::{BLOCK_SIZE, IV};

static GLOBAL: OnceCell<Dispatcher> = OnceCell::new();

/// A compression backend bound to its kernel
#[derive(Clone, Copy)]
pub struct Dispatcher {
    backend: Backend,
    capabilities: Capabilities,
    kernel: CompressBlocksFn,
}

impl Dispatcher {
    /// Select a backend according to `config`
    ///
    /// # Errors
    ///
    /// Returns [`HashError::UnsupportedBackend`] if the configuration forces a
    /// backend its capabilities do not allow.
    pub fn new(config: &DispatchConfig) -> Result<Self> {
        let backend = match config.backend {
            Some(forced) if forced.is_supported(&config.capabilities) => forced,
            Some(forced) => {
                return Err(HashError::UnsupportedBackend {
                    backend: forced.as_str(),
                });
            }
            None => Backend::select(&config.capabilities),
        };
        debug!(
            backend = backend.as_str(),
            capabilities = ?config.capabilities,
            "Selected SHA-256 compression backend"
        );
        Ok(Self::bind(backend, config.capabilities))
    }

    /// Pin a specific backend, bypassing capability checks
    ///
    /// The dispatcher reports only the capabilities `backend` needs.
    #[must_use]
    pub fn for_backend(backend: Backend) -> Self {
        Self::bind(backend, backend.required_capabilities())
    }

    fn bind(backend: Backend, capabilities: Capabilities) -> Self {
        Self {
            backend,
            capabilities,
            kernel: backend.compress_blocks_fn(),
        }
    }

    /// Process-wide dispatcher, resolved once
    pub fn global() -> &'static Dispatcher {
        GLOBAL.get_or_init(|| resolve(&DispatchConfig::from_env()))
    }

    /// Backend this dispatcher runs
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Capability flags the backend was selected from
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Compress whole blocks into `state`
    ///
    /// `blocks.len()` must be a multiple of [`BLOCK_SIZE`]; the engine upholds
    /// this internally. Use [`Dispatcher::try_compress`] for untrusted input.
    #[inline]
    pub(crate) fn compress(&self, state: &mut [u32; 8], blocks: &[u8]) {
        debug_assert_eq!(blocks.len() % BLOCK_SIZE, 0);
        if !blocks.is_empty() {
            (self.kernel)(state, blocks);
        }
    }

    /// Compress whole blocks into `state`, checking the length contract
    ///
    /// # Errors
    ///
    /// Returns [`HashError::PartialBlock`] if `blocks` is not a multiple of
    /// [`BLOCK_SIZE`]; `state` is left untouched in that case.
    pub fn try_compress(&self, state: &mut [u32; 8], blocks: &[u8]) -> Result<()> {
        if blocks.len() % BLOCK_SIZE != 0 {
            return Err(HashError::PartialBlock {
                block_size: BLOCK_SIZE,
                actual: blocks.len(),
            });
        }
        self.compress(state, blocks);
        Ok(())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("backend", &self.backend)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

/// Resolve the process-wide dispatcher from `config`
///
/// Must run before any digest uses the global dispatcher.
///
/// # Errors
///
/// Returns [`HashError::AlreadyResolved`] if the global dispatcher already
/// exists, or the error from [`Dispatcher::new`] if `config` is invalid.
pub fn install(config: &DispatchConfig) -> Result<&'static Dispatcher> {
    let dispatcher = Dispatcher::new(config)?;
    GLOBAL
        .set(dispatcher)
        .map_err(|_| HashError::AlreadyResolved)?;
    info!(
        backend = dispatcher.backend.as_str(),
        "SHA-256 dispatch installed"
    );
    Ok(Dispatcher::global())
}

fn resolve(config: &DispatchConfig) -> Dispatcher {
    let dispatcher = Dispatcher::new(config).unwrap_or_else(|e| {
        warn!(error = %e, "Falling back to priority-order backend selection");
        Dispatcher::bind(Backend::select(&config.capabilities), config.capabilities)
    });
    info!(
        backend = dispatcher.backend.as_str(),
        "SHA-256 dispatch resolved"
    );
    dispatcher
}

/// Result of running one backend over a message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendResult {
    /// Backend that produced the digest
    pub backend: Backend,
    /// Digest of the message
    pub digest: [u8; 32],
}

/// Digest `data` with every backend
#[must_use]
pub fn run_all_backends(data: &[u8]) -> Vec<BackendResult> {
    Backend::ALL
        .into_iter()
        .map(|backend| {
            let mut engine = crate::Sha256::with_dispatcher(Dispatcher::for_backend(backend));
            engine.write(data);
            BackendResult {
                backend,
                digest: engine.finalize(),
            }
        })
        .collect()
}

/// Check that every backend agrees on the digest of `data`
///
/// # Errors
///
/// Returns [`HashError::InvariantViolation`] naming the first backend that
/// disagrees with the generic kernel.
pub fn verify_backends(data: &[u8]) -> Result<()> {
    let results = run_all_backends(data);
    let reference = results
        .iter()
        .find(|r| r.backend == Backend::Generic)
        .ok_or_else(|| HashError::internal("generic backend missing from the backend list"))?;
    match results.iter().find(|r| r.digest != reference.digest) {
        Some(mismatch) => Err(HashError::internal(format!(
            "backend {} disagrees with generic on a {}-byte message",
            mismatch.backend,
            data.len()
        ))),
        None => Ok(()),
    }
}

/// State after compressing `blocks` from the IV with `backend`
#[must_use]
pub fn state_after(backend: Backend, blocks: &[u8]) -> Option<[u32; 8]> {
    let mut state = IV;
    Dispatcher::for_backend(backend)
        .try_compress(&mut state, blocks)
        .ok()
        .map(|()| state)
}
