//! Streaming SHA-256 digest engine
//!
//! Input is buffered up to one block; every completed block goes straight to
//! the dispatcher's backend, and whole-block runs in the caller's slice skip
//! the buffer entirely. Finalization pads through the same write path.

use std::fmt;
use std::io;

use tracing::error;

use crate::backend::Backend;
use crate::dispatch::Dispatcher;
use crate::error::{HashError, Result};
use crate::{BLOCK_SIZE, IV, SIZE};

/// Offset in the final block where the 64-bit length field starts
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Incremental SHA-256 hasher
///
/// Cloning yields a fully independent copy of the running state.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; BLOCK_SIZE],
    // always < BLOCK_SIZE between calls
    buffered: usize,
    total_len: u64,
    dispatcher: Dispatcher,
}

impl Sha256 {
    /// New hasher on the process-wide backend
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(*Dispatcher::global())
    }

    /// New hasher on an explicit backend
    #[must_use]
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            state: IV,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
            total_len: 0,
            dispatcher,
        }
    }

    /// Restore the initial state, keeping the backend
    pub fn reset(&mut self) {
        self.state = IV;
        self.buffered = 0;
        self.total_len = 0;
    }

    /// Absorb `data`, returning the number of bytes consumed
    ///
    /// Always consumes all of `data`.
    pub fn write(&mut self, mut data: &[u8]) -> usize {
        let written = data.len();
        self.total_len = self.total_len.wrapping_add(written as u64);

        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered == BLOCK_SIZE {
                self.dispatcher.compress(&mut self.state, &self.buffer);
                self.buffered = 0;
            }
        }

        let whole = data.len() - data.len() % BLOCK_SIZE;
        if whole > 0 {
            self.dispatcher.compress(&mut self.state, &data[..whole]);
            data = &data[whole..];
        }

        if !data.is_empty() {
            self.buffer[..data.len()].copy_from_slice(data);
            self.buffered = data.len();
        }

        written
    }

    /// Append the digest of everything written so far to `prefix`
    ///
    /// Works on a copy, so writing may continue afterwards.
    #[must_use]
    pub fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        let digest = self.clone().finalize();
        let mut out = Vec::with_capacity(prefix.len() + SIZE);
        out.extend_from_slice(prefix);
        out.extend_from_slice(&digest);
        out
    }

    /// Digest of everything written so far, without consuming the hasher
    #[must_use]
    pub fn summarize(&self) -> [u8; SIZE] {
        self.clone().finalize()
    }

    /// Pad, compress the remainder and serialize the digest
    ///
    /// # Panics
    ///
    /// Panics if padding leaves a partial block, which indicates a defect in
    /// this crate rather than bad input.
    #[must_use]
    pub fn finalize(self) -> [u8; SIZE] {
        match self.try_finalize() {
            Ok(digest) => digest,
            Err(e) => {
                error!(error = %e, "SHA-256 finalization failed");
                panic!("{e}");
            }
        }
    }

    /// Like [`Sha256::finalize`], reporting the invariant violation as an error
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvariantViolation`] if padding does not end on a
    /// block boundary.
    pub fn try_finalize(mut self) -> Result<[u8; SIZE]> {
        let len = self.total_len;

        // 0x80, then zeros up to the length field
        let mut pad = [0u8; BLOCK_SIZE];
        pad[0] = 0x80;
        let rem = (len % BLOCK_SIZE as u64) as usize;
        let pad_len = if rem < LENGTH_OFFSET {
            LENGTH_OFFSET - rem
        } else {
            BLOCK_SIZE + LENGTH_OFFSET - rem
        };
        self.write(&pad[..pad_len]);
        self.write(&len.wrapping_mul(8).to_be_bytes());

        if self.buffered != 0 {
            return Err(HashError::internal(format!(
                "{} bytes left buffered after padding",
                self.buffered
            )));
        }

        Ok(state_to_bytes(&self.state))
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

    /// Bytes currently held in the block buffer
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// Total bytes written since the last reset
    #[must_use]
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Backend compressing this hasher's blocks
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.dispatcher.backend()
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256")
            .field("backend", &self.backend())
            .field("buffered", &self.buffered)
            .field("total_len", &self.total_len)
            .finish_non_exhaustive()
    }
}

impl io::Write for Sha256 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Sha256::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Big-endian serialization of the hash words
///
/// Turns a state produced by [`crate::compress`] into digest bytes.
#[must_use]
pub fn state_to_bytes(state: &[u32; 8]) -> [u8; SIZE] {
    let mut out = [0u8; SIZE];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}
