//! One-shot helpers

use crate::digest::{state_to_bytes, Sha256};
use crate::dispatch::Dispatcher;
use crate::error::{HashError, Result};
use crate::{BLOCK_SIZE, IV, SIZE};

/// SHA-256 of `data`
#[must_use]
pub fn sum256(data: &[u8]) -> [u8; SIZE] {
    let mut engine = Sha256::new();
    engine.write(data);
    engine.finalize()
}

/// SHA-256 of a 32-byte value in a single compression
///
/// Always starts from the IV; this hashes a standalone 32-byte message, such
/// as a previous digest, and cannot continue a partial hash.
#[must_use]
pub fn sum256_of_32_bytes(data: &[u8; 32]) -> [u8; SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    block[..32].copy_from_slice(data);
    block[32] = 0x80;
    // 256-bit message length
    block[62] = 0x01;

    let mut state = IV;
    Dispatcher::global().compress(&mut state, &block);
    state_to_bytes(&state)
}

/// Slice form of [`sum256_of_32_bytes`]
///
/// # Errors
///
/// Returns [`HashError::InvalidInputLength`] unless `data` is exactly 32
/// bytes long.
pub fn try_sum256_of_32_bytes(data: &[u8]) -> Result<[u8; SIZE]> {
    let input: &[u8; 32] = data
        .try_into()
        .map_err(|_| HashError::InvalidInputLength {
            expected: 32,
            actual: data.len(),
        })?;
    Ok(sum256_of_32_bytes(input))
}

/// Compress whole blocks into `state` with the process-wide backend
///
/// # Errors
///
/// Returns [`HashError::PartialBlock`] if `blocks` is not a multiple of
/// [`BLOCK_SIZE`] bytes.
pub fn compress(state: &mut [u32; 8], blocks: &[u8]) -> Result<()> {
    Dispatcher::global().try_compress(state, blocks)
}
