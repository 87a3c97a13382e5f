//! Accelerated kernels
//!
//! The intrinsics live in `sha2`, which runs SHA-NI on x86 and the SHA2
//! crypto extensions on aarch64 when the CPU has them. Dispatch only routes
//! here when the capability flags allow it.
//!
//! The backend label selects dispatch policy, not the instruction set: both
//! `sha-ni` and `arm-sha2` land here and `sha2` picks the instructions at
//! runtime, falling back to its own soft kernel.

use sha2::digest::generic_array::GenericArray;

use crate::BLOCK_SIZE;

pub(super) fn compress_blocks(state: &mut [u32; 8], blocks: &[u8]) {
    // One call per block: handing `sha2` the whole run would mean viewing the
    // bytes as `&[GenericArray<u8, U64>]`, which needs `unsafe`.
    for block in blocks.chunks_exact(BLOCK_SIZE) {
        sha2::compress256(state, std::slice::from_ref(GenericArray::from_slice(block)));
    }
}
