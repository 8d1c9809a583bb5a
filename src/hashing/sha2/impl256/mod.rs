//! SHA-256 compression function.
//!
//! Portable reference implementation only; the multi-arch SIMD dispatch
//! the original carried (AVX/SSE4.1/AArch64) is not needed here.

mod reference;

pub(crate) fn digest_block(state: &mut [u32; 8], block: &[u8]) {
    reference::digest_block(state, block)
}
