//! SHA-512 compression function (portable reference implementation).

mod reference;

pub(crate) fn digest_block(state: &mut [u64; 8], block: &[u8]) {
    reference::digest_block(state, block)
}
