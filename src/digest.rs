//! The object-safe streaming façade over the concrete hash contexts.
//!
//! Each algorithm module (`hashing::md5`, `hashing::sha1`, `hashing::sha2::*`)
//! exposes its own concrete, non-object-safe `Context` with a `[u8; N]`
//! output. `Hasher` is the trait-object-friendly counterpart used by the
//! digest registry to let callers pick an algorithm at runtime and drive it
//! through `Box<dyn Hasher>` without knowing `N` ahead of time.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// A streaming hash context that can be driven without knowing the concrete
/// algorithm or its output size at compile time.
pub trait Hasher {
    /// Feed more data into the hash state.
    fn update(&mut self, data: &[u8]);

    /// Consume the context and produce the digest.
    fn finalize_boxed(self: Box<Self>) -> Vec<u8>;

    /// Size in bytes of the digest this context will produce.
    fn output_bytes(&self) -> usize;

    /// Lowercase algorithm name, e.g. `"sha256"`.
    fn name(&self) -> &'static str;
}
