//! Error types shared by the core hash/HMAC library.
//!
//! The library never panics on caller-supplied data; every fallible public
//! entry point returns `Result<T, Error>`. `assert!`s that remain in the
//! block-compression internals guard invariants that cannot be violated
//! through the public API (buffer-size mismatches, etc.) and indicate a
//! library bug if they ever fire.

use alloc::string::String;

/// The error type returned by the fallible operations of this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument was invalid.
    #[error("invalid argument `{name}`: {reason}")]
    Argument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Allocation or buffer sizing failed.
    #[error("memory error: {0}")]
    Memory(String),

    /// A context or algorithm could not be initialized.
    #[error("initialization failed: {0}")]
    Initialize(String),

    /// A compression or keying step failed mid-computation.
    #[error("computation failed: {0}")]
    Compute(String),

    /// An I/O operation failed while streaming input to a context.
    #[cfg(feature = "cli")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
