//! Streaming hash primitives, one module per algorithm.

#[cfg(feature = "md5")]
pub mod md5;

#[cfg(feature = "sha1")]
pub mod sha1;

#[cfg(feature = "sha2")]
pub mod sha2;
