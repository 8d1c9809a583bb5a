//! Implements the Hash Message Authentication Code (HMAC), RFC 2104.
//!
//! # Examples
//!
//! ```
//! use hmacsum::hmac::{hmac, SHA256};
//!
//! let key = [0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15];
//! let mac = hmac::<SHA256>(&key, b"my message");
//! ```
//!
//! The streaming context the construction is built from internally is
//! not exposed: callers only ever see [`hmac`] and
//! [`hmac_with_output_len`], which produce a [`Tag`] in one call.

#![allow(missing_docs)]

use crate::cryptoutil::zero;
use crate::error::Error;
use core::convert::TryFrom;

// HMAC is implemented using the following operations:
//
// HMAC(K, m) = H( (K' ⊕ opad) || H( (K' ⊕ ipad) || m ) )
// where
//   K' = H(K) if length K > block size
//      | K    otherwise
//   H is a cryptographic hash function
//   m is the message to be authenticated
//   K is the secret key
//   K' is a block-sized key derived from the secret key, K; either by padding to the right with 0s up to the block size, or by hashing down to less than or equal to the block size first and then padding to the right with zeros
//   || denotes concatenation
//   ⊕ denotes bitwise exclusive or (XOR)
//   opad is the block-sized outer padding, consisting of repeated bytes valued 0x5c
//   ipad is the block-sized inner padding, consisting of repeated bytes valued 0x36

macro_rules! init_key {
    ($key:ident, $new:expr, $digest_len:path, $block_size:path) => {{
        const OPAD: u8 = 0x5c;
        const IPAD: u8 = 0x36;

        assert!($digest_len <= $block_size);

        let mut k = [0u8; $block_size];
        let mut mix = [0u8; $block_size];

        let mut inner_ctx = $new;
        let mut outer_ctx = $new;

        // set k' either as a hash of the key or as the key itself.
        if $key.len() <= $block_size {
            k[0..$key.len()].copy_from_slice($key)
        } else {
            // use inner_ctx to just hash into k
            inner_ctx.update_mut($key);
            let hashed = inner_ctx.finalize_reset();
            let k_as_digestlen =
                <&mut [u8; $digest_len]>::try_from(&mut k[0..$digest_len]).unwrap();
            k_as_digestlen.copy_from_slice(&hashed);
        }

        // input the keyed-ipad in the inner-context (the one hashing the message)
        for (m, k_byte) in mix.iter_mut().zip(k.iter()) {
            *m = k_byte ^ IPAD;
        }
        inner_ctx.update_mut(&mix);

        // input the keyed-opad in the outer-context (the one hashing the final result)
        for (m, k_byte) in mix.iter_mut().zip(k.iter()) {
            *m = k_byte ^ OPAD;
        }
        outer_ctx.update_mut(&mix);

        // zero the transient key material
        zero(&mut k);
        zero(&mut mix);

        (inner_ctx, outer_ctx)
    }};
}

macro_rules! algorithm_impl {
    ($name:ident, $context:path) => {
        impl Algorithm for $name {
            const BLOCK_SIZE: usize = Self::BLOCK_SIZE;
            const OUTPUT_SIZE: usize = Self::OUTPUT_SIZE;

            type Context = $context;
            type Output = [u8; Self::OUTPUT_SIZE];
            type MacOutput = Tag<{ Self::OUTPUT_SIZE }>;

            fn init(key: &[u8]) -> (Self::Context, Self::Context) {
                init_key!(
                    key,
                    <$context>::new(),
                    Self::OUTPUT_SIZE,
                    Self::BLOCK_SIZE
                )
            }
            fn update(context: &mut Self::Context, input: &[u8]) {
                context.update_mut(input);
            }
            fn finalize(context: &mut Self::Context) -> Self::MacOutput {
                Tag(context.finalize_reset())
            }
            fn finalize_at(context: &mut Self::Context, out: &mut [u8]) {
                let full = context.finalize_reset();
                out.copy_from_slice(&full[..out.len()]);
            }
            fn feed(context: &mut Self::Context, other: &mut Self::Context) {
                let output = other.finalize_reset();
                context.update_mut(&output);
            }
        }
    };
}

/// Algorithm defined to do HMAC
pub trait Algorithm {
    const BLOCK_SIZE: usize;
    const OUTPUT_SIZE: usize;

    type Context: Clone;

    // Output and MacOutput should not be needed, but there's current compiler
    // limitation in composing the associated type and the constants
    type Output;
    type MacOutput;

    fn init(key: &[u8]) -> (Self::Context, Self::Context);
    fn update(context: &mut Self::Context, input: &[u8]);
    fn feed(context: &mut Self::Context, other: &mut Self::Context);
    fn finalize(context: &mut Self::Context) -> Self::MacOutput;
    fn finalize_at(_context: &mut Self::Context, out: &mut [u8]);
}

#[cfg(feature = "md5")]
#[derive(Clone, Debug)]
pub struct MD5;

#[cfg(feature = "md5")]
impl MD5 {
    pub const BLOCK_SIZE: usize = 64;
    pub const OUTPUT_SIZE: usize = 16;
}

#[cfg(feature = "md5")]
algorithm_impl!(MD5, crate::hashing::md5::Context);

#[cfg(feature = "sha1")]
#[derive(Clone, Debug)]
pub struct SHA1;

#[cfg(feature = "sha1")]
impl SHA1 {
    pub const BLOCK_SIZE: usize = 64;
    pub const OUTPUT_SIZE: usize = 20;
}

#[cfg(feature = "sha1")]
algorithm_impl!(SHA1, crate::hashing::sha1::Context);

#[cfg(feature = "sha2")]
#[derive(Clone, Debug)]
pub struct SHA224;

#[cfg(feature = "sha2")]
impl SHA224 {
    pub const BLOCK_SIZE: usize = 64;
    pub const OUTPUT_SIZE: usize = 28;
}

#[cfg(feature = "sha2")]
algorithm_impl!(SHA224, crate::hashing::sha2::Context224);

#[cfg(feature = "sha2")]
#[derive(Clone, Debug)]
pub struct SHA256;

#[cfg(feature = "sha2")]
impl SHA256 {
    pub const BLOCK_SIZE: usize = 64;
    pub const OUTPUT_SIZE: usize = 32;
}

#[cfg(feature = "sha2")]
algorithm_impl!(SHA256, crate::hashing::sha2::Context256);

#[cfg(feature = "sha2")]
#[derive(Clone, Debug)]
pub struct SHA512;

#[cfg(feature = "sha2")]
impl SHA512 {
    pub const BLOCK_SIZE: usize = 128;
    pub const OUTPUT_SIZE: usize = 64;
}

#[cfg(feature = "sha2")]
algorithm_impl!(SHA512, crate::hashing::sha2::Context512);

/// HMAC context parametrized by the hashing function
///
/// It is composed of 2 hashing contextes, and the construction
/// is meant to hide the initial key from its context, by forcing
/// the key component to be processed by an initial compress step
/// rendering the key not recoverable from the context memory.
///
/// It may not be true for every type of hashing context, specially if they
/// have a buffering / last buffer capability.
///
/// Kept crate-private: the public surface is the one-shot [`hmac`] and
/// [`hmac_with_output_len`] functions, not a streaming context.
pub(crate) struct Context<A: Algorithm> {
    inner: A::Context,
    outer: A::Context,
}

impl<A: Algorithm> Clone for Context<A> {
    fn clone(&self) -> Self {
        Context {
            inner: self.inner.clone(),
            outer: self.outer.clone(),
        }
    }
}

/// HMAC Tag with the number of bytes associated as const type parameter
///
/// The inner component of the tag, an array of bytes, is exposed publicly
/// and the `Tag` type can be constructed from the component.
///
/// `Tag` carries no equality impl: comparing MAC tags safely requires a
/// constant-time comparison, which is outside this crate's scope, so
/// callers that need to verify a tag must bring their own.
pub struct Tag<const N: usize>(pub [u8; N]);

impl<'a, const N: usize> From<&'a Tag<N>> for &'a [u8] {
    fn from(tag: &'a Tag<N>) -> Self {
        &tag.0
    }
}

impl<const N: usize> AsRef<[u8]> for Tag<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<Tag<N>> for [u8; N] {
    fn from(tag: Tag<N>) -> Self {
        tag.0
    }
}

impl<H: Algorithm> Context<H> {
    pub(crate) fn output_bytes(&self) -> usize {
        H::OUTPUT_SIZE
    }

    /// Create a new HMAC context instance with the given key
    ///
    /// The key to use can be any sequence of bytes
    pub(crate) fn new(key: &[u8]) -> Self {
        let (inner, outer) = H::init(key);
        Self { inner, outer }
    }

    /// Update the context with message
    ///
    /// This can be called multiple times
    pub(crate) fn update(&mut self, message: &[u8]) {
        H::update(&mut self.inner, message)
    }

    /// Finalize the context and get the associated HMAC Tag output
    pub(crate) fn finalize(mut self) -> H::MacOutput {
        H::feed(&mut self.outer, &mut self.inner);
        H::finalize(&mut self.outer)
    }

    /// Finalize the context and write the (possibly truncated) output into `out`
    pub(crate) fn finalize_at(&mut self, out: &mut [u8]) {
        H::feed(&mut self.outer, &mut self.inner);
        H::finalize_at(&mut self.outer, out)
    }
}

/// Generate a HMAC Tag for a given key and message
///
/// ```
/// # #[cfg(feature = "sha2")]
/// use hmacsum::hmac::{hmac, SHA256};
///
/// # #[cfg(feature = "sha2")]
/// hmac::<SHA256>(&[1,2,3], b"message");
/// ```
pub fn hmac<D: Algorithm>(key: &[u8], message: &[u8]) -> D::MacOutput {
    let mut context: Context<D> = Context::new(key);
    context.update(message);
    context.finalize()
}

/// Generate an HMAC tag truncated to `out.len()` bytes, per RFC 2104 section 5.
///
/// `out.len()` must be in `(0, D::OUTPUT_SIZE]`; anything else is an
/// [`Error::Argument`].
pub fn hmac_with_output_len<D: Algorithm>(
    key: &[u8],
    message: &[u8],
    out: &mut [u8],
) -> Result<(), Error> {
    if out.is_empty() || out.len() > D::OUTPUT_SIZE {
        return Err(Error::Argument {
            name: "output_len",
            reason: alloc::format!(
                "must be in (0, {}], got {}",
                D::OUTPUT_SIZE,
                out.len()
            ),
        });
    }

    let mut context: Context<D> = Context::new(key);
    context.update(message);
    context.finalize_at(out);
    Ok(())
}
