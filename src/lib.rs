// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A pure-rust implementation of MD5, SHA-1, SHA-224, SHA-256 and SHA-512,
//! plus their RFC 2104 HMAC construction, with no dependencies on foreign
//! code (specially C or assembly).
//!
//! Our goal is to support this hash/HMAC surface in constrained
//! environments like embedded devices and WebAssembly as well as on a
//! standard host.
//!
//! This is a fork of [Rust-Crypto by DaGenix](https://github.com/DaGenix/rust-crypto),
//! which we owe a debt of gratitude for starting some good quality pure rust implementations
//! of various cryptographic algorithms.
//!
//! Notable differences with the original sources:
//!
//! * Maintained
//! * Scoped to the MD5/SHA-1/SHA-2 family and HMAC over them — no AEAD,
//!   KDFs, or asymmetric-key algorithms
//! * Contexts zeroize their internal state on drop
//!
//! As with everything cryptographic implementations, please make sure it suits your security requirements,
//! and review and audit before using.
//!

#![allow(unknown_lints)]
#![warn(clippy::all)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::new_without_default)]
#![allow(clippy::let_and_return)]
#![allow(clippy::redundant_field_names)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::suspicious_arithmetic_impl)]
#![allow(clippy::identity_op)]
#![allow(clippy::many_single_char_names)]
#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "cli"))]
#[macro_use]
extern crate std;

#[cfg(all(test, feature = "with-bench"))]
extern crate test;

pub mod buffer;
mod cryptoutil;
pub mod digest;
pub mod error;
pub mod hashing;
pub mod hmac;
pub mod registry;
mod simd;
