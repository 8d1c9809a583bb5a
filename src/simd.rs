//! A tiny 4-lane `u32` vector used to emulate the SHA-1 SIMD intrinsics
//! (`sha1msg1`/`sha1msg2`/`sha1nexte`/`sha1rnds4`) in portable Rust.
//!
//! This is not a real SIMD type backed by target intrinsics — just a plain
//! tuple struct that groups 4 `u32` lanes so the round function can be
//! written the same way the hardware instructions describe it, giving the
//! compiler a chance at instruction-level parallelism without `unsafe`.

use core::ops::{BitXor, Add};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct u32x4(pub u32, pub u32, pub u32, pub u32);

impl BitXor for u32x4 {
    type Output = u32x4;

    #[inline]
    fn bitxor(self, rhs: u32x4) -> u32x4 {
        u32x4(
            self.0 ^ rhs.0,
            self.1 ^ rhs.1,
            self.2 ^ rhs.2,
            self.3 ^ rhs.3,
        )
    }
}

impl Add for u32x4 {
    type Output = u32x4;

    #[inline]
    fn add(self, rhs: u32x4) -> u32x4 {
        u32x4(
            self.0.wrapping_add(rhs.0),
            self.1.wrapping_add(rhs.1),
            self.2.wrapping_add(rhs.2),
            self.3.wrapping_add(rhs.3),
        )
    }
}
