//! An implementation of the MD5 cryptographic hash algorithm (RFC 1321).
//!
//! MD5 is broken as a collision-resistant hash function and should not be
//! used for anything requiring collision resistance. It remains widely used
//! as a non-cryptographic checksum and as the default digest of this crate's
//! CLI collaborator, matching the source this crate is modeled on.
//!
//! # Example
//!
//! ```
//! use hmacsum::hashing::md5;
//!
//! let digest = md5::Context::new().update(b"hello world").finalize();
//! ```

use crate::buffer::FixedBuffer;
use crate::cryptoutil::{read_u32v_le, write_u32v_le};
use crate::digest::Hasher;

const STATE_LEN: usize = 4;
const BLOCK_LEN: usize = 16;

const S: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

// Binary integer part of the sines of integers (in radians), as specified by RFC 1321.
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

const H0: u32 = 0x67452301;
const H1: u32 = 0xefcdab89;
const H2: u32 = 0x98badcfe;
const H3: u32 = 0x10325476;
const H: [u32; STATE_LEN] = [H0, H1, H2, H3];

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

fn digest_block_u32(state: &mut [u32; STATE_LEN], block: &[u32; BLOCK_LEN]) {
    let (mut a, mut b, mut c, mut d) = (state[0], state[1], state[2], state[3]);

    for idx in 0..64 {
        let (f_val, g_idx) = match idx / 16 {
            0 => (f(b, c, d), idx),
            1 => (g(b, c, d), (5 * idx + 1) % 16),
            2 => (h(b, c, d), (3 * idx + 5) % 16),
            _ => (i(b, c, d), (7 * idx) % 16),
        };

        let round = idx / 16;
        let shift = S[round][idx % 4];

        let tmp = d;
        d = c;
        c = b;
        let sum = a
            .wrapping_add(f_val)
            .wrapping_add(K[idx])
            .wrapping_add(block[g_idx]);
        b = b.wrapping_add(sum.rotate_left(shift));
        a = tmp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

fn digest_block(state: &mut [u32; STATE_LEN], block: &[u8]) {
    assert_eq!(block.len(), BLOCK_LEN * 4);
    let mut block2 = [0u32; BLOCK_LEN];
    read_u32v_le(&mut block2[..], block);
    digest_block_u32(state, &block2);
}

fn digest_blocks(state: &mut [u32; STATE_LEN], block: &[u8]) {
    for b in block.chunks(BLOCK_LEN * 4) {
        digest_block(state, b);
    }
}

fn mk_result(st: &mut Context, rs: &mut [u8; 16]) {
    let st_h = &mut st.h;
    st.buffer
        .standard_padding(8, |d| digest_block(&mut *st_h, d));
    *st.buffer.next::<8>() = (st.processed_bytes << 3).to_le_bytes();
    digest_block(st_h, st.buffer.full_buffer());

    write_u32v_le(rs, &st.h);
}

/// Md5 Algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Md5;

impl Md5 {
    pub const OUTPUT_BITS: usize = 128;
    pub const BLOCK_BYTES: usize = 64;

    /// Create a new context for this algorithm
    pub const fn new() -> Context {
        Context::new()
    }
}

/// Compute the MD5 digest of `data` in one shot.
pub fn digest(data: &[u8]) -> [u8; 16] {
    Context::new().update(data).finalize()
}

/// Structure representing the state of an MD5 computation
#[derive(Clone)]
pub struct Context {
    h: [u32; STATE_LEN],
    processed_bytes: u64,
    buffer: FixedBuffer<64>,
}

impl Context {
    /// Construct a new default MD5 context
    pub const fn new() -> Self {
        Self {
            h: H,
            processed_bytes: 0u64,
            buffer: FixedBuffer::new(),
        }
    }

    pub fn update(mut self, input: &[u8]) -> Self {
        self.update_mut(input);
        self
    }

    pub fn update_mut(&mut self, input: &[u8]) {
        self.processed_bytes += input.len() as u64;
        let h = &mut self.h;
        self.buffer.input(input, |d| {
            digest_blocks(h, d);
        });
    }

    pub fn finalize(mut self) -> [u8; 16] {
        let mut out = [0; 16];
        mk_result(&mut self, &mut out);
        out
    }

    pub fn reset(&mut self) {
        self.processed_bytes = 0;
        self.h = H;
        self.buffer.reset();
    }

    pub fn finalize_reset(&mut self) -> [u8; 16] {
        let mut out = [0; 16];
        mk_result(self, &mut out);
        self.reset();
        out
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.h.zeroize();
        self.processed_bytes.zeroize();
        self.buffer.zeroize();
    }
}

impl Hasher for Context {
    fn update(&mut self, data: &[u8]) {
        self.update_mut(data);
    }

    fn finalize_boxed(self: alloc::boxed::Box<Self>) -> alloc::vec::Vec<u8> {
        (*self).finalize().to_vec()
    }

    fn output_bytes(&self) -> usize {
        16
    }

    fn name(&self) -> &'static str {
        "md5"
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{test_hashing, Test};
    use super::*;

    #[test]
    fn test() {
        // Test vectors from RFC 1321, section A.5.
        let tests = [
            Test {
                input: b"",
                output: [
                    0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec,
                    0xf8, 0x42, 0x7e,
                ],
            },
            Test {
                input: b"a",
                output: [
                    0x0c, 0xc1, 0x75, 0xb9, 0xc0, 0xf1, 0xb6, 0xa8, 0x31, 0xc3, 0x99, 0xe2, 0x69,
                    0x77, 0x26, 0x61,
                ],
            },
            Test {
                input: b"abc",
                output: [
                    0x90, 0x01, 0x50, 0x98, 0x3c, 0xd2, 0x4f, 0xb0, 0xd6, 0x96, 0x3f, 0x7d, 0x28,
                    0xe1, 0x7f, 0x72,
                ],
            },
            Test {
                input: b"message digest",
                output: [
                    0xf9, 0x6b, 0x69, 0x7d, 0x7c, 0xb7, 0x93, 0x8d, 0x52, 0x5a, 0x2f, 0x31, 0xaa,
                    0xf1, 0x61, 0xd0,
                ],
            },
            Test {
                input: b"abcdefghijklmnopqrstuvwxyz",
                output: [
                    0xc3, 0xfc, 0xd3, 0xd7, 0x61, 0x92, 0xe4, 0x00, 0x7d, 0xfb, 0x49, 0x6c, 0xca,
                    0x67, 0xe1, 0x3b,
                ],
            },
            Test {
                input: b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                output: [
                    0xd1, 0x74, 0xab, 0x98, 0xd2, 0x77, 0xd9, 0xf5, 0xa5, 0x61, 0x1c, 0x2c, 0x9f,
                    0x41, 0x9d, 0x9f,
                ],
            },
            Test {
                input: b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                output: [
                    0x57, 0xed, 0xf4, 0xa2, 0x2b, 0xe3, 0xc9, 0x55, 0xac, 0x49, 0xda, 0x2e, 0x21,
                    0x07, 0xb6, 0x7a,
                ],
            },
        ];

        test_hashing(
            &tests,
            Md5,
            |_| Context::new(),
            |ctx, input| ctx.update(input),
            |ctx, input| ctx.update_mut(input),
            |ctx| ctx.finalize(),
            |ctx| ctx.finalize_reset(),
            |ctx| ctx.reset(),
        )
    }
}
