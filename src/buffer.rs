//! A fixed size buffer useful for cryptographic operations
//!
//! This is the const-generic successor to the old `FixedBuffer64`/`FixedBuffer128`
//! pair: one buffer type parametrised by block size instead of one struct per size.

use crate::cryptoutil::{copy_memory, zero};

/// A fixed size buffer of `N` bytes, holding the tail of a byte stream that
/// has not yet filled a complete block.
#[derive(Clone)]
pub struct FixedBuffer<const N: usize> {
    buffer: [u8; N],
    buffer_idx: usize,
}

impl<const N: usize> FixedBuffer<N> {
    /// Create a new empty buffer
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; N],
            buffer_idx: 0,
        }
    }

    /// Input a slice of bytes. Every time the buffer becomes full it is
    /// processed by `func` and cleared before more input is accepted.
    pub fn input<F: FnMut(&[u8])>(&mut self, input: &[u8], mut func: F) {
        let mut i = 0;

        if self.buffer_idx != 0 {
            let buffer_remaining = N - self.buffer_idx;
            if input.len() >= buffer_remaining {
                copy_memory(
                    &input[..buffer_remaining],
                    &mut self.buffer[self.buffer_idx..N],
                );
                self.buffer_idx = 0;
                func(&self.buffer);
                i += buffer_remaining;
            } else {
                copy_memory(
                    input,
                    &mut self.buffer[self.buffer_idx..self.buffer_idx + input.len()],
                );
                self.buffer_idx += input.len();
                return;
            }
        }

        // While at least one full block remains, process it straight out of
        // the caller's slice without copying into the buffer.
        if input.len() - i >= N {
            let remaining = input.len() - i;
            let block_bytes = (remaining / N) * N;
            func(&input[i..i + block_bytes]);
            i += block_bytes;
        }

        let input_remaining = input.len() - i;
        copy_memory(&input[i..], &mut self.buffer[0..input_remaining]);
        self.buffer_idx = input_remaining;
    }

    /// Reset the buffer to empty.
    pub fn reset(&mut self) {
        self.buffer_idx = 0;
    }

    /// Zero the buffer from the current position up to (not including) `idx`
    /// and move the position to `idx`.
    pub fn zero_until(&mut self, idx: usize) {
        assert!(idx >= self.buffer_idx);
        zero(&mut self.buffer[self.buffer_idx..idx]);
        self.buffer_idx = idx;
    }

    /// Reserve the next `M` bytes of the buffer for the caller to write into.
    pub fn next<const M: usize>(&mut self) -> &mut [u8; M] {
        let start = self.buffer_idx;
        self.buffer_idx += M;
        (&mut self.buffer[start..self.buffer_idx])
            .try_into()
            .expect("next::<M> within buffer bounds")
    }

    /// Get the current (full) buffer and reset the position. The buffer must
    /// already be full.
    pub fn full_buffer(&mut self) -> &[u8] {
        assert_eq!(self.buffer_idx, N);
        self.buffer_idx = 0;
        &self.buffer[..N]
    }

    /// Number of bytes remaining until the buffer is full.
    pub fn remaining(&self) -> usize {
        N - self.buffer_idx
    }

    /// Size of the buffer.
    pub fn size(&self) -> usize {
        N
    }

    /// Add the standard Merkle-Damgard padding: a single `0x80` byte followed
    /// by zeros, leaving exactly `rem` bytes free for the length field. If
    /// there isn't enough room left in the current block, the block is
    /// flushed through `func` and padding continues into a fresh block.
    pub fn standard_padding<F: FnMut(&[u8])>(&mut self, rem: usize, mut func: F) {
        self.next::<1>()[0] = 0x80;

        if self.remaining() < rem {
            self.zero_until(N);
            func(self.full_buffer());
        }

        self.zero_until(N - rem);
    }
}

impl<const N: usize> Default for FixedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> zeroize::Zeroize for FixedBuffer<N> {
    fn zeroize(&mut self) {
        self.buffer.zeroize();
        self.buffer_idx.zeroize();
    }
}
