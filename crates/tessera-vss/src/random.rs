//! Randomness contract
//!
//! Shamir coefficients and x-coordinates must never be zero: a zero leading
//! coefficient silently lowers the polynomial degree and leaks that fewer
//! than `k - 1` random bytes went into a share. The [`RandomSource`] trait
//! narrows an RNG to exactly that contract, and every [`rand::RngCore`]
//! (thread RNG in production, a seeded `StdRng` in tests) picks it up through
//! the blanket impl.

use rand::RngCore;

/// A supplier of uniformly-random bytes in `1..=255`.
pub trait RandomSource {
    /// Fill `buf` with uniform non-zero bytes.
    fn fill_nonzero(&mut self, buf: &mut [u8]);
}

impl<R: RngCore> RandomSource for R {
    fn fill_nonzero(&mut self, buf: &mut [u8]) {
        let mut byte = [0u8; 1];
        for slot in buf.iter_mut() {
            // Rejection sampling keeps the 1..=255 range uniform.
            loop {
                self.fill_bytes(&mut byte);
                if byte[0] != 0 {
                    break;
                }
            }
            *slot = byte[0];
        }
    }
}
