//! Shamir perfect secret sharing over GF(256)
//!
//! Split a secret into N shares where any K can reconstruct it and fewer
//! than K are statistically independent of the secret. Each secret byte is
//! shared through its own random polynomial of degree K-1 whose constant
//! term is the byte; share `j` holds the polynomial values at x = j.

use std::fmt;

use zeroize::Zeroizing;

use tessera_math::decoder::DecoderPolicy;
use tessera_math::gf256::poly_eval;
use tessera_math::MathError;

use crate::random::RandomSource;
use crate::share::ShamirShare;
use crate::VssError;

/// A (k, n) Shamir sharing scheme bound to a reconstruction decoder.
#[derive(Debug, Clone)]
pub struct ShamirPss {
    n: u8,
    k: usize,
    policy: DecoderPolicy,
}

impl ShamirPss {
    /// Create a scheme producing `n` shares with reconstruction threshold
    /// `k`.
    ///
    /// Fails with [`VssError::WeakSecurity`] unless `1 < k <= n` (`n` is
    /// capped at 255 by its type: x-coordinates are non-zero field
    /// elements).
    pub fn new(n: u8, k: usize, policy: DecoderPolicy) -> Result<Self, VssError> {
        if k <= 1 || k > n as usize {
            return Err(VssError::WeakSecurity(format!(
                "threshold k={} must satisfy 1 < k <= n={}",
                k, n
            )));
        }
        Ok(Self { n, k, policy })
    }

    pub fn n(&self) -> u8 {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Split `data` into `n` shares.
    ///
    /// For every secret byte a fresh polynomial is drawn: the constant term
    /// is the byte, the remaining `k - 1` coefficients are uniform non-zero
    /// bytes from `rng`.
    pub fn share<R: RandomSource>(
        &self,
        rng: &mut R,
        data: &[u8],
    ) -> Result<Vec<ShamirShare>, VssError> {
        if data.is_empty() {
            return Err(VssError::InvalidParameters("empty secret".into()));
        }

        let n = self.n as usize;
        let mut ys = vec![vec![0u8; data.len()]; n];
        // Coefficient buffer holds secret bytes; scrub it on drop.
        let mut coeffs = Zeroizing::new(vec![0u8; self.k]);

        for (pos, &secret_byte) in data.iter().enumerate() {
            rng.fill_nonzero(&mut coeffs[1..]);
            coeffs[0] = secret_byte;
            for (j, y) in ys.iter_mut().enumerate() {
                y[pos] = poly_eval(&coeffs, (j + 1) as u8);
            }
        }

        Ok(ys
            .into_iter()
            .enumerate()
            .map(|(j, y)| {
                ShamirShare::new((j + 1) as u8, y).expect("share ids start at 1, never 0")
            })
            .collect())
    }

    /// Reconstruct the secret from at least `k` shares.
    pub fn reconstruct(&self, shares: &[ShamirShare]) -> Result<Vec<u8>, VssError> {
        if shares.len() < self.k {
            return Err(VssError::Reconstruction(format!(
                "{} shares provided, {} required",
                shares.len(),
                self.k
            )));
        }
        let len = shares[0].y().len();
        if shares.iter().any(|s| s.y().len() != len) {
            return Err(VssError::InvalidParameters(
                "shares have different lengths".into(),
            ));
        }

        let xs: Vec<u8> = shares.iter().map(ShamirShare::id).collect();
        let decoder = self.policy.build(&xs, self.k).map_err(|e| match e {
            MathError::InvalidParameters(msg) => VssError::InvalidParameters(msg),
            other => VssError::Reconstruction(other.to_string()),
        })?;

        let mut secret = Vec::with_capacity(len);
        let mut ys = vec![0u8; shares.len()];
        for pos in 0..len {
            for (i, share) in shares.iter().enumerate() {
                ys[i] = share.y()[pos];
            }
            let decoded = decoder
                .decode(&ys, 0)
                .map_err(|e| VssError::Reconstruction(format!("byte {}: {}", pos, e)))?;
            secret.push(decoded[0]);
        }
        Ok(secret)
    }
}

impl fmt::Display for ShamirPss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShamirPss({}/{})", self.n, self.k)
    }
}
