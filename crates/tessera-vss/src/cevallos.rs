//! Cevallos-style information checking
//!
//! An unconditionally-secure robust secret sharing layer: the dealer tags
//! every share under a fresh key per (holder, verifier) pair and hands each
//! verifier the key, so that at reconstruction time the holders vote on each
//! other's shares. A corrupted share fails verification against every honest
//! key; a corrupted holder can misvote, but below `k/3` corrupt holders the
//! majority rule keeps honest shares in and forged shares out.
//!
//! Tag lengths follow `⌈(E + log₂D + log₂k) / 8⌉` for soundness error 2^-E
//! over messages up to `D` bytes.

use zeroize::Zeroizing;

use crate::mac::MacHelper;
use crate::random::RandomSource;
use crate::share::VssShare;
use crate::VssError;

/// Target soundness error exponent: forgeries succeed with probability at
/// most 2^-128.
pub const SOUNDNESS_EXPONENT: usize = 128;

/// Number of tag bytes needed for soundness error `2^-e` over data of up to
/// `max_data_len` bytes shared with threshold `k`.
///
/// The result is capped by the wrapped MAC's own tag length when used with
/// [`crate::mac::ShortenedMac`].
pub fn compute_tag_length(max_data_len: usize, k: usize, e: usize) -> usize {
    let bits = e as f64 + (max_data_len.max(1) as f64).log2() + (k.max(1) as f64).log2();
    ((bits / 8.0).ceil() as usize).max(1)
}

/// The information-checking protocol for a group of `n` holders with
/// reconstruction threshold `k`.
pub struct CevallosUsrss<M> {
    n: u8,
    k: usize,
    mac: M,
}

impl<M: MacHelper> CevallosUsrss<M> {
    pub fn new(n: u8, k: usize, mac: M) -> Result<Self, VssError> {
        if k <= 1 || k > n as usize {
            return Err(VssError::WeakSecurity(format!(
                "threshold k={} must satisfy 1 < k <= n={}",
                k, n
            )));
        }
        Ok(Self { n, k, mac })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn tag_length(&self) -> usize {
        self.mac.tag_length()
    }

    pub fn key_length(&self) -> usize {
        self.mac.key_length()
    }

    /// Tag all shares pairwise. For every ordered pair `(i, j)` with
    /// `i != j`, a fresh key authenticates share `i`; the tag goes to holder
    /// `i`, the key to verifier `j`. The dealer's key buffer is scrubbed
    /// afterwards.
    pub fn create_tags<R: RandomSource>(
        &self,
        rng: &mut R,
        shares: &mut [VssShare],
    ) -> Result<(), VssError> {
        if shares.len() != self.n as usize {
            return Err(VssError::InvalidParameters(format!(
                "{} shares for a group of {}",
                shares.len(),
                self.n
            )));
        }

        // The inner shares never change below; serialize them once.
        let bodies: Vec<Vec<u8>> = shares.iter().map(|s| s.inner().to_bytes()).collect();
        let ids: Vec<u8> = shares.iter().map(VssShare::id).collect();

        let mut key = Zeroizing::new(vec![0u8; self.mac.key_length()]);
        for i in 0..shares.len() {
            for j in 0..shares.len() {
                if i == j {
                    continue;
                }
                rng.fill_nonzero(&mut key);
                let tag = self.mac.compute_mac(&bodies[i], &key)?;
                shares[i].set_mac(ids[j], tag)?;
                shares[j].set_key(ids[i], key.to_vec())?;
            }
        }
        Ok(())
    }

    /// Validate a presented set of shares against each other.
    ///
    /// Share `i` is accepted when at least `⌈m/2⌉` of the other presented
    /// holders confirm its tag, `m` being the number of presented shares.
    /// Returns the indices of accepted shares, in input order.
    pub fn check_shares(&self, shares: &[VssShare]) -> Vec<usize> {
        let m = shares.len();
        let majority = m.div_ceil(2);
        let bodies: Vec<Vec<u8>> = shares.iter().map(|s| s.inner().to_bytes()).collect();

        let mut accepted = Vec::with_capacity(m);
        for (i, candidate) in shares.iter().enumerate() {
            let confirmations = shares
                .iter()
                .enumerate()
                .filter(|&(j, verifier)| {
                    j != i
                        && match (
                            candidate.mac_for(verifier.id()),
                            verifier.key_for(candidate.id()),
                        ) {
                            (Some(tag), Some(key)) => self.mac.verify_mac(&bodies[i], key, tag),
                            _ => false,
                        }
                })
                .count();
            if confirmations >= majority {
                accepted.push(i);
            } else {
                log::warn!(
                    "share {} rejected: {} of {} confirmations, {} required",
                    candidate.id(),
                    confirmations,
                    m - 1,
                    majority
                );
            }
        }
        log::debug!("information checking accepted {} of {} shares", accepted.len(), m);
        accepted
    }
}
