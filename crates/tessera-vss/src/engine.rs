//! Engine façade
//!
//! [`CevallosEngine`] wires the layers together the way most callers want
//! them: Shamir sharing with Berlekamp–Welch reconstruction behind
//! Poly1305-based information checking. `share` splits, wraps and tags;
//! `reconstruct` validates, filters and decodes.

use tessera_math::decoder::DecoderPolicy;

use crate::cevallos::{compute_tag_length, CevallosUsrss, SOUNDNESS_EXPONENT};
use crate::mac::{Poly1305Mac, ShortenedMac};
use crate::random::RandomSource;
use crate::shamir::ShamirPss;
use crate::share::{ShamirShare, VssShare};
use crate::VssError;

/// Default bound on the length of a shared secret; the MAC tag length is
/// sized for it.
pub const DEFAULT_MAX_DATA_LENGTH: usize = 4 * 1024 * 1024;

/// Robust secret sharing engine.
pub struct CevallosEngine<R> {
    sharing: ShamirPss,
    ic: CevallosUsrss<ShortenedMac<Poly1305Mac>>,
    rng: R,
    max_data_length: usize,
}

impl<R: RandomSource> CevallosEngine<R> {
    /// Create an engine for `n` holders with threshold `k`, accepting
    /// secrets up to [`DEFAULT_MAX_DATA_LENGTH`].
    pub fn new(n: u8, k: usize, rng: R) -> Result<Self, VssError> {
        Self::with_max_data_length(n, k, rng, DEFAULT_MAX_DATA_LENGTH)
    }

    /// As [`new`](Self::new) with an explicit bound on secret length. A
    /// smaller bound shrinks the per-pair MAC tags.
    pub fn with_max_data_length(
        n: u8,
        k: usize,
        rng: R,
        max_data_length: usize,
    ) -> Result<Self, VssError> {
        if max_data_length == 0 {
            return Err(VssError::InvalidParameters(
                "maximum data length must be positive".into(),
            ));
        }
        let sharing = ShamirPss::new(n, k, DecoderPolicy::BerlekampWelch)?;
        let mac = ShortenedMac::new(
            Poly1305Mac,
            compute_tag_length(max_data_length, k, SOUNDNESS_EXPONENT),
        );
        let ic = CevallosUsrss::new(n, k, mac)?;
        Ok(Self {
            sharing,
            ic,
            rng,
            max_data_length,
        })
    }

    pub fn n(&self) -> u8 {
        self.sharing.n()
    }

    pub fn k(&self) -> usize {
        self.sharing.k()
    }

    /// Tag bytes attached per (holder, verifier) pair.
    pub fn tag_length(&self) -> usize {
        self.ic.tag_length()
    }

    /// Key bytes attached per (verifier, holder) pair.
    pub fn key_length(&self) -> usize {
        self.ic.key_length()
    }

    /// Split `data` into `n` verifiable shares.
    pub fn share(&mut self, data: &[u8]) -> Result<Vec<VssShare>, VssError> {
        if data.len() > self.max_data_length {
            return Err(VssError::InvalidParameters(format!(
                "secret of {} bytes exceeds the configured maximum of {}",
                data.len(),
                self.max_data_length
            )));
        }

        let plain = self.sharing.share(&mut self.rng, data)?;
        let mut shares: Vec<VssShare> = plain
            .into_iter()
            .map(|s| VssShare::new(s, self.n(), self.tag_length(), self.key_length()))
            .collect();
        self.ic.create_tags(&mut self.rng, &mut shares)?;
        log::debug!(
            "shared {} bytes into {} shares ({})",
            data.len(),
            shares.len(),
            self.sharing
        );
        Ok(shares)
    }

    /// Validate the presented shares against each other and reconstruct the
    /// secret from the accepted subset.
    pub fn reconstruct(&self, shares: &[VssShare]) -> Result<Vec<u8>, VssError> {
        let accepted = self.ic.check_shares(shares);
        if accepted.len() < self.k() {
            return Err(VssError::Reconstruction(format!(
                "only {} of {} shares are valid, {} required",
                accepted.len(),
                shares.len(),
                self.k()
            )));
        }
        let inner: Vec<ShamirShare> = accepted
            .into_iter()
            .map(|i| shares[i].inner().clone())
            .collect();
        self.sharing.reconstruct(&inner)
    }

    /// Parse a share serialized with [`VssShare::to_bytes`] under this
    /// engine's MAC configuration.
    pub fn parse_share(&self, bytes: &[u8]) -> Result<VssShare, VssError> {
        VssShare::from_bytes(bytes, self.tag_length(), self.key_length())
    }
}
