//! Tessera VSS module
//!
//! Split a secret byte-string into `n` shares so that any `k` reconstruct it
//! while fewer than `k` reveal nothing, with an information-checking layer
//! that lets share holders detect corrupted or forged shares before
//! reconstruction.
//!
//! # Layers
//!
//! - [`shamir::ShamirPss`] — plain Shamir sharing over GF(2⁸), one random
//!   polynomial per secret byte.
//! - [`cevallos::CevallosUsrss`] — cross-MAC tagging and majority-vote share
//!   validation (Cevallos-style unconditionally-secure robust secret
//!   sharing).
//! - [`engine::CevallosEngine`] — the composition most callers want:
//!   Berlekamp–Welch error-correcting reconstruction behind MAC-validated
//!   shares.
//!
//! # Example
//!
//! ```
//! use tessera_vss::CevallosEngine;
//!
//! let mut engine = CevallosEngine::new(4, 3, rand::thread_rng())?;
//! let shares = engine.share(b"for sale: baby shoes, never worn")?;
//! let secret = engine.reconstruct(&shares[..3])?;
//! assert_eq!(secret, b"for sale: baby shoes, never worn");
//! # Ok::<(), tessera_vss::VssError>(())
//! ```

pub mod cevallos;
pub mod engine;
pub mod mac;
pub mod random;
pub mod shamir;
pub mod share;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VssError {
    /// The (n, k) combination is cryptographically insufficient.
    #[error("parameters are not secure enough: {0}")]
    WeakSecurity(String),
    /// Malformed input: zero share id, mismatched lengths, bad wire bytes.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// A MAC operation failed (wrong key length).
    #[error("MAC failure: {0}")]
    Mac(String),
    /// The secret could not be reconstructed from the given shares.
    #[error("reconstruction failed: {0}")]
    Reconstruction(String),
}

pub use cevallos::{compute_tag_length, CevallosUsrss, SOUNDNESS_EXPONENT};
pub use engine::{CevallosEngine, DEFAULT_MAX_DATA_LENGTH};
pub use mac::{HmacSha256Mac, MacHelper, Poly1305Mac, ShortenedMac};
pub use random::RandomSource;
pub use shamir::ShamirPss;
pub use share::{ShamirShare, VssShare};

pub use tessera_math::decoder::DecoderPolicy;
