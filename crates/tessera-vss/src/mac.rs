//! Fixed-length MAC adapters
//!
//! The information-checking layer authenticates shares with one-shot MACs
//! under fresh per-pair keys. [`MacHelper`] is the narrow contract it needs;
//! [`HmacSha256Mac`] and [`Poly1305Mac`] are the two backends, and
//! [`ShortenedMac`] truncates tags to the length the soundness calculation
//! asks for.

use hmac::{Hmac, Mac};
use poly1305::universal_hash::KeyInit;
use poly1305::Poly1305;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::VssError;

/// A deterministic fixed-length MAC.
pub trait MacHelper {
    /// Length of the keys the dealer must generate, in bytes.
    fn key_length(&self) -> usize;

    /// Length of the tags `compute_mac` produces, in bytes.
    fn tag_length(&self) -> usize;

    /// Compute the tag over `data` under `key`.
    fn compute_mac(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, VssError>;

    /// Check `tag` against a fresh computation. Comparison is
    /// constant-time; any MAC-level failure reads as "no".
    fn verify_mac(&self, data: &[u8], key: &[u8], tag: &[u8]) -> bool {
        if tag.len() != self.tag_length() {
            return false;
        }
        match self.compute_mac(data, key) {
            Ok(expected) => expected.as_slice().ct_eq(tag).into(),
            Err(_) => false,
        }
    }
}

/// HMAC-SHA256 with 256-bit keys and 32-byte tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Mac;

impl MacHelper for HmacSha256Mac {
    fn key_length(&self) -> usize {
        32
    }

    fn tag_length(&self) -> usize {
        32
    }

    fn compute_mac(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, VssError> {
        if key.is_empty() {
            return Err(VssError::Mac("empty HMAC key".into()));
        }
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
            .map_err(|e| VssError::Mac(format!("HMAC key rejected: {e}")))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().as_slice().to_vec())
    }
}

/// Poly1305 with 256-bit keys and 16-byte tags.
///
/// Poly1305 is a one-time MAC: a key must never authenticate two messages.
/// The tagging protocol draws a fresh key for every (holder, verifier) pair,
/// which is exactly that usage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Poly1305Mac;

impl MacHelper for Poly1305Mac {
    fn key_length(&self) -> usize {
        32
    }

    fn tag_length(&self) -> usize {
        16
    }

    fn compute_mac(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, VssError> {
        if key.len() != self.key_length() {
            return Err(VssError::Mac(format!(
                "Poly1305 needs a {}-byte key, got {}",
                self.key_length(),
                key.len()
            )));
        }
        let mac = Poly1305::new(poly1305::Key::from_slice(key));
        Ok(mac.compute_unpadded(data).as_slice().to_vec())
    }
}

/// Truncates another MAC's tags to `tag_len` bytes.
///
/// Truncation to `t` bytes bounds the forgery probability of a single
/// substitution attempt by 2^-8t.
#[derive(Debug, Clone, Copy)]
pub struct ShortenedMac<M> {
    inner: M,
    tag_len: usize,
}

impl<M: MacHelper> ShortenedMac<M> {
    /// Wrap `inner`, keeping the first `tag_len` bytes of its tags. Lengths
    /// beyond the inner tag length are clamped.
    pub fn new(inner: M, tag_len: usize) -> Self {
        let tag_len = tag_len.min(inner.tag_length());
        Self { inner, tag_len }
    }
}

impl<M: MacHelper> MacHelper for ShortenedMac<M> {
    fn key_length(&self) -> usize {
        self.inner.key_length()
    }

    fn tag_length(&self) -> usize {
        self.tag_len
    }

    fn compute_mac(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, VssError> {
        let mut tag = self.inner.compute_mac(data, key)?;
        tag.truncate(self.tag_len);
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha256_rfc4231_vector() {
        // RFC 4231, test case 2
        let tag = HmacSha256Mac
            .compute_mac(b"what do ya want for nothing?", b"Jefe")
            .unwrap();
        assert_eq!(
            hex::encode(tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_poly1305_rfc7539_vector() {
        // RFC 7539, section 2.5.2
        let key = hex::decode("85d6be7857556d337f4452fe42d506a80103808afb0db2fd4abff6af4149f51b")
            .unwrap();
        let tag = Poly1305Mac
            .compute_mac(b"Cryptographic Forum Research Group", &key)
            .unwrap();
        assert_eq!(hex::encode(tag), "a8061dc1305136c6c22b8baf0c0127a9");
    }

    #[test]
    fn test_verify_accepts_and_rejects() {
        let key = [0x42u8; 32];
        let mac = HmacSha256Mac;
        let tag = mac.compute_mac(b"payload", &key).unwrap();
        assert!(mac.verify_mac(b"payload", &key, &tag));
        assert!(!mac.verify_mac(b"payloae", &key, &tag));
        assert!(!mac.verify_mac(b"payload", &[0x43u8; 32], &tag));
        assert!(!mac.verify_mac(b"payload", &key, &tag[..31]));
    }

    #[test]
    fn test_poly1305_rejects_bad_key_length() {
        assert!(matches!(
            Poly1305Mac.compute_mac(b"x", &[0u8; 16]),
            Err(VssError::Mac(_))
        ));
    }

    #[test]
    fn test_shortened_truncates_and_verifies() {
        let key = [7u8; 32];
        let full = HmacSha256Mac.compute_mac(b"data", &key).unwrap();
        let short = ShortenedMac::new(HmacSha256Mac, 19);
        assert_eq!(short.tag_length(), 19);
        let tag = short.compute_mac(b"data", &key).unwrap();
        assert_eq!(tag, full[..19]);
        assert!(short.verify_mac(b"data", &key, &tag));
        assert!(!short.verify_mac(b"data", &key, &full)); // wrong length
        assert!(!short.verify_mac(b"date", &key, &tag));
    }

    #[test]
    fn test_shortened_clamps_to_inner_length() {
        let short = ShortenedMac::new(Poly1305Mac, 19);
        assert_eq!(short.tag_length(), 16);
    }
}
