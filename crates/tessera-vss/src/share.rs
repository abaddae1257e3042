//! Share data model
//!
//! [`ShamirShare`] is the plain (x, y-vector) record produced by polynomial
//! sharing. [`VssShare`] wraps one with the cross-MAC material of the
//! information-checking layer: for holder `i`, `macs[j-1]` is the tag the
//! dealer computed over share `i` under the key it handed to peer `j`, and
//! `keys[j-1]` is the key holder `i` uses to verify peer `j`'s share.
//!
//! Wire format (big-endian length):
//!
//! ```text
//! [u8 id][u32 len][len bytes y]                      plain share
//! [u8 n][n * tag_len macs][n * key_len keys]         VSS extension
//! ```
//!
//! Diagonal MAC/key entries (a holder tagging itself) are zero-filled and
//! carry no meaning.

use serde::{Deserialize, Serialize};

use crate::VssError;

/// A single Shamir share: a non-zero x-coordinate and one y-byte per secret
/// byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShamirShare {
    id: u8,
    y: Vec<u8>,
}

impl ShamirShare {
    /// Create a share. The id is the x-coordinate and must be non-zero
    /// (`poly(0)` is the secret itself).
    pub fn new(id: u8, y: Vec<u8>) -> Result<Self, VssError> {
        if id == 0 {
            return Err(VssError::InvalidParameters(
                "share id must be non-zero".into(),
            ));
        }
        Ok(Self { id, y })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// Serialize to the canonical wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(5 + self.y.len());
        bytes.push(self.id);
        bytes.extend_from_slice(&(self.y.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&self.y);
        bytes
    }

    /// Parse the canonical wire format. Trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VssError> {
        let (share, rest) = Self::parse_prefix(bytes)?;
        if !rest.is_empty() {
            return Err(VssError::InvalidParameters(format!(
                "{} trailing bytes after share",
                rest.len()
            )));
        }
        Ok(share)
    }

    /// Parse a share off the front of `bytes`, returning the remainder.
    fn parse_prefix(bytes: &[u8]) -> Result<(Self, &[u8]), VssError> {
        if bytes.len() < 5 {
            return Err(VssError::InvalidParameters(
                "share is shorter than its header".into(),
            ));
        }
        let id = bytes[0];
        let len = u32::from_be_bytes(
            bytes[1..5]
                .try_into()
                .expect("slice of length 4 converts to [u8; 4]"),
        ) as usize;
        let rest = &bytes[5..];
        if rest.len() < len {
            return Err(VssError::InvalidParameters(format!(
                "share declares {} y-bytes but only {} are present",
                len,
                rest.len()
            )));
        }
        let share = Self::new(id, rest[..len].to_vec())?;
        Ok((share, &rest[len..]))
    }
}

/// A verifiable share: the plain share plus dense peer-indexed MAC and key
/// tables of uniform entry length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VssShare {
    share: ShamirShare,
    macs: Vec<Vec<u8>>,
    keys: Vec<Vec<u8>>,
}

impl VssShare {
    /// Wrap a plain share for a group of `n` holders, with all MAC and key
    /// entries zero-filled at the configured lengths.
    pub fn new(share: ShamirShare, n: u8, tag_len: usize, key_len: usize) -> Self {
        Self {
            share,
            macs: vec![vec![0; tag_len]; n as usize],
            keys: vec![vec![0; key_len]; n as usize],
        }
    }

    /// Reassemble a share from its parts, validating the table shape.
    pub fn from_parts(
        share: ShamirShare,
        macs: Vec<Vec<u8>>,
        keys: Vec<Vec<u8>>,
    ) -> Result<Self, VssError> {
        if macs.len() != keys.len() {
            return Err(VssError::InvalidParameters(format!(
                "{} MAC entries but {} key entries",
                macs.len(),
                keys.len()
            )));
        }
        if macs.len() > 255 {
            return Err(VssError::InvalidParameters(format!(
                "group of {} holders exceeds the maximum of 255",
                macs.len()
            )));
        }
        if macs.windows(2).any(|w| w[0].len() != w[1].len())
            || keys.windows(2).any(|w| w[0].len() != w[1].len())
        {
            return Err(VssError::InvalidParameters(
                "MAC and key entries must have uniform lengths".into(),
            ));
        }
        Ok(Self { share, macs, keys })
    }

    pub fn id(&self) -> u8 {
        self.share.id()
    }

    pub fn inner(&self) -> &ShamirShare {
        &self.share
    }

    pub fn into_inner(self) -> ShamirShare {
        self.share
    }

    /// Number of holders this share was tagged for.
    pub fn group_size(&self) -> u8 {
        self.macs.len() as u8
    }

    /// The tag this holder carries for verification by `peer` (1-based id).
    pub fn mac_for(&self, peer: u8) -> Option<&[u8]> {
        self.macs.get(peer.checked_sub(1)? as usize).map(Vec::as_slice)
    }

    /// The key `peer` handed this holder to verify `peer`'s share.
    pub fn key_for(&self, peer: u8) -> Option<&[u8]> {
        self.keys.get(peer.checked_sub(1)? as usize).map(Vec::as_slice)
    }

    pub(crate) fn set_mac(&mut self, peer: u8, tag: Vec<u8>) -> Result<(), VssError> {
        let slot = peer
            .checked_sub(1)
            .and_then(|i| self.macs.get_mut(i as usize))
            .ok_or_else(|| VssError::InvalidParameters(format!("no MAC slot for peer {peer}")))?;
        if tag.len() != slot.len() {
            return Err(VssError::InvalidParameters(format!(
                "tag length {} does not match configured {}",
                tag.len(),
                slot.len()
            )));
        }
        *slot = tag;
        Ok(())
    }

    pub(crate) fn set_key(&mut self, peer: u8, key: Vec<u8>) -> Result<(), VssError> {
        let slot = peer
            .checked_sub(1)
            .and_then(|i| self.keys.get_mut(i as usize))
            .ok_or_else(|| VssError::InvalidParameters(format!("no key slot for peer {peer}")))?;
        if key.len() != slot.len() {
            return Err(VssError::InvalidParameters(format!(
                "key length {} does not match configured {}",
                key.len(),
                slot.len()
            )));
        }
        *slot = key;
        Ok(())
    }

    /// Serialize to the canonical wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.share.to_bytes();
        bytes.push(self.macs.len() as u8);
        for mac in &self.macs {
            bytes.extend_from_slice(mac);
        }
        for key in &self.keys {
            bytes.extend_from_slice(key);
        }
        bytes
    }

    /// Parse the canonical wire format.
    ///
    /// The flattened MAC/key section is not self-delimiting, so the entry
    /// lengths come from the engine configuration.
    pub fn from_bytes(bytes: &[u8], tag_len: usize, key_len: usize) -> Result<Self, VssError> {
        let (share, rest) = ShamirShare::parse_prefix(bytes)?;
        let (&n, rest) = rest.split_first().ok_or_else(|| {
            VssError::InvalidParameters("VSS share is missing its group size".into())
        })?;
        let n = n as usize;
        let expected = n * (tag_len + key_len);
        if rest.len() != expected {
            return Err(VssError::InvalidParameters(format!(
                "VSS share tables hold {} bytes, expected {}",
                rest.len(),
                expected
            )));
        }
        let (mac_bytes, key_bytes) = rest.split_at(n * tag_len);
        let macs = mac_bytes.chunks(tag_len.max(1)).map(<[u8]>::to_vec).collect();
        let keys = key_bytes.chunks(key_len.max(1)).map(<[u8]>::to_vec).collect();
        Self::from_parts(share, macs, keys)
    }
}
