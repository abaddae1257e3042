//! Polynomial decoders over GF(256)
//!
//! A decoder is bound to the x-coordinates of the shares being consumed and
//! to the reconstruction threshold `k`. `decode` takes the matching y-values
//! and returns the interpolated polynomial evaluated at `offset`,
//! `offset + 1`, …, `offset + k - 1`; an offset of zero puts the constant
//! term (the shared secret byte) first.
//!
//! Two decoders exist:
//!
//! - [`ErasureDecoder`] interpolates through the first `k` points and is the
//!   right choice when missing shares are the only failure mode.
//! - [`BerlekampWelchDecoder`] additionally corrects up to
//!   `(m - k) / 2` corrupted y-values among `m` provided shares.

use crate::gf256::{gf_div, gf_mul, gf_pow, poly_eval};
use crate::matrix::GfMatrix;
use crate::MathError;

/// Which decoder [`build`](DecoderPolicy::build) produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderPolicy {
    Erasure,
    BerlekampWelch,
}

impl DecoderPolicy {
    /// Bind a decoder to the share x-values and threshold.
    pub fn build(&self, xs: &[u8], k: usize) -> Result<Decoder, MathError> {
        match self {
            Self::Erasure => ErasureDecoder::new(xs, k).map(Decoder::Erasure),
            Self::BerlekampWelch => BerlekampWelchDecoder::new(xs, k).map(Decoder::BerlekampWelch),
        }
    }
}

/// A decoder bound to concrete x-values.
#[derive(Debug, Clone)]
pub enum Decoder {
    Erasure(ErasureDecoder),
    BerlekampWelch(BerlekampWelchDecoder),
}

impl Decoder {
    pub fn decode(&self, ys: &[u8], offset: usize) -> Result<Vec<u8>, MathError> {
        match self {
            Self::Erasure(d) => d.decode(ys, offset),
            Self::BerlekampWelch(d) => d.decode(ys, offset),
        }
    }
}

fn validate_xs(xs: &[u8], k: usize) -> Result<(), MathError> {
    if k == 0 {
        return Err(MathError::InvalidParameters(
            "threshold must be positive".into(),
        ));
    }
    if xs.len() < k {
        return Err(MathError::InvalidParameters(format!(
            "{} x-values provided, at least {} required",
            xs.len(),
            k
        )));
    }
    let mut seen = [false; 256];
    for &x in xs {
        if x == 0 {
            return Err(MathError::InvalidParameters(
                "x-values must be non-zero".into(),
            ));
        }
        if seen[x as usize] {
            return Err(MathError::InvalidParameters(format!(
                "duplicate x-value {}",
                x
            )));
        }
        seen[x as usize] = true;
    }
    Ok(())
}

/// Evaluate `coeffs` at `offset..offset + k`.
fn evaluate_window(coeffs: &[u8], offset: usize, k: usize) -> Result<Vec<u8>, MathError> {
    if offset + k > 256 {
        return Err(MathError::InvalidParameters(format!(
            "evaluation window {}..{} leaves the field",
            offset,
            offset + k
        )));
    }
    Ok((offset..offset + k)
        .map(|x| poly_eval(coeffs, x as u8))
        .collect())
}

/// Lagrange-style erasure decoder.
///
/// The k×k Vandermonde system over the first `k` x-values is inverted once
/// at construction; every `decode` call is a matrix–vector product plus the
/// evaluation window.
#[derive(Debug, Clone)]
pub struct ErasureDecoder {
    inv: GfMatrix,
    k: usize,
}

impl ErasureDecoder {
    pub fn new(xs: &[u8], k: usize) -> Result<Self, MathError> {
        validate_xs(xs, k)?;
        let rows = xs[..k]
            .iter()
            .map(|&x| (0..k).map(|j| gf_pow(x, j)).collect())
            .collect();
        // Distinct non-zero x-values make the system regular; dependent-row
        // elimination still guards redundant input.
        let inv = GfMatrix::new(rows)?.inverse_elim_dep_rows()?;
        Ok(Self { inv, k })
    }

    pub fn decode(&self, ys: &[u8], offset: usize) -> Result<Vec<u8>, MathError> {
        if ys.len() < self.k {
            return Err(MathError::Unsolvable(format!(
                "{} y-values provided, {} required",
                ys.len(),
                self.k
            )));
        }
        let coeffs = self.inv.right_multiply(&ys[..self.k])?;
        evaluate_window(&coeffs, offset, self.k)
    }
}

/// Berlekamp–Welch error-correcting decoder.
///
/// Finds the message polynomial `P` and an error-locator `E` (monic, degree
/// `e = (m - k) / 2`) satisfying `Q(x_i) = y_i · E(x_i)` with `Q = P · E`,
/// which tolerates up to `e` corrupted y-values.
#[derive(Debug, Clone)]
pub struct BerlekampWelchDecoder {
    xs: Vec<u8>,
    k: usize,
    e: usize,
}

impl BerlekampWelchDecoder {
    pub fn new(xs: &[u8], k: usize) -> Result<Self, MathError> {
        validate_xs(xs, k)?;
        let e = (xs.len() - k) / 2;
        Ok(Self {
            xs: xs.to_vec(),
            k,
            e,
        })
    }

    /// Maximum number of corrupted y-values this decoder corrects.
    pub fn max_errors(&self) -> usize {
        self.e
    }

    pub fn decode(&self, ys: &[u8], offset: usize) -> Result<Vec<u8>, MathError> {
        let m = self.xs.len();
        if ys.len() != m {
            return Err(MathError::InvalidParameters(format!(
                "{} y-values provided for {} x-values",
                ys.len(),
                m
            )));
        }

        // Unknowns: the k+e coefficients of Q followed by the e non-leading
        // coefficients of E. Row i encodes
        //   Q(x_i) + y_i·(E(x_i) - x_i^e) = y_i·x_i^e
        let q_len = self.k + self.e;
        let rows: Vec<Vec<u8>> = self
            .xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| {
                (0..q_len)
                    .map(|j| gf_pow(x, j))
                    .chain((0..self.e).map(|j| gf_mul(y, gf_pow(x, j))))
                    .collect()
            })
            .collect();
        let rhs: Vec<u8> = self
            .xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| gf_mul(y, gf_pow(x, self.e)))
            .collect();

        let solution = GfMatrix::new(rows)?.solve(&rhs)?;
        let (q, e_low) = solution.split_at(q_len);
        let mut locator = e_low.to_vec();
        locator.push(1); // monic

        let (p, remainder) = poly_div(q, &locator);
        if remainder.iter().any(|&c| c != 0) {
            return Err(MathError::Unsolvable(
                "more errors than the decoder can correct".into(),
            ));
        }
        evaluate_window(&p, offset, self.k)
    }
}

fn poly_degree(p: &[u8]) -> usize {
    p.iter().rposition(|&c| c != 0).unwrap_or(0)
}

/// Polynomial long division, returning (quotient, remainder).
///
/// The divisor must have a non-zero leading coefficient (the error locator
/// is monic).
fn poly_div(num: &[u8], den: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let den_deg = poly_degree(den);
    debug_assert_ne!(den[den_deg], 0);
    let num_deg = poly_degree(num);

    let mut rem = num.to_vec();
    if num_deg < den_deg {
        return (vec![0], rem);
    }

    let mut quot = vec![0u8; num_deg - den_deg + 1];
    for d in (den_deg..=num_deg).rev() {
        let coef = gf_div(rem[d], den[den_deg]);
        quot[d - den_deg] = coef;
        if coef != 0 {
            for j in 0..=den_deg {
                rem[d - den_deg + j] ^= gf_mul(den[j], coef);
            }
        }
    }
    rem.truncate(den_deg);
    (quot, rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluate `coeffs` at each x.
    fn codeword(coeffs: &[u8], xs: &[u8]) -> Vec<u8> {
        xs.iter().map(|&x| poly_eval(coeffs, x)).collect()
    }

    #[test]
    fn test_poly_div_exact() {
        // (x + 3)(x + 5) = x^2 + 6x + 15
        let product = [15u8, 6, 1];
        let (quot, rem) = poly_div(&product, &[3, 1]);
        assert_eq!(quot, vec![5, 1]);
        assert!(rem.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_poly_div_with_remainder() {
        // x^2 divided by (x + 1): quotient x + 1, remainder 1
        let (quot, rem) = poly_div(&[0, 0, 1], &[1, 1]);
        assert_eq!(quot, vec![1, 1]);
        assert_eq!(rem, vec![1]);
    }

    #[test]
    fn test_erasure_recovers_evaluations() {
        let coeffs = [0xDE, 0x13, 0x7A];
        let xs = [1u8, 2, 3, 4, 5];
        let ys = codeword(&coeffs, &xs);
        let decoder = ErasureDecoder::new(&xs, 3).unwrap();
        let out = decoder.decode(&ys, 0).unwrap();
        assert_eq!(out, codeword(&coeffs, &[0, 1, 2]));
        assert_eq!(out[0], 0xDE);
    }

    #[test]
    fn test_erasure_with_exactly_k_shares() {
        let coeffs = [42u8, 7];
        let xs = [3u8, 9];
        let ys = codeword(&coeffs, &xs);
        let decoder = ErasureDecoder::new(&xs, 2).unwrap();
        assert_eq!(decoder.decode(&ys, 0).unwrap()[0], 42);
    }

    #[test]
    fn test_erasure_offset_window() {
        let coeffs = [9u8, 1];
        let xs = [1u8, 2];
        let ys = codeword(&coeffs, &xs);
        let decoder = ErasureDecoder::new(&xs, 2).unwrap();
        assert_eq!(decoder.decode(&ys, 5).unwrap(), codeword(&coeffs, &[5, 6]));
        assert!(matches!(
            decoder.decode(&ys, 255),
            Err(MathError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_erasure_too_few_y_values() {
        let decoder = ErasureDecoder::new(&[1, 2, 3], 3).unwrap();
        assert!(matches!(
            decoder.decode(&[1, 2], 0),
            Err(MathError::Unsolvable(_))
        ));
    }

    #[test]
    fn test_invalid_x_values_rejected() {
        assert!(ErasureDecoder::new(&[0, 1, 2], 3).is_err());
        assert!(ErasureDecoder::new(&[1, 1, 2], 3).is_err());
        assert!(ErasureDecoder::new(&[1, 2], 3).is_err());
        assert!(BerlekampWelchDecoder::new(&[1, 2], 0).is_err());
    }

    #[test]
    fn test_bw_without_errors() {
        let coeffs = [0x48u8, 0x65, 0x6C];
        let xs = [1u8, 2, 3, 4, 5, 6, 7];
        let ys = codeword(&coeffs, &xs);
        let decoder = BerlekampWelchDecoder::new(&xs, 3).unwrap();
        assert_eq!(decoder.max_errors(), 2);
        assert_eq!(decoder.decode(&ys, 0).unwrap(), codeword(&coeffs, &[0, 1, 2]));
    }

    #[test]
    fn test_bw_corrects_up_to_e_errors() {
        let coeffs = [0xA5u8, 0x0F, 0x33];
        let xs = [1u8, 2, 3, 4, 5, 6, 7];
        let clean = codeword(&coeffs, &xs);
        let decoder = BerlekampWelchDecoder::new(&xs, 3).unwrap();

        // every pair of corrupted positions
        for a in 0..xs.len() {
            for b in a + 1..xs.len() {
                let mut ys = clean.clone();
                ys[a] ^= 0x5C;
                ys[b] ^= 0xD1;
                let out = decoder.decode(&ys, 0).unwrap();
                assert_eq!(out[0], 0xA5, "failed for corrupted positions {a},{b}");
            }
        }
    }

    #[test]
    fn test_bw_single_error_with_redundancy() {
        // m = k + 2 gives e = 1
        let coeffs = [0x77u8, 0x21];
        let xs = [1u8, 2, 3, 4];
        let mut ys = codeword(&coeffs, &xs);
        ys[2] ^= 0xFF;
        let decoder = BerlekampWelchDecoder::new(&xs, 2).unwrap();
        assert_eq!(decoder.decode(&ys, 0).unwrap()[0], 0x77);
    }

    #[test]
    fn test_bw_beyond_capacity_never_returns_original() {
        // Three flips against a capacity of two: decoding must either fail
        // or produce a different polynomial, never silently the original.
        let coeffs = [0xA5u8, 0x0F, 0x33];
        let xs = [1u8, 2, 3, 4, 5, 6, 7];
        let mut ys = codeword(&coeffs, &xs);
        ys[0] ^= 0x11;
        ys[3] ^= 0x22;
        ys[6] ^= 0x44;
        let decoder = BerlekampWelchDecoder::new(&xs, 3).unwrap();
        match decoder.decode(&ys, 0) {
            Err(MathError::Unsolvable(_)) => {}
            Err(other) => panic!("unexpected error kind: {other}"),
            Ok(out) => assert_ne!(out, codeword(&coeffs, &[0, 1, 2])),
        }
    }

    #[test]
    fn test_bw_odd_surplus_detects_single_corruption() {
        // m = k + 1 leaves no correction capacity but one consistency check.
        let coeffs = [0x01u8, 0x02];
        let xs = [1u8, 2, 3];
        let mut ys = codeword(&coeffs, &xs);
        let decoder = BerlekampWelchDecoder::new(&xs, 2).unwrap();
        assert_eq!(decoder.decode(&ys, 0).unwrap()[0], 0x01);
        ys[1] ^= 0x80;
        assert!(decoder.decode(&ys, 0).is_err());
    }

    #[test]
    fn test_bw_all_zero_secret() {
        let xs = [1u8, 2, 3, 4, 5];
        let ys = [0u8; 5];
        let decoder = BerlekampWelchDecoder::new(&xs, 3).unwrap();
        assert_eq!(decoder.decode(&ys, 0).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_policy_builds_matching_decoder() {
        let xs = [1u8, 2, 3];
        assert!(matches!(
            DecoderPolicy::Erasure.build(&xs, 2).unwrap(),
            Decoder::Erasure(_)
        ));
        assert!(matches!(
            DecoderPolicy::BerlekampWelch.build(&xs, 2).unwrap(),
            Decoder::BerlekampWelch(_)
        ));
    }
}
