//! Tessera math module
//!
//! Finite-field building blocks for the secret-sharing crates:
//!
//! - [`gf256`] — arithmetic over GF(2⁸) with the AES reducing polynomial
//! - [`matrix`] — Gauss–Jordan matrix operations over the field
//! - [`decoder`] — erasure and Berlekamp–Welch polynomial decoders

pub mod decoder;
pub mod gf256;
pub mod matrix;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("matrix is singular")]
    Singular,
    #[error("system is unsolvable: {0}")]
    Unsolvable(String),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
