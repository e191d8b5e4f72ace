//! Error types for genesis claims.

use thiserror::Error;

/// Errors raised while building or decoding a claim.
///
/// Any of these means the input must be rejected outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("{0} not defined in input")]
    MissingField(&'static str),

    #[error("signature supplied twice: descriptor already carries one")]
    DuplicateSignatureField,

    #[error("recovery supplied twice: descriptor already carries one")]
    DuplicateRecoveryField,

    #[error("amount {0} is not representable as an unsigned 64-bit value")]
    InvalidAmount(i128),

    #[error("decoding error: {0}")]
    DecodeError(String),
}

/// Errors from the cryptographic collaborators.
///
/// These never leave [`crate::verify`]; verification folds them into `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u32),

    #[error("invalid signature encoding")]
    InvalidSignature,

    #[error("failed to recover public key")]
    RecoveryFailed,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("signing failed")]
    SigningFailed,
}
