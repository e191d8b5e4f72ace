//! Error types for genesis loading.

use genesis_claims_core::{Address, ClaimError};
use thiserror::Error;

/// Errors that abort a genesis load. A corrupt genesis is unrecoverable,
/// so the first failure wins.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The bundle itself is malformed.
    #[error("malformed genesis bundle: {0}")]
    Bundle(#[source] ClaimError),

    /// A claim failed to decode or validate.
    #[error("genesis claim {index} rejected: {source}")]
    Claim {
        index: usize,
        #[source]
        source: ClaimError,
    },

    /// A claim's signature does not authorize its recipient.
    #[error("genesis claim {index} to {to} failed verification")]
    Unverified { index: usize, to: Address },

    /// The bundle holds more claims than configured.
    #[error("genesis holds {count} claims, limit is {max}")]
    TooManyClaims { count: usize, max: usize },
}

/// Result type for genesis loading.
pub type Result<T> = std::result::Result<T, LoaderError>;
