//! # Genesis Claims Core
//!
//! Pure primitives for genesis claims: records that assign an initial
//! balance to an address and prove, with a recoverable secp256k1
//! signature, that the address's key holder authorized it.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`GenesisClaim`] - A validated, immutable claim
//! - [`ClaimDescriptor`] - Unvalidated claim fields, as decoded or assembled
//! - [`ClaimBuilder`] - Issues signed claims from a [`Keypair`]
//! - [`ClaimVerifier`] - Fail-closed verification over injectable collaborators
//! - [`Address`] - 20-byte identifier derived from a public key
//!
//! ## Canonicalization
//!
//! Claims are encoded as deterministic CBOR. See the [`canonical`] module.
//! The signature commits to `(to, amount)` only.

pub mod canonical;
pub mod claim;
pub mod crypto;
pub mod diagnostics;
pub mod error;
pub mod types;
pub mod verify;

pub use canonical::{
    bundle_len, decode_bundle, encode_bundle, signable_bytes, CborCodec, WireCodec, SIGN_DOMAIN,
};
pub use claim::{ClaimBuilder, ClaimDescriptor, GenesisClaim};
pub use crypto::{
    AddressOf, Blake3Address, Blake3Digest, DigestFn, Keypair, Secp256k1Recovery,
    SignatureRecovery, COMPACT_SIGNATURE_LEN,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, RecordingSink, TracingSink};
pub use error::{ClaimError, CryptoError};
pub use types::{Address, ClaimDigest, PublicKey, ADDRESS_LEN, PUBLIC_KEY_LEN};
pub use verify::ClaimVerifier;
