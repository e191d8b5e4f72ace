//! # Genesis Claims
//!
//! Loading and verification of the signed claims that seed a ledger's
//! initial balances.
//!
//! ## Overview
//!
//! A genesis claim assigns an amount to an address and carries a
//! recoverable secp256k1 signature from that address's key. A genesis
//! bundle is a canonical CBOR array of encoded claims.
//!
//! - **Claims**: validated on construction, immutable afterwards
//! - **Verification**: fail-closed; malformed input yields `false`, never a panic
//! - **Loading**: all-or-nothing; the first bad claim aborts the bootstrap
//!
//! ## Usage
//!
//! ```rust
//! use genesis_claims::{bundle_claims, ClaimBuilder, GenesisLoader, Keypair, LoaderConfig};
//!
//! let keypair = Keypair::from_secret_bytes(&[0x42; 32]).unwrap();
//! let claim = ClaimBuilder::new(keypair.address(), 1000).sign(&keypair).unwrap();
//! assert!(claim.verify());
//!
//! let bundle = bundle_claims(&[claim]);
//! let genesis = GenesisLoader::new(LoaderConfig::default())
//!     .load_bundle(&bundle)
//!     .unwrap();
//! assert_eq!(genesis.len(), 1);
//! ```
//!
//! ## Re-exports
//!
//! - `genesis_claims::core` - Core primitives (GenesisClaim, Address, codec, crypto)

pub mod error;
pub mod loader;

pub use genesis_claims_core as core;

pub use error::{LoaderError, Result};
pub use loader::{bundle_claims, GenesisLoader, GenesisSet, LoaderConfig};

pub use genesis_claims_core::{
    Address, ClaimBuilder, ClaimDescriptor, ClaimError, ClaimVerifier, CryptoError, Diagnostic,
    DiagnosticSink, GenesisClaim, Keypair, NullSink, TracingSink,
};
