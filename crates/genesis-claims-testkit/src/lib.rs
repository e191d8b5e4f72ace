//! # Genesis Claims Testkit
//!
//! Testing utilities for genesis claims.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned canonical encodings for cross-implementation checks
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Signers and tamper helpers for setting up test scenarios
//! - **Fakes**: Deterministic digest/recovery/address collaborators
//!
//! ## Golden Vectors
//!
//! ```rust
//! use genesis_claims_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, hex);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use genesis_claims_testkit::generators::{claim_from_params, ClaimParams};
//!
//! proptest! {
//!     #[test]
//!     fn signed_claims_verify(params: ClaimParams) {
//!         prop_assert!(claim_from_params(&params).verify());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use genesis_claims_testkit::fixtures::{rebuild, TestSigner};
//!
//! let signer = TestSigner::with_seed([0x42; 32]);
//! let claim = signer.claim(1000);
//! let tampered = rebuild(&claim, |d| d.amount = Some(1001)).unwrap();
//! assert!(!tampered.verify());
//! ```

pub mod fakes;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fakes::{fake_address, fake_sign, fake_verifier};
pub use fixtures::{high_s_twin, multi_party_signers, rebuild, TestSigner};
pub use generators::{claim_from_params, ClaimParams};
pub use vectors::{all_vectors, claim_from_vector, verify_all_vectors, GoldenVector};
