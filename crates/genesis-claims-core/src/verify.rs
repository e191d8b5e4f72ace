//! Claim verification: the consensus-critical path.
//!
//! Verification is fail-closed. Every anomaly (bad recovery id, malformed
//! signature, off-curve point, a panicking collaborator) yields `false`.
//! Nothing here mutates state, so claims verify independently in parallel.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::claim::GenesisClaim;
use crate::crypto::{
    AddressOf, Blake3Address, Blake3Digest, DigestFn, Secp256k1Recovery, SignatureRecovery,
};

/// Verifies claims against a set of cryptographic collaborators.
#[derive(Debug, Clone, Default)]
pub struct ClaimVerifier<D = Blake3Digest, R = Secp256k1Recovery, A = Blake3Address> {
    digest: D,
    recovery: R,
    address: A,
}

impl ClaimVerifier {
    /// Verifier backed by Blake3 digests, secp256k1 recovery and Blake3 addresses.
    pub fn production() -> Self {
        Self::new(Blake3Digest, Secp256k1Recovery, Blake3Address)
    }
}

impl<D, R, A> ClaimVerifier<D, R, A>
where
    D: DigestFn,
    R: SignatureRecovery,
    A: AddressOf,
{
    /// Create a verifier from explicit collaborators.
    pub fn new(digest: D, recovery: R, address: A) -> Self {
        Self {
            digest,
            recovery,
            address,
        }
    }

    /// Verify a single claim.
    ///
    /// 1. Reject a claim without signature material
    /// 2. Digest the signable fields (`to`, `amount`)
    /// 3. Recover the signer's public key
    /// 4. Derive its address and require it to equal `to`
    /// 5. Check the signature against the recovered key
    pub fn verify(&self, claim: &GenesisClaim) -> bool {
        if claim.signature().is_empty() {
            return false;
        }

        panic::catch_unwind(AssertUnwindSafe(|| self.verify_inner(claim))).unwrap_or(false)
    }

    fn verify_inner(&self, claim: &GenesisClaim) -> bool {
        let digest = self.digest.digest(&claim.signable_bytes());

        let public_key = match self
            .recovery
            .recover(&digest, claim.signature(), claim.recovery())
        {
            Ok(pk) => pk,
            Err(_) => return false,
        };

        if self.address.address_of(&public_key) != *claim.to() {
            return false;
        }

        self.recovery.verify(&digest, claim.signature(), &public_key)
    }

    /// Verify many claims in parallel. Results are in input order.
    pub fn verify_batch(&self, claims: &[GenesisClaim]) -> Vec<bool> {
        claims.par_iter().map(|claim| self.verify(claim)).collect()
    }
}
