//! Test fixtures and helpers.
//!
//! Common setup code for claim tests.

use genesis_claims_core::{
    Address, ClaimBuilder, ClaimDescriptor, ClaimError, GenesisClaim, Keypair, NullSink,
};
use rand::Rng;

/// A signer that issues claims for its own address.
#[derive(Debug, Clone)]
pub struct TestSigner {
    pub keypair: Keypair,
}

impl TestSigner {
    /// Create a signer with a random secret.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let secret: [u8; 32] = rng.gen();
            if let Ok(keypair) = Keypair::from_secret_bytes(&secret) {
                return Self { keypair };
            }
        }
    }

    /// Create with a deterministic secret.
    ///
    /// Panics if `seed` is not a valid secp256k1 scalar.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_secret_bytes(&seed).expect("seed must be a valid scalar"),
        }
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    /// Issue a claim for this signer's own address.
    pub fn claim(&self, amount: u64) -> GenesisClaim {
        self.claim_for(self.address(), amount)
    }

    /// Issue a claim naming an arbitrary recipient, signed by this signer.
    pub fn claim_for(&self, to: Address, amount: u64) -> GenesisClaim {
        ClaimBuilder::new(to, amount)
            .sign(&self.keypair)
            .expect("signing with a valid key succeeds")
    }
}

/// Create deterministic signers for multi-party tests.
pub fn multi_party_signers(count: u8) -> Vec<TestSigner> {
    (0..count)
        .map(|i| {
            let mut seed = [0x01u8; 32];
            seed[0] = i + 1;
            TestSigner::with_seed(seed)
        })
        .collect()
}

/// Rebuild a claim after editing its descriptor, keeping the old signature.
pub fn rebuild(
    claim: &GenesisClaim,
    edit: impl FnOnce(&mut ClaimDescriptor),
) -> Result<GenesisClaim, ClaimError> {
    let mut descriptor = claim.to_descriptor();
    edit(&mut descriptor);
    GenesisClaim::from_descriptor(&descriptor, &NullSink)
}

/// secp256k1 group order, big-endian.
const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

/// The malleated twin of a compact `r || s` signature: `s` replaced by `n - s`.
///
/// A signature that is low-S becomes high-S, and its recovery id parity flips.
/// Panics if `signature` is shorter than 64 bytes.
pub fn high_s_twin(signature: &[u8]) -> Vec<u8> {
    let order = hex::decode(CURVE_ORDER).expect("curve order is valid hex");
    let mut out = signature.to_vec();
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let diff = i16::from(order[i]) - i16::from(signature[32 + i]) - borrow;
        out[32 + i] = diff.rem_euclid(256) as u8;
        borrow = i16::from(diff < 0);
    }
    out
}
