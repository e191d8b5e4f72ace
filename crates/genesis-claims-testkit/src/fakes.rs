//! Deterministic fake collaborators.
//!
//! These let claim logic be property-tested without curve arithmetic.
//! A fake "signature" is the signer's public key followed by the first
//! 31 bytes of the digest it commits to.

use genesis_claims_core::{
    canonical, Address, AddressOf, ClaimDescriptor, ClaimDigest, ClaimVerifier, CryptoError,
    DigestFn, GenesisClaim, NullSink, PublicKey, SignatureRecovery, ADDRESS_LEN, PUBLIC_KEY_LEN,
};

const TAG_LEN: usize = 64 - PUBLIC_KEY_LEN;

/// Folds the input into 32 bytes with a rotating xor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldDigest;

impl DigestFn for FoldDigest {
    fn digest(&self, signable: &[u8]) -> ClaimDigest {
        let mut out = [0u8; 32];
        for (i, byte) in signable.iter().enumerate() {
            let slot = i % 32;
            out[slot] = out[slot].rotate_left(3) ^ byte;
        }
        out[31] ^= signable.len() as u8;
        ClaimDigest(out)
    }
}

/// Reads the public key straight out of the signature. Only recovery id 0 is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedKeyRecovery;

impl SignatureRecovery for EmbeddedKeyRecovery {
    fn recover(
        &self,
        _digest: &ClaimDigest,
        signature: &[u8],
        recovery: u32,
    ) -> Result<PublicKey, CryptoError> {
        if recovery != 0 {
            return Err(CryptoError::InvalidRecoveryId(recovery));
        }
        if signature.len() != PUBLIC_KEY_LEN + TAG_LEN {
            return Err(CryptoError::InvalidSignature);
        }
        PublicKey::from_slice(&signature[..PUBLIC_KEY_LEN]).ok_or(CryptoError::RecoveryFailed)
    }

    fn verify(&self, digest: &ClaimDigest, signature: &[u8], public_key: &PublicKey) -> bool {
        signature.len() == PUBLIC_KEY_LEN + TAG_LEN
            && signature[..PUBLIC_KEY_LEN] == public_key.0
            && signature[PUBLIC_KEY_LEN..] == digest.0[..TAG_LEN]
    }
}

/// Address = key bytes 1..21.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPrefixAddress;

impl AddressOf for KeyPrefixAddress {
    fn address_of(&self, public_key: &PublicKey) -> Address {
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&public_key.0[1..1 + ADDRESS_LEN]);
        Address(out)
    }
}

/// A verifier wired to the fakes.
pub fn fake_verifier() -> ClaimVerifier<FoldDigest, EmbeddedKeyRecovery, KeyPrefixAddress> {
    ClaimVerifier::new(FoldDigest, EmbeddedKeyRecovery, KeyPrefixAddress)
}

/// Address the fakes derive for `public_key`.
pub fn fake_address(public_key: &PublicKey) -> Address {
    KeyPrefixAddress.address_of(public_key)
}

/// Issue a claim the fake verifier accepts when `to == fake_address(public_key)`.
pub fn fake_sign(public_key: &PublicKey, to: Address, amount: u64) -> GenesisClaim {
    let digest = FoldDigest.digest(&canonical::signable_bytes(&to, amount));

    let mut signature = Vec::with_capacity(PUBLIC_KEY_LEN + TAG_LEN);
    signature.extend_from_slice(public_key.as_bytes());
    signature.extend_from_slice(&digest.0[..TAG_LEN]);

    let descriptor = ClaimDescriptor::new(to, amount)
        .with_signature(signature)
        .with_recovery(0);
    GenesisClaim::from_descriptor(&descriptor, &NullSink)
        .expect("fake claims are always well-formed")
}
