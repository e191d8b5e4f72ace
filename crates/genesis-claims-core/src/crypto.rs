//! Cryptographic collaborators for claim verification.
//!
//! The claim logic only sees three narrow traits: [`DigestFn`],
//! [`SignatureRecovery`] and [`AddressOf`]. Production code plugs in
//! Blake3 hashing and secp256k1 recovery via k256; tests may plug in
//! deterministic fakes.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use std::fmt;

use crate::error::CryptoError;
use crate::types::{Address, ClaimDigest, PublicKey, ADDRESS_LEN, PUBLIC_KEY_LEN};

/// Length of a compact `r || s` ECDSA signature.
pub const COMPACT_SIGNATURE_LEN: usize = 64;

/// Produces the fixed-size digest a claim signature commits to.
pub trait DigestFn: Send + Sync {
    fn digest(&self, signable: &[u8]) -> ClaimDigest;
}

/// Recovers a signer's public key from a compact signature.
pub trait SignatureRecovery: Send + Sync {
    /// Recover the public key that produced `signature` over `digest`.
    fn recover(
        &self,
        digest: &ClaimDigest,
        signature: &[u8],
        recovery: u32,
    ) -> Result<PublicKey, CryptoError>;

    /// Check `signature` over `digest` against an explicit public key.
    fn verify(&self, digest: &ClaimDigest, signature: &[u8], public_key: &PublicKey) -> bool;
}

/// Derives a canonical address from a public key.
pub trait AddressOf: Send + Sync {
    fn address_of(&self, public_key: &PublicKey) -> Address;
}

/// Blake3 over the signable bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Digest;

impl DigestFn for Blake3Digest {
    fn digest(&self, signable: &[u8]) -> ClaimDigest {
        ClaimDigest(*blake3::hash(signable).as_bytes())
    }
}

/// secp256k1 ECDSA public key recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignatureRecovery for Secp256k1Recovery {
    fn recover(
        &self,
        digest: &ClaimDigest,
        signature: &[u8],
        recovery: u32,
    ) -> Result<PublicKey, CryptoError> {
        let recovery_id = u8::try_from(recovery)
            .ok()
            .and_then(RecoveryId::from_byte)
            .ok_or(CryptoError::InvalidRecoveryId(recovery))?;

        let sig = parse_signature(signature)?;

        let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;

        Ok(encode_public_key(&key))
    }

    fn verify(&self, digest: &ClaimDigest, signature: &[u8], public_key: &PublicKey) -> bool {
        let sig = match parse_signature(signature) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        let key = match VerifyingKey::from_sec1_bytes(public_key.as_bytes()) {
            Ok(key) => key,
            Err(_) => return false,
        };
        // k256 rejects high-S signatures here.
        key.verify_prehash(digest.as_bytes(), &sig).is_ok()
    }
}

/// First 20 bytes of Blake3 over the compressed SEC1 public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Address;

impl AddressOf for Blake3Address {
    fn address_of(&self, public_key: &PublicKey) -> Address {
        let hash = blake3::hash(public_key.as_bytes());
        let mut address = [0u8; ADDRESS_LEN];
        address.copy_from_slice(&hash.as_bytes()[..ADDRESS_LEN]);
        Address(address)
    }
}

fn parse_signature(bytes: &[u8]) -> Result<Signature, CryptoError> {
    if bytes.len() != COMPACT_SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignature);
    }
    Signature::from_slice(bytes).map_err(|_| CryptoError::InvalidSignature)
}

fn encode_public_key(key: &VerifyingKey) -> PublicKey {
    // A valid key never encodes to the identity, so the compressed form is 33 bytes.
    let point = key.to_encoded_point(true);
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(point.as_bytes());
    PublicKey(out)
}

/// A secp256k1 signing key for tools that issue claims.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Create from 32 secret bytes. Zero and out-of-range scalars are rejected.
    pub fn from_secret_bytes(secret: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key = SigningKey::from_slice(secret).map_err(|_| CryptoError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Get the compressed public key.
    pub fn public_key(&self) -> PublicKey {
        encode_public_key(self.signing_key.verifying_key())
    }

    /// Get the address derived from the public key.
    pub fn address(&self) -> Address {
        Blake3Address.address_of(&self.public_key())
    }

    /// Sign a digest, returning the compact signature and its recovery id.
    ///
    /// Signing is deterministic (RFC 6979) and always produces low-S signatures.
    pub fn sign_digest(
        &self,
        digest: &ClaimDigest,
    ) -> Result<([u8; COMPACT_SIGNATURE_LEN], u8), CryptoError> {
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest.as_bytes())
            .map_err(|_| CryptoError::SigningFailed)?;

        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out.copy_from_slice(&sig.to_bytes());
        Ok((out, recovery_id.to_byte()))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.address())
    }
}
