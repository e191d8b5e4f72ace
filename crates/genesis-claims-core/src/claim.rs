//! Genesis claim: an initial balance assigned to an address, authorized by
//! a recoverable secp256k1 signature from that address's key.
//!
//! A [`GenesisClaim`] only exists in validated form. Partial or unchecked
//! input lives in a [`ClaimDescriptor`] until it passes validation.

use bytes::Bytes;

use crate::canonical::{self, CborCodec, WireCodec};
use crate::crypto::{AddressOf, Blake3Digest, DigestFn, Keypair, SignatureRecovery};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{ClaimError, CryptoError};
use crate::types::{Address, ClaimDigest};
use crate::verify::ClaimVerifier;

/// Unvalidated claim fields, as decoded from the wire or assembled by a caller.
///
/// `amount` is wide enough to hold negative and beyond-64-bit inputs so they
/// can be rejected instead of silently wrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimDescriptor {
    pub to: Option<Address>,
    pub amount: Option<i128>,
    pub signature: Option<Bytes>,
    pub recovery: Option<u32>,
}

impl ClaimDescriptor {
    /// Start a descriptor with recipient and amount, unsigned.
    pub fn new(to: Address, amount: impl Into<i128>) -> Self {
        Self {
            to: Some(to),
            amount: Some(amount.into()),
            signature: None,
            recovery: None,
        }
    }

    /// Set the signature.
    pub fn with_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Set the recovery id.
    pub fn with_recovery(mut self, recovery: u32) -> Self {
        self.recovery = Some(recovery);
        self
    }
}

/// A validated genesis claim. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisClaim {
    to: Address,
    amount: u64,
    signature: Bytes,
    recovery: u32,
}

impl GenesisClaim {
    /// Build a claim from an optional descriptor plus separately supplied
    /// signature and recovery id.
    ///
    /// A piece supplied both ways is a conflict, never a silent preference.
    pub fn build(
        descriptor: Option<ClaimDescriptor>,
        signature: Option<&[u8]>,
        recovery: Option<u32>,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ClaimError> {
        let mut descriptor = descriptor.unwrap_or_default();

        if let Some(signature) = signature {
            if descriptor.signature.is_some() {
                return Err(ClaimError::DuplicateSignatureField);
            }
            descriptor.signature = Some(Bytes::copy_from_slice(signature));
        }

        if let Some(recovery) = recovery {
            if descriptor.recovery.is_some() {
                return Err(ClaimError::DuplicateRecoveryField);
            }
            descriptor.recovery = Some(recovery);
        }

        Self::from_descriptor(&descriptor, sink)
    }

    /// Validate a complete descriptor.
    pub fn from_descriptor(
        descriptor: &ClaimDescriptor,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ClaimError> {
        let to = descriptor.to.ok_or(ClaimError::MissingField("to"))?;
        let raw_amount = descriptor.amount.ok_or(ClaimError::MissingField("amount"))?;
        let signature = descriptor
            .signature
            .as_ref()
            .ok_or(ClaimError::MissingField("signature"))?;
        let recovery = descriptor
            .recovery
            .ok_or(ClaimError::MissingField("recovery"))?;

        let amount = u64::try_from(raw_amount).map_err(|_| {
            sink.report(Diagnostic::InvalidAmount { raw: raw_amount });
            ClaimError::InvalidAmount(raw_amount)
        })?;

        Ok(Self {
            to,
            amount,
            // Owned copy: the descriptor's buffer may be shared with the caller.
            signature: Bytes::copy_from_slice(signature),
            recovery,
        })
    }

    /// Replace every field from `descriptor`. On error `self` is left unchanged.
    pub fn set(
        &mut self,
        descriptor: &ClaimDescriptor,
        sink: &dyn DiagnosticSink,
    ) -> Result<(), ClaimError> {
        *self = Self::from_descriptor(descriptor, sink)?;
        Ok(())
    }

    /// Decode a claim from canonical wire bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ClaimError> {
        Self::decode_with(bytes, &CborCodec, &TracingSink)
    }

    /// Decode with an explicit codec and diagnostic sink.
    pub fn decode_with(
        bytes: &[u8],
        codec: &dyn WireCodec,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ClaimError> {
        let descriptor = codec.decode(bytes)?;
        Self::build(Some(descriptor), None, None, sink)
    }

    /// Encode to canonical wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        self.encode_with(&CborCodec)
    }

    /// Encode with an explicit codec.
    pub fn encode_with(&self, codec: &dyn WireCodec) -> Vec<u8> {
        codec.encode(&self.to_descriptor())
    }

    /// Convert back into a descriptor (all fields present).
    pub fn to_descriptor(&self) -> ClaimDescriptor {
        ClaimDescriptor {
            to: Some(self.to),
            amount: Some(i128::from(self.amount)),
            signature: Some(self.signature.clone()),
            recovery: Some(self.recovery),
        }
    }

    /// Get the recipient address.
    pub fn to(&self) -> &Address {
        &self.to
    }

    /// Get the claimed amount.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Get the compact signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Get the recovery id.
    pub fn recovery(&self) -> u32 {
        self.recovery
    }

    /// The bytes the signature commits to (recipient and amount only).
    pub fn signable_bytes(&self) -> Vec<u8> {
        canonical::signable_bytes(&self.to, self.amount)
    }

    /// The Blake3 digest of the signable bytes.
    pub fn digest(&self) -> ClaimDigest {
        Blake3Digest.digest(&self.signable_bytes())
    }

    /// Verify the claim with the production collaborators.
    ///
    /// Never panics; every failure is `false`.
    pub fn verify(&self) -> bool {
        ClaimVerifier::production().verify(self)
    }

    /// Verify the claim with explicit collaborators.
    pub fn verify_with<D, R, A>(&self, verifier: &ClaimVerifier<D, R, A>) -> bool
    where
        D: DigestFn,
        R: SignatureRecovery,
        A: AddressOf,
    {
        verifier.verify(self)
    }
}

/// Builder for issuing signed claims.
pub struct ClaimBuilder {
    to: Address,
    amount: u64,
}

impl ClaimBuilder {
    /// Start building a claim.
    pub fn new(to: Address, amount: u64) -> Self {
        Self { to, amount }
    }

    /// Build and sign the claim.
    ///
    /// The signature commits to `(to, amount)`; it only verifies when
    /// `keypair` is the key behind `to`.
    pub fn sign(self, keypair: &Keypair) -> Result<GenesisClaim, CryptoError> {
        let signable = canonical::signable_bytes(&self.to, self.amount);
        let digest = Blake3Digest.digest(&signable);
        let (signature, recovery) = keypair.sign_digest(&digest)?;

        Ok(GenesisClaim {
            to: self.to,
            amount: self.amount,
            signature: Bytes::copy_from_slice(&signature),
            recovery: u32::from(recovery),
        })
    }
}
