//! The genesis loader: turns a bundle of encoded claims into a verified set.
//!
//! Loading is all-or-nothing. Claims are decoded and validated in order,
//! then verified (in parallel by default). The first failing claim aborts
//! the load.

use std::sync::Arc;

use genesis_claims_core::{
    bundle_len, decode_bundle, encode_bundle, AddressOf, Blake3Address, Blake3Digest, CborCodec,
    ClaimVerifier, DiagnosticSink, DigestFn, GenesisClaim, Secp256k1Recovery, SignatureRecovery,
    TracingSink,
};

use crate::error::{LoaderError, Result};

/// Configuration for the loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Whether to verify claim signatures after decoding.
    pub verify_signatures: bool,
    /// Whether to verify claims across worker threads.
    pub parallel: bool,
    /// Upper bound on the number of claims in one genesis.
    pub max_claims: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            verify_signatures: true,
            parallel: true,
            max_claims: 1_000_000,
        }
    }
}

/// An ordered set of decoded, validated, and (if configured) verified claims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenesisSet {
    claims: Vec<GenesisClaim>,
}

impl GenesisSet {
    /// Get the claims in bundle order.
    pub fn claims(&self) -> &[GenesisClaim] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn into_claims(self) -> Vec<GenesisClaim> {
        self.claims
    }

    /// Re-encode the set as a canonical bundle.
    pub fn to_bundle(&self) -> Vec<u8> {
        bundle_claims(&self.claims)
    }
}

/// Encode claims as a canonical genesis bundle.
pub fn bundle_claims(claims: &[GenesisClaim]) -> Vec<u8> {
    let encoded: Vec<Vec<u8>> = claims.iter().map(GenesisClaim::encode).collect();
    encode_bundle(&encoded)
}

/// Loads genesis claims.
pub struct GenesisLoader<D = Blake3Digest, R = Secp256k1Recovery, A = Blake3Address> {
    config: LoaderConfig,
    verifier: ClaimVerifier<D, R, A>,
    sink: Arc<dyn DiagnosticSink>,
}

impl GenesisLoader {
    /// Create a loader with the production verifier.
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_verifier(config, ClaimVerifier::production())
    }
}

impl<D, R, A> GenesisLoader<D, R, A>
where
    D: DigestFn,
    R: SignatureRecovery,
    A: AddressOf,
{
    /// Create a loader with explicit verification collaborators.
    pub fn with_verifier(config: LoaderConfig, verifier: ClaimVerifier<D, R, A>) -> Self {
        Self {
            config,
            verifier,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink used while decoding claims.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load a canonical bundle (CBOR array of encoded claims).
    ///
    /// The claim limit is checked against the array head before any entry
    /// is decoded.
    pub fn load_bundle(&self, bytes: &[u8]) -> Result<GenesisSet> {
        let count = bundle_len(bytes).map_err(LoaderError::Bundle)?;
        self.check_count(count)?;

        let entries = decode_bundle(bytes).map_err(LoaderError::Bundle)?;
        self.load_claims(&entries)
    }

    /// Load individually encoded claims.
    pub fn load_claims<B: AsRef<[u8]>>(&self, encoded: &[B]) -> Result<GenesisSet> {
        self.check_count(encoded.len())?;

        tracing::info!(count = encoded.len(), "loading genesis claims");

        let mut claims = Vec::with_capacity(encoded.len());
        for (index, bytes) in encoded.iter().enumerate() {
            let claim = GenesisClaim::decode_with(bytes.as_ref(), &CborCodec, self.sink.as_ref())
                .map_err(|source| {
                    tracing::warn!(index, error = %source, "rejecting genesis claim");
                    LoaderError::Claim { index, source }
                })?;
            claims.push(claim);
        }

        if self.config.verify_signatures {
            self.verify_all(&claims)?;
        }

        tracing::info!(claims = claims.len(), "genesis claims loaded");
        Ok(GenesisSet { claims })
    }

    fn check_count(&self, count: usize) -> Result<()> {
        if count > self.config.max_claims {
            return Err(LoaderError::TooManyClaims {
                count,
                max: self.config.max_claims,
            });
        }
        Ok(())
    }

    fn verify_all(&self, claims: &[GenesisClaim]) -> Result<()> {
        let verdicts: Vec<bool> = if self.config.parallel {
            self.verifier.verify_batch(claims)
        } else {
            claims.iter().map(|claim| self.verifier.verify(claim)).collect()
        };

        if let Some(index) = verdicts.iter().position(|ok| !ok) {
            let to = *claims[index].to();
            tracing::warn!(index, %to, "genesis claim failed verification");
            return Err(LoaderError::Unverified { index, to });
        }

        tracing::debug!(
            verified = claims.len(),
            parallel = self.config.parallel,
            "genesis signatures verified"
        );
        Ok(())
    }
}
