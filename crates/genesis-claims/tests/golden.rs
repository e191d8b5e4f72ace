//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of genesis claims must produce identical:
//! - signable_bytes (SIGN_DOMAIN || {0: to, 1: amount})
//! - digest (blake3 of signable_bytes)
//! - signature and recovery id (deterministic RFC 6979 secp256k1)
//! - claim_bytes (canonical CBOR)
//! - address (blake3 of the compressed public key, first 20 bytes)

use genesis_claims::core::{canonical, CborCodec, RecordingSink, SIGN_DOMAIN};
use genesis_claims::{
    bundle_claims, ClaimBuilder, ClaimError, Diagnostic, GenesisClaim, GenesisLoader, Keypair,
    LoaderConfig,
};
use genesis_claims_testkit::fixtures::{high_s_twin, rebuild};
use genesis_claims_testkit::vectors::{all_vectors, signable_vector};
use serde::{Deserialize, Serialize};

/// A single golden test vector.
#[derive(Debug, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub secret: String, // 32 bytes hex
    pub amount: u64,

    // Derived outputs (hex)
    pub public_key: String, // 33 bytes, compressed SEC1
    pub address: String,    // 20 bytes
    pub signable_bytes: String,
    pub digest: String,    // 32 bytes
    pub signature: String, // 64 bytes, r || s
    pub recovery: u32,
    pub claim_bytes: String,
}

fn generate_vector(name: &str, description: &str, secret: [u8; 32], amount: u64) -> GoldenVector {
    let keypair = Keypair::from_secret_bytes(&secret).unwrap();
    let claim = ClaimBuilder::new(keypair.address(), amount)
        .sign(&keypair)
        .unwrap();

    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        secret: hex::encode(secret),
        amount,
        public_key: keypair.public_key().to_hex(),
        address: keypair.address().to_hex(),
        signable_bytes: hex::encode(claim.signable_bytes()),
        digest: claim.digest().to_hex(),
        signature: hex::encode(claim.signature()),
        recovery: claim.recovery(),
        claim_bytes: hex::encode(claim.encode()),
    }
}

/// Generate all signed golden vectors.
pub fn generate_all_vectors() -> Vec<GoldenVector> {
    vec![
        generate_vector("zero_amount", "Claim for nothing", [0x01; 32], 0),
        generate_vector("small_amount", "Amount encoded inline", [0x02; 32], 23),
        generate_vector("one_byte_amount", "Amount at the one-byte boundary", [0x03; 32], 24),
        generate_vector("thousand", "Typical allocation", [0x04; 32], 1000),
        generate_vector("u32_max", "Four-byte amount", [0x05; 32], u64::from(u32::MAX)),
        generate_vector("u64_max", "Largest representable amount", [0x06; 32], u64::MAX),
        generate_vector("seed_42", "Key used throughout the docs", [0x42; 32], 1_000_000),
    ]
}

#[test]
fn test_vectors_deterministic() {
    let v1 = generate_all_vectors();
    let v2 = generate_all_vectors();

    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_eq!(a.signable_bytes, b.signable_bytes, "signable_bytes mismatch for {}", a.name);
        assert_eq!(a.signature, b.signature, "signature mismatch for {}", a.name);
        assert_eq!(a.recovery, b.recovery, "recovery mismatch for {}", a.name);
        assert_eq!(a.claim_bytes, b.claim_bytes, "claim_bytes mismatch for {}", a.name);
    }
}

#[test]
fn test_vectors_verify_from_json() {
    let json = serde_json::to_string(&generate_all_vectors()).unwrap();
    let vectors: Vec<GoldenVector> = serde_json::from_str(&json).unwrap();

    for v in &vectors {
        let bytes = hex::decode(&v.claim_bytes).unwrap();
        let claim = GenesisClaim::decode(&bytes).unwrap();

        assert!(claim.verify(), "verify failed for {}", v.name);
        assert_eq!(claim.to().to_hex(), v.address, "address mismatch for {}", v.name);
        assert_eq!(claim.amount(), v.amount, "amount mismatch for {}", v.name);
        assert_eq!(claim.recovery(), v.recovery, "recovery mismatch for {}", v.name);
        assert_eq!(claim.digest().to_hex(), v.digest, "digest mismatch for {}", v.name);
        assert!(
            v.signable_bytes.starts_with(&hex::encode(SIGN_DOMAIN)),
            "signable_bytes must start with the domain for {}",
            v.name
        );
    }
}

#[test]
fn test_vectors_load_as_genesis() {
    let claims: Vec<GenesisClaim> = generate_all_vectors()
        .iter()
        .map(|v| GenesisClaim::decode(&hex::decode(&v.claim_bytes).unwrap()).unwrap())
        .collect();

    let set = GenesisLoader::new(LoaderConfig::default())
        .load_bundle(&bundle_claims(&claims))
        .unwrap();
    assert_eq!(set.len(), claims.len());
}

#[test]
fn test_encoding_vectors() {
    for vector in all_vectors() {
        let claim = genesis_claims_testkit::claim_from_vector(&vector);
        assert_eq!(hex::encode(claim.encode()), vector.expected_encoding, "{}", vector.name);
    }
}

#[test]
fn print_golden_vectors_json() {
    #[derive(Serialize)]
    struct VectorFile {
        version: String,
        description: String,
        domain_sign: String,
        signable_example: String,
        vectors: Vec<GoldenVector>,
    }

    let file = VectorFile {
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Golden test vectors for genesis claims. Every implementation must produce identical outputs.".to_string(),
        domain_sign: String::from_utf8_lossy(SIGN_DOMAIN).to_string(),
        signable_example: signable_vector(),
        vectors: generate_all_vectors(),
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    println!("{}", json);
}

// =============================================================================
// REJECTION TEST VECTORS
// These test that invalid inputs are properly rejected.
// =============================================================================

fn valid_bytes() -> Vec<u8> {
    let keypair = Keypair::from_secret_bytes(&[0x42; 32]).unwrap();
    ClaimBuilder::new(keypair.address(), 1000)
        .sign(&keypair)
        .unwrap()
        .encode()
}

#[test]
fn test_reject_trailing_bytes() {
    let mut bytes = valid_bytes();
    bytes.push(0x00);
    assert!(GenesisClaim::decode(&bytes).is_err(), "must reject trailing bytes");
}

#[test]
fn test_reject_truncated() {
    let bytes = valid_bytes();
    for len in [0, 1, 10, bytes.len() - 1] {
        assert!(GenesisClaim::decode(&bytes[..len]).is_err(), "must reject {len}-byte prefix");
    }
}

#[test]
fn test_reject_non_minimal_amount() {
    // amount 1000 encoded with an 8-byte argument instead of 2
    let hex_bytes = format!(
        "a40054{}011b00000000000003e8025840{}0301",
        "11".repeat(20),
        "22".repeat(64)
    );
    let bytes = hex::decode(hex_bytes).unwrap();
    assert!(GenesisClaim::decode(&bytes).is_err(), "must reject non-minimal integers");
}

#[test]
fn test_reject_unsorted_keys() {
    // amount before to
    let hex_bytes = format!(
        "a4011903e80054{}025840{}0301",
        "11".repeat(20),
        "22".repeat(64)
    );
    let bytes = hex::decode(hex_bytes).unwrap();
    assert!(GenesisClaim::decode(&bytes).is_err(), "must reject unsorted map keys");
}

#[test]
fn test_reject_unknown_key() {
    let hex_bytes = format!(
        "a50054{}011903e8025840{}03010400",
        "11".repeat(20),
        "22".repeat(64)
    );
    let bytes = hex::decode(hex_bytes).unwrap();
    assert!(GenesisClaim::decode(&bytes).is_err(), "must reject unknown fields");
}

#[test]
fn test_reject_missing_recovery() {
    let hex_bytes = format!("a30054{}011903e8025840{}", "11".repeat(20), "22".repeat(64));
    let bytes = hex::decode(hex_bytes).unwrap();
    assert_eq!(
        GenesisClaim::decode(&bytes).unwrap_err(),
        ClaimError::MissingField("recovery")
    );
}

#[test]
fn test_reject_short_address() {
    let hex_bytes = format!("a40053{}011903e8025840{}0301", "11".repeat(19), "22".repeat(64));
    let bytes = hex::decode(hex_bytes).unwrap();
    assert!(GenesisClaim::decode(&bytes).is_err(), "must reject 19-byte address");
}

#[test]
fn test_domain_prefix_exact_bytes() {
    assert_eq!(SIGN_DOMAIN, b"genesis-claim/sig/v1");
    assert_eq!(SIGN_DOMAIN.len(), 20);
    assert!(SIGN_DOMAIN.iter().all(|&b| b != 0));

    let to = genesis_claims::Address::from_bytes([0x11; 20]);
    assert_eq!(hex::encode(canonical::signable_bytes(&to, 1000)), signable_vector());
}

// =============================================================================
// AMOUNT EDGE VECTORS
// =============================================================================

fn claim_hex_with_amount(amount_hex: &str) -> Vec<u8> {
    let hex_bytes = format!(
        "a40054{}01{}025840{}0301",
        "11".repeat(20),
        amount_hex,
        "22".repeat(64)
    );
    hex::decode(hex_bytes).unwrap()
}

#[test]
fn test_bignum_amounts_are_invalid_amounts() {
    let cases = [
        ("c249010000000000000000", 1i128 << 64),
        ("c349010000000000000000", -(1i128 << 64) - 1),
    ];

    for (amount_hex, raw) in cases {
        let sink = RecordingSink::new();
        let bytes = claim_hex_with_amount(amount_hex);

        let result = GenesisClaim::decode_with(&bytes, &CborCodec, &sink);

        assert_eq!(result.unwrap_err(), ClaimError::InvalidAmount(raw), "{amount_hex}");
        assert_eq!(sink.events(), vec![Diagnostic::InvalidAmount { raw }], "{amount_hex}");
    }
}

#[test]
fn test_reject_malformed_amount_encodings() {
    let cases = [
        // 17-byte bignum
        format!("c251{}", "01".repeat(17)),
        // beyond i128, both signs
        format!("c250{}", "ff".repeat(16)),
        format!("c350{}", "ff".repeat(16)),
        // non-minimal bignums
        "c24101".to_string(),
        "c24a00010000000000000000".to_string(),
        // half float 1.0
        "f93c00".to_string(),
        // tag 1 around an integer
        "c101".to_string(),
    ];

    for amount_hex in cases {
        let sink = RecordingSink::new();
        let bytes = claim_hex_with_amount(&amount_hex);

        assert!(
            matches!(
                GenesisClaim::decode_with(&bytes, &CborCodec, &sink),
                Err(ClaimError::DecodeError(_))
            ),
            "must reject amount {amount_hex}"
        );
        assert!(sink.events().is_empty(), "{amount_hex}");
    }
}

#[test]
fn test_reject_high_s_signature() {
    let keypair = Keypair::from_secret_bytes(&[0x42; 32]).unwrap();
    let claim = ClaimBuilder::new(keypair.address(), 1000)
        .sign(&keypair)
        .unwrap();
    assert!(claim.verify());

    let twin = high_s_twin(claim.signature());
    for recovery in [claim.recovery() ^ 1, claim.recovery()] {
        let malleated = rebuild(&claim, |d| {
            d.signature = Some(twin.clone().into());
            d.recovery = Some(recovery);
        })
        .unwrap();

        assert!(!malleated.verify(), "high-S twin with recovery {recovery} must not verify");
    }
}
