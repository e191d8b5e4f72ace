//! Golden test vectors for the claim wire format.
//!
//! These pin the canonical CBOR bytes so any other encoder of genesis
//! claims can be checked against them byte for byte.

use genesis_claims_core::{canonical, Address, ClaimDescriptor, GenesisClaim, NullSink};

/// A golden encoding vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub to: [u8; 20],
    pub amount: u64,
    pub signature: Vec<u8>,
    pub recovery: u32,
    /// Expected canonical encoding (hex).
    pub expected_encoding: String,
}

fn rep(byte: &str, count: usize) -> String {
    byte.repeat(count)
}

/// Get all golden encoding vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "two-byte amount, one recovery",
            to: [0x11; 20],
            amount: 1000,
            signature: vec![0x22; 64],
            recovery: 1,
            expected_encoding: format!(
                "a40054{}011903e8025840{}0301",
                rep("11", 20),
                rep("22", 64)
            ),
        },
        GoldenVector {
            name: "zero address, zero amount",
            to: [0x00; 20],
            amount: 0,
            signature: vec![0xab; 64],
            recovery: 0,
            expected_encoding: format!("a40054{}0100025840{}0300", rep("00", 20), rep("ab", 64)),
        },
        GoldenVector {
            name: "max amount, empty signature",
            to: [0xff; 20],
            amount: u64::MAX,
            signature: vec![],
            recovery: 3,
            expected_encoding: format!("a40054{}011b{}02400303", rep("ff", 20), rep("ff", 8)),
        },
        GoldenVector {
            name: "one-byte length boundary",
            to: [0x01; 20],
            amount: 24,
            signature: vec![0x5a; 64],
            recovery: 23,
            expected_encoding: format!("a40054{}011818025840{}0317", rep("01", 20), rep("5a", 64)),
        },
        GoldenVector {
            name: "out-of-range recovery id",
            to: [0x02; 20],
            amount: 23,
            signature: vec![0x01, 0x02],
            recovery: 256,
            expected_encoding: format!("a40054{}01170242010203190100", rep("02", 20)),
        },
    ]
}

/// Build the claim a vector describes.
pub fn claim_from_vector(vector: &GoldenVector) -> GenesisClaim {
    let descriptor = ClaimDescriptor::new(Address::from_bytes(vector.to), vector.amount)
        .with_signature(vector.signature.clone())
        .with_recovery(vector.recovery);
    GenesisClaim::from_descriptor(&descriptor, &NullSink).expect("golden vectors are well-formed")
}

/// Expected signable bytes for `to = [0x11; 20]`, `amount = 1000` (hex).
pub fn signable_vector() -> String {
    format!(
        "67656e657369732d636c61696d2f7369672f7631a20054{}011903e8",
        rep("11", 20)
    )
}

/// Check every vector against the encoder. Returns `(name, matches, actual_hex)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hex = hex::encode(claim_from_vector(v).encode());
            (v.name.to_string(), hex == v.expected_encoding, hex)
        })
        .collect()
}

/// Check the signable-bytes vector.
pub fn verify_signable_vector() -> bool {
    let to = Address::from_bytes([0x11; 20]);
    hex::encode(canonical::signable_bytes(&to, 1000)) == signable_vector()
}
