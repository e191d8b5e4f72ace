//! Canonical CBOR encoding for genesis claims.
//!
//! A claim is a CBOR map with small integer keys, encoded with
//! RFC 8949 Core Deterministic Encoding:
//! - Map keys in ascending encoded order
//! - Integers and lengths use the smallest valid head
//! - Definite lengths only
//! - Amounts beyond 64 bits use bignum tags 2 and 3
//!
//! Decoding accepts exactly one byte sequence per value: anything whose
//! canonical re-encoding differs from the input is rejected.

use bytes::Bytes;
use ciborium::value::Value;

use crate::claim::ClaimDescriptor;
use crate::error::ClaimError;
use crate::types::{Address, ADDRESS_LEN};

/// Domain separation prefix for the signable bytes.
pub const SIGN_DOMAIN: &[u8] = b"genesis-claim/sig/v1";

/// Claim field keys. Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const TO: u64 = 0;
    pub const AMOUNT: u64 = 1;
    pub const SIGNATURE: u64 = 2;
    pub const RECOVERY: u64 = 3;
}

/// CBOR tags for unsigned and negative bignums.
const TAG_BIGNUM_POS: u64 = 2;
const TAG_BIGNUM_NEG: u64 = 3;

/// Encodes and decodes claim descriptors to and from wire bytes.
pub trait WireCodec: Send + Sync {
    fn encode(&self, descriptor: &ClaimDescriptor) -> Vec<u8>;

    fn decode(&self, bytes: &[u8]) -> Result<ClaimDescriptor, ClaimError>;
}

/// The canonical CBOR codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

impl WireCodec for CborCodec {
    fn encode(&self, descriptor: &ClaimDescriptor) -> Vec<u8> {
        encode_descriptor(descriptor)
    }

    fn decode(&self, bytes: &[u8]) -> Result<ClaimDescriptor, ClaimError> {
        decode_descriptor(bytes)
    }
}

/// Encode a descriptor to canonical CBOR. Absent fields are omitted.
pub fn encode_descriptor(descriptor: &ClaimDescriptor) -> Vec<u8> {
    let field_count = [
        descriptor.to.is_some(),
        descriptor.amount.is_some(),
        descriptor.signature.is_some(),
        descriptor.recovery.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    let mut buf = Vec::with_capacity(128);
    encode_uint(&mut buf, 5, field_count as u64);

    if let Some(to) = &descriptor.to {
        encode_uint(&mut buf, 0, keys::TO);
        encode_bytes(&mut buf, to.as_bytes());
    }
    if let Some(amount) = descriptor.amount {
        encode_uint(&mut buf, 0, keys::AMOUNT);
        encode_amount(&mut buf, amount);
    }
    if let Some(signature) = &descriptor.signature {
        encode_uint(&mut buf, 0, keys::SIGNATURE);
        encode_bytes(&mut buf, signature);
    }
    if let Some(recovery) = descriptor.recovery {
        encode_uint(&mut buf, 0, keys::RECOVERY);
        encode_uint(&mut buf, 0, u64::from(recovery));
    }

    buf
}

/// The bytes a claim signature commits to: `SIGN_DOMAIN || {0: to, 1: amount}`.
///
/// Signature and recovery id are never part of this input.
pub fn signable_bytes(to: &Address, amount: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SIGN_DOMAIN.len() + 40);
    buf.extend_from_slice(SIGN_DOMAIN);
    encode_uint(&mut buf, 5, 2);
    encode_uint(&mut buf, 0, keys::TO);
    encode_bytes(&mut buf, to.as_bytes());
    encode_uint(&mut buf, 0, keys::AMOUNT);
    encode_uint(&mut buf, 0, amount);
    buf
}

/// Encode a list of encoded claims as a canonical CBOR array of byte strings.
pub fn encode_bundle<B: AsRef<[u8]>>(claims: &[B]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_uint(&mut buf, 4, claims.len() as u64);
    for claim in claims {
        encode_bytes(&mut buf, claim.as_ref());
    }
    buf
}

/// Read the entry count from a bundle's array head without decoding the entries.
pub fn bundle_len(bytes: &[u8]) -> Result<usize, ClaimError> {
    let (&initial, rest) = bytes
        .split_first()
        .ok_or_else(|| decode_error("empty bundle"))?;
    if initial >> 5 != 4 {
        return Err(decode_error("expected array"));
    }

    let len = match initial & 0x1f {
        n @ 0..=23 => u64::from(n),
        n @ 24..=27 => {
            let width = 1usize << (n - 24);
            let arg = rest
                .get(..width)
                .ok_or_else(|| decode_error("truncated array head"))?;
            arg.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
        }
        _ => return Err(decode_error("indefinite or reserved array length")),
    };

    usize::try_from(len).map_err(|_| decode_error("array length out of range"))
}

/// Decode a canonical CBOR array of byte strings.
pub fn decode_bundle(bytes: &[u8]) -> Result<Vec<Bytes>, ClaimError> {
    let value = parse_value(bytes)?;

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(decode_error("expected array")),
    };

    let mut claims = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Bytes(b) => claims.push(Bytes::from(b)),
            _ => return Err(decode_error("bundle entry is not a byte string")),
        }
    }

    if encode_bundle(&claims) != bytes {
        return Err(decode_error("non-canonical encoding"));
    }

    Ok(claims)
}

/// Decode a descriptor from canonical CBOR bytes.
pub fn decode_descriptor(bytes: &[u8]) -> Result<ClaimDescriptor, ClaimError> {
    let value = parse_value(bytes)?;

    let entries = match value {
        Value::Map(entries) => entries,
        _ => return Err(decode_error("expected map")),
    };

    let mut descriptor = ClaimDescriptor::default();
    let mut seen = [false; 4];

    for (key, value) in entries {
        let key = match key {
            Value::Integer(i) => i128::from(i),
            _ => return Err(decode_error("map key is not an integer")),
        };
        let slot = usize::try_from(key)
            .ok()
            .filter(|slot| *slot < seen.len())
            .ok_or_else(|| decode_error(format!("unknown field key {}", key)))?;
        if seen[slot] {
            return Err(decode_error(format!("duplicate field key {}", key)));
        }
        seen[slot] = true;

        match slot as u64 {
            keys::TO => descriptor.to = Some(decode_address(value)?),
            keys::AMOUNT => descriptor.amount = Some(decode_amount(value)?),
            keys::SIGNATURE => match value {
                Value::Bytes(b) => descriptor.signature = Some(Bytes::from(b)),
                _ => return Err(decode_error("invalid signature")),
            },
            _ => descriptor.recovery = Some(decode_recovery(value)?),
        }
    }

    if encode_descriptor(&descriptor) != bytes {
        return Err(decode_error("non-canonical encoding"));
    }

    Ok(descriptor)
}

fn parse_value(bytes: &[u8]) -> Result<Value, ClaimError> {
    ciborium::from_reader(bytes).map_err(|e| ClaimError::DecodeError(e.to_string()))
}

fn decode_error(msg: impl Into<String>) -> ClaimError {
    ClaimError::DecodeError(msg.into())
}

fn decode_address(value: Value) -> Result<Address, ClaimError> {
    match value {
        Value::Bytes(b) if b.len() == ADDRESS_LEN => {
            let mut arr = [0u8; ADDRESS_LEN];
            arr.copy_from_slice(&b);
            Ok(Address(arr))
        }
        _ => Err(decode_error("invalid to address")),
    }
}

fn decode_amount(value: Value) -> Result<i128, ClaimError> {
    match value {
        Value::Integer(i) => Ok(i128::from(i)),
        Value::Tag(tag, inner) if tag == TAG_BIGNUM_POS || tag == TAG_BIGNUM_NEG => {
            let magnitude = match *inner {
                Value::Bytes(b) if b.len() <= 16 => {
                    let mut arr = [0u8; 16];
                    arr[16 - b.len()..].copy_from_slice(&b);
                    u128::from_be_bytes(arr)
                }
                _ => return Err(decode_error("amount out of range")),
            };
            let magnitude =
                i128::try_from(magnitude).map_err(|_| decode_error("amount out of range"))?;
            if tag == TAG_BIGNUM_POS {
                Ok(magnitude)
            } else {
                Ok(-1 - magnitude)
            }
        }
        _ => Err(decode_error("invalid amount")),
    }
}

fn decode_recovery(value: Value) -> Result<u32, ClaimError> {
    match value {
        Value::Integer(i) => {
            u32::try_from(i128::from(i)).map_err(|_| decode_error("recovery out of range"))
        }
        _ => Err(decode_error("invalid recovery")),
    }
}

/// Encode an amount: plain integer when it fits in 64 bits, bignum otherwise.
fn encode_amount(buf: &mut Vec<u8>, n: i128) {
    if n >= 0 {
        let magnitude = n as u128;
        match u64::try_from(magnitude) {
            Ok(v) => encode_uint(buf, 0, v),
            Err(_) => encode_bignum(buf, TAG_BIGNUM_POS, magnitude),
        }
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let magnitude = (-1 - n) as u128;
        match u64::try_from(magnitude) {
            Ok(v) => encode_uint(buf, 1, v),
            Err(_) => encode_bignum(buf, TAG_BIGNUM_NEG, magnitude),
        }
    }
}

fn encode_bignum(buf: &mut Vec<u8>, tag: u64, magnitude: u128) {
    encode_uint(buf, 6, tag);
    let bytes = magnitude.to_be_bytes();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    encode_bytes(buf, &bytes[start..]);
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}
