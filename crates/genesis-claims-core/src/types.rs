//! Strong type definitions for genesis claims.
//!
//! Addresses, digests and public keys are newtypes so that a 20-byte
//! recipient can never be confused with a 32-byte digest at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a canonical address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Width of a compressed SEC1 secp256k1 public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// A canonical 20-byte address, derived from a public key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Create a new Address from raw bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != ADDRESS_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; ADDRESS_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; ADDRESS_LEN] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// The 32-byte digest a claim's signature commits to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClaimDigest(pub [u8; 32]);

impl ClaimDigest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for ClaimDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClaimDigest({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for ClaimDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A compressed SEC1 secp256k1 public key (33 bytes).
///
/// The bytes are not checked to lie on the curve; that happens when a
/// signature is verified against the key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, which must be exactly 33 bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let arr: [u8; PUBLIC_KEY_LEN] = slice.try_into().ok()?;
        Some(Self(arr))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_hex_roundtrip() {
        let addr = Address::from_bytes([0x42; 20]);
        let hex = addr.to_hex();
        let recovered = Address::from_hex(&hex).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn test_address_from_hex_rejects_wrong_length() {
        assert!(Address::from_hex(&hex::encode([0u8; 32])).is_err());
        assert!(Address::from_hex("zz").is_err());
    }

    #[test]
    fn test_address_display() {
        let addr = Address::from_bytes([0xab; 20]);
        assert_eq!(format!("{}", addr), "ab".repeat(20));
    }

    #[test]
    fn test_address_debug() {
        let addr = Address::from_bytes([0xcd; 20]);
        let debug = format!("{:?}", addr);
        assert_eq!(debug, "Address(cdcdcdcdcdcdcdcd)");
    }

    #[test]
    fn test_address_try_from_slice() {
        assert!(Address::try_from(&[1u8; 20][..]).is_ok());
        assert!(Address::try_from(&[1u8; 19][..]).is_err());
    }

    #[test]
    fn test_public_key_from_slice() {
        assert!(PublicKey::from_slice(&[2u8; 33]).is_some());
        assert!(PublicKey::from_slice(&[2u8; 65]).is_none());
    }
}
