// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::TypesError;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::{fmt, str::FromStr};

/// Output value of the SHA3-256 hash function, used for transaction hashes.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HashValue([u8; HashValue::LENGTH]);

impl HashValue {
    pub const LENGTH: usize = 32;

    pub fn new(hash: [u8; Self::LENGTH]) -> Self {
        Self(hash)
    }

    /// Hashes `bytes` with SHA3-256.
    pub fn sha3_256_of(bytes: &[u8]) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(bytes);
        let mut hash = [0u8; Self::LENGTH];
        hash.copy_from_slice(&hasher.finalize());
        Self(hash)
    }

    pub fn from_slice<T: AsRef<[u8]>>(bytes: T) -> Result<Self, TypesError> {
        let bytes = bytes.as_ref();
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| TypesError::InvalidLength {
                name: "HashValue",
                expected: Self::LENGTH,
                actual: bytes.len(),
            })
    }

    pub fn from_hex_literal(literal: &str) -> Result<Self, TypesError> {
        let hex_str = literal.strip_prefix("0x").unwrap_or(literal);
        let bytes =
            hex::decode(hex_str).map_err(|err| TypesError::InvalidHex(literal.to_string(), err))?;
        Self::from_slice(bytes)
    }

    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self.to_hex_literal())
    }
}

impl FromStr for HashValue {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s.trim())
    }
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HashValue::from_hex_literal(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_of_empty_input() {
        assert_eq!(
            HashValue::sha3_256_of(b"").to_hex_literal(),
            "0xa7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn hex_round_trip() {
        let hash = HashValue::sha3_256_of(b"urn");
        assert_eq!(HashValue::from_str(&hash.to_string()).unwrap(), hash);
        assert!(HashValue::from_str("0x1234").is_err());
    }
}
