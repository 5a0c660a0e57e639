// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::TypesError;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A 32 byte account address.
///
/// Addresses print as lowercase hex without a prefix; use [`AccountAddress::to_hex_literal`]
/// for the `0x` form the REST API and the indexer expect.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

impl AccountAddress {
    pub const LENGTH: usize = 32;
    pub const ONE: Self = Self::from_suffix(1);
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    pub const fn new(address: [u8; Self::LENGTH]) -> Self {
        Self(address)
    }

    const fn from_suffix(suffix: u16) -> Self {
        let mut addr = [0u8; Self::LENGTH];
        let bytes = suffix.to_be_bytes();
        addr[Self::LENGTH - 2] = bytes[0];
        addr[Self::LENGTH - 1] = bytes[1];
        Self(addr)
    }

    /// Parses a hex string with or without `0x`. Short forms such as `0x1` are
    /// left-padded with zeros.
    pub fn from_hex_literal(literal: &str) -> Result<Self, TypesError> {
        let hex_str = literal.strip_prefix("0x").unwrap_or(literal);
        if hex_str.is_empty() || hex_str.len() > Self::LENGTH * 2 {
            return Err(TypesError::UnableToParse(
                "AccountAddress",
                format!("'{}' is not a valid address", literal),
            ));
        }

        let mut padded = String::with_capacity(Self::LENGTH * 2);
        padded.extend(std::iter::repeat('0').take(Self::LENGTH * 2 - hex_str.len()));
        padded.push_str(hex_str);

        let mut bytes = [0u8; Self::LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|err| TypesError::InvalidHex(literal.to_string(), err))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<Self, TypesError> {
        let bytes = bytes.as_ref();
        <[u8; Self::LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| TypesError::InvalidLength {
                name: "AccountAddress",
                expected: Self::LENGTH,
                actual: bytes.len(),
            })
    }

    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Hex without leading zeros, `0x1` prints as `1`.
    pub fn short_str_lossless(&self) -> String {
        let hex_str = self.to_hex();
        let trimmed = hex_str.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn into_bytes(self) -> [u8; Self::LENGTH] {
        self.0
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::LowerHex for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s.trim())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex_literal())
        } else {
            // BCS encodes an address as a fixed size byte array, not as a vector.
            serializer.serialize_newtype_struct("AccountAddress", &self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            AccountAddress::from_hex_literal(&s).map_err(D::Error::custom)
        } else {
            #[derive(Deserialize)]
            #[serde(rename = "AccountAddress")]
            struct Value([u8; AccountAddress::LENGTH]);

            let value = Value::deserialize(deserializer)?;
            Ok(AccountAddress::new(value.0))
        }
    }
}
