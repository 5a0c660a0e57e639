// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    account_address::AccountAddress,
    crypto::{Ed25519PublicKey, Ed25519Signature},
    error::TypesError,
    hash::HashValue,
};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Scheme byte appended to a public key before hashing it into an authentication key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Scheme {
    Ed25519 = 0,
}

/// The authentication key of an account: `sha3_256(public_key || scheme)`.
///
/// For an account that never rotated its key the authentication key is also its address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AuthenticationKey([u8; AuthenticationKey::LENGTH]);

impl AuthenticationKey {
    pub const LENGTH: usize = 32;

    pub fn ed25519(public_key: &Ed25519PublicKey) -> Self {
        let mut bytes = public_key.to_bytes().to_vec();
        bytes.push(Scheme::Ed25519 as u8);
        let hash = HashValue::sha3_256_of(&bytes);
        let mut key = [0u8; Self::LENGTH];
        key.copy_from_slice(hash.as_ref());
        Self(key)
    }

    pub fn from_hex_literal(literal: &str) -> Result<Self, TypesError> {
        let hash = HashValue::from_hex_literal(literal)?;
        let mut key = [0u8; Self::LENGTH];
        key.copy_from_slice(hash.as_ref());
        Ok(Self(key))
    }

    pub fn account_address(&self) -> AccountAddress {
        AccountAddress::new(self.0)
    }
}

impl fmt::Display for AuthenticationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AuthenticationKey {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_literal(s.trim())
    }
}

impl Serialize for AuthenticationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthenticationKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AuthenticationKey::from_hex_literal(&s).map_err(D::Error::custom)
    }
}

/// The signature scheme and key that authorize a [`super::RawTransaction`].
///
/// Only single-key Ed25519 is produced by this crate. Variant order is the BCS tag.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
}

impl TransactionAuthenticator {
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        Self::Ed25519 {
            public_key,
            signature,
        }
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        match self {
            Self::Ed25519 { public_key, .. } => public_key,
        }
    }

    pub fn signature(&self) -> &Ed25519Signature {
        match self {
            Self::Ed25519 { signature, .. } => signature,
        }
    }

    /// Same key, signature replaced by zeros.
    pub fn without_signature(&self) -> Self {
        Self::ed25519(*self.public_key(), Ed25519Signature::dummy())
    }

    pub fn verify(&self, message: &[u8]) -> Result<(), TypesError> {
        self.public_key().verify(message, self.signature())
    }
}
