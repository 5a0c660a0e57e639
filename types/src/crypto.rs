// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Ed25519 key material.
//!
//! Keys and signatures serialize as length-prefixed bytes in BCS and as `0x` hex strings
//! in human readable formats.

use crate::error::TypesError;
use ed25519_dalek::{ExpandedSecretKey, PublicKey, SecretKey, Verifier};
use rand::{CryptoRng, RngCore};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const ED25519_PRIVATE_KEY_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;
pub const ED25519_PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
pub const ED25519_SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// AIP-80 prefix some wallets put in front of exported keys.
const ED25519_PRIVATE_KEY_PREFIX: &str = "ed25519-priv-";

/// An Ed25519 private key, i.e. the 32 byte seed.
pub struct Ed25519PrivateKey {
    secret: SecretKey,
    public: PublicKey,
}

impl Ed25519PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        if bytes.len() != ED25519_PRIVATE_KEY_LENGTH {
            return Err(TypesError::InvalidLength {
                name: "Ed25519PrivateKey",
                expected: ED25519_PRIVATE_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let secret =
            SecretKey::from_bytes(bytes).map_err(|err| TypesError::InvalidKey(err.to_string()))?;
        let public = PublicKey::from(&secret);
        Ok(Self { secret, public })
    }

    /// Parses a hex encoded seed, with or without `0x` and the AIP-80 prefix.
    pub fn from_encoded_string(encoded: &str) -> Result<Self, TypesError> {
        let encoded = encoded.trim();
        let encoded = encoded
            .strip_prefix(ED25519_PRIVATE_KEY_PREFIX)
            .unwrap_or(encoded);
        let hex_str = encoded.strip_prefix("0x").unwrap_or(encoded);
        let bytes = hex::decode(hex_str)
            .map_err(|err| TypesError::InvalidHex("<private key>".to_string(), err))?;
        Self::from_bytes(&bytes)
    }

    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let secret = SecretKey::generate(rng);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    pub fn to_bytes(&self) -> [u8; ED25519_PRIVATE_KEY_LENGTH] {
        self.secret.to_bytes()
    }

    pub fn to_encoded_string(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.public)
    }

    pub fn sign_arbitrary_message(&self, message: &[u8]) -> Ed25519Signature {
        let expanded = ExpandedSecretKey::from(&self.secret);
        Ed25519Signature(expanded.sign(message, &self.public).to_bytes())
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<elided secret for Ed25519PrivateKey>")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ed25519PublicKey(PublicKey);

impl Ed25519PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        PublicKey::from_bytes(bytes)
            .map(Self)
            .map_err(|err| TypesError::InvalidKey(err.to_string()))
    }

    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    pub fn to_encoded_string(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), TypesError> {
        let signature = ed25519_dalek::Signature::try_from(&signature.0[..])
            .map_err(|err| TypesError::InvalidKey(err.to_string()))?;
        self.0
            .verify(message, &signature)
            .map_err(|err| TypesError::InvalidKey(err.to_string()))
    }
}

#[derive(Clone, Eq, PartialEq)]
pub struct Ed25519Signature([u8; ED25519_SIGNATURE_LENGTH]);

impl Ed25519Signature {
    /// All zero signature, what the node expects on a simulated transaction.
    pub fn dummy() -> Self {
        Self([0u8; ED25519_SIGNATURE_LENGTH])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        <[u8; ED25519_SIGNATURE_LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| TypesError::InvalidLength {
                name: "Ed25519Signature",
                expected: ED25519_SIGNATURE_LENGTH,
                actual: bytes.len(),
            })
    }

    pub fn to_bytes(&self) -> [u8; ED25519_SIGNATURE_LENGTH] {
        self.0
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature(0x{})", hex::encode(self.0))
    }
}

fn serialize_key_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    } else {
        serializer.serialize_bytes(bytes)
    }
}

fn deserialize_key_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    if deserializer.is_human_readable() {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(D::Error::custom)
    } else {
        Vec::<u8>::deserialize(deserializer)
    }
}

impl Serialize for Ed25519PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_key_bytes(&self.to_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for Ed25519PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserialize_key_bytes(deserializer)?;
        Ed25519PrivateKey::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_key_bytes(&self.to_bytes(), serializer)
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserialize_key_bytes(deserializer)?;
        Ed25519PublicKey::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_key_bytes(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserialize_key_bytes(deserializer)?;
        Ed25519Signature::from_bytes(&bytes).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    const SEED: &str = "fa5356d432ca2a11838cb6d644e392cf78c3eb7ed8a6148c6165944972cacfde";

    #[test]
    fn parses_hex_seeds_in_every_accepted_form() {
        let plain = Ed25519PrivateKey::from_encoded_string(SEED).unwrap();
        let prefixed = Ed25519PrivateKey::from_encoded_string(&format!("0x{}", SEED)).unwrap();
        let aip_80 =
            Ed25519PrivateKey::from_encoded_string(&format!("ed25519-priv-0x{}", SEED)).unwrap();
        assert_eq!(plain.public_key(), prefixed.public_key());
        assert_eq!(plain.public_key(), aip_80.public_key());
        assert_eq!(plain.to_encoded_string(), format!("0x{}", SEED));
    }

    #[test]
    fn rejects_short_seeds() {
        assert_err!(Ed25519PrivateKey::from_encoded_string("0x1234"));
        assert_err!(Ed25519PrivateKey::from_encoded_string("not hex"));
    }

    #[test]
    fn signatures_verify() {
        let key = Ed25519PrivateKey::generate(&mut rand::rngs::OsRng);
        let signature = key.sign_arbitrary_message(b"dig");
        assert_ok!(key.public_key().verify(b"dig", &signature));
        assert_err!(key.public_key().verify(b"rob", &signature));
        assert_err!(key.public_key().verify(b"dig", &Ed25519Signature::dummy()));
    }

    #[test]
    fn bcs_prefixes_key_length() {
        let key = Ed25519PrivateKey::from_encoded_string(SEED).unwrap();
        let bytes = bcs::to_bytes(&key.public_key()).unwrap();
        assert_eq!(bytes.len(), 1 + ED25519_PUBLIC_KEY_LENGTH);
        assert_eq!(bytes[0], ED25519_PUBLIC_KEY_LENGTH as u8);
        let signature = bcs::to_bytes(&key.sign_arbitrary_message(b"x")).unwrap();
        assert_eq!(signature.len(), 1 + ED25519_SIGNATURE_LENGTH);
    }

    #[test]
    fn debug_does_not_leak_the_seed() {
        let key = Ed25519PrivateKey::from_encoded_string(SEED).unwrap();
        assert!(!format!("{:?}", key).contains(SEED));
    }
}
