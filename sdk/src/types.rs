// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

pub use urn_types::*;

use crate::transaction_builder::TransactionBuilder;
use urn_types::{
    crypto::{Ed25519PrivateKey, Ed25519PublicKey},
    transaction::{authenticator::AuthenticationKey, SignedTransaction},
};

/// An account whose private key is held locally, with a client-side sequence number.
#[derive(Debug)]
pub struct LocalAccount {
    address: AccountAddress,
    key: Ed25519PrivateKey,
    sequence_number: u64,
}

impl LocalAccount {
    pub fn new(address: AccountAddress, key: Ed25519PrivateKey, sequence_number: u64) -> Self {
        Self {
            address,
            key,
            sequence_number,
        }
    }

    /// An account at the address derived from `key`, which holds for every account
    /// that never rotated its key.
    pub fn from_private_key(key: Ed25519PrivateKey, sequence_number: u64) -> Self {
        let address = AuthenticationKey::ed25519(&key.public_key()).account_address();
        Self::new(address, key, sequence_number)
    }

    /// Accepts a 32 byte seed as hex, `0x` and `ed25519-priv-` prefixes allowed.
    pub fn from_private_key_hex(encoded: &str, sequence_number: u64) -> Result<Self, TypesError> {
        Ok(Self::from_private_key(
            Ed25519PrivateKey::from_encoded_string(encoded)?,
            sequence_number,
        ))
    }

    pub fn generate<R>(rng: &mut R) -> Self
    where
        R: rand::RngCore + rand::CryptoRng,
    {
        Self::from_private_key(Ed25519PrivateKey::generate(rng), 0)
    }

    /// Signs the transaction under the current sequence number, then advances it.
    pub fn sign_with_transaction_builder(
        &mut self,
        builder: TransactionBuilder,
    ) -> Result<SignedTransaction, TypesError> {
        let raw_txn = builder
            .sender(self.address)
            .sequence_number(self.increment_sequence_number())
            .build();
        raw_txn.sign(&self.key)
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn private_key(&self) -> &Ed25519PrivateKey {
        &self.key
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.key.public_key()
    }

    pub fn authentication_key(&self) -> AuthenticationKey {
        AuthenticationKey::ed25519(&self.public_key())
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn set_sequence_number(&mut self, sequence_number: u64) {
        self.sequence_number = sequence_number;
    }

    pub fn increment_sequence_number(&mut self) -> u64 {
        let sequence_number = self.sequence_number;
        self.sequence_number += 1;
        sequence_number
    }
}
