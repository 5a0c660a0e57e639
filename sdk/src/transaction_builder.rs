// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use std::time::{SystemTime, UNIX_EPOCH};
use urn_types::{
    account_address::AccountAddress,
    chain_id::ChainId,
    transaction::{EntryFunction, RawTransaction, TransactionPayload},
};

pub const DEFAULT_GAS_UNIT_PRICE: u64 = 100;
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 500_000;
pub const DEFAULT_EXPIRATION_SECS: u64 = 30;

/// Accumulates the fields of a [`RawTransaction`].
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    sender: Option<AccountAddress>,
    sequence_number: Option<u64>,
    payload: TransactionPayload,
    max_gas_amount: u64,
    gas_unit_price: u64,
    expiration_timestamp_secs: u64,
    chain_id: ChainId,
}

impl TransactionBuilder {
    pub fn new(
        payload: TransactionPayload,
        expiration_timestamp_secs: u64,
        chain_id: ChainId,
    ) -> Self {
        Self {
            payload,
            chain_id,
            expiration_timestamp_secs,
            sender: None,
            sequence_number: None,
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
        }
    }

    pub fn sender(mut self, sender: AccountAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = Some(sequence_number);
        self
    }

    pub fn max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = max_gas_amount;
        self
    }

    pub fn gas_unit_price(mut self, gas_unit_price: u64) -> Self {
        self.gas_unit_price = gas_unit_price;
        self
    }

    pub fn chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn expiration_timestamp_secs(mut self, expiration_timestamp_secs: u64) -> Self {
        self.expiration_timestamp_secs = expiration_timestamp_secs;
        self
    }

    /// Missing sender or sequence number default to `0x0` and `0`;
    /// [`crate::types::LocalAccount::sign_with_transaction_builder`] always sets both.
    pub fn build(self) -> RawTransaction {
        RawTransaction::new(
            self.sender.unwrap_or(AccountAddress::ZERO),
            self.sequence_number.unwrap_or_default(),
            self.payload,
            self.max_gas_amount,
            self.gas_unit_price,
            self.expiration_timestamp_secs,
            self.chain_id,
        )
    }
}

/// Shared gas and expiration settings stamped onto every transaction it starts.
#[derive(Clone, Debug)]
pub struct TransactionFactory {
    max_gas_amount: u64,
    gas_unit_price: u64,
    transaction_expiration_time: u64,
    chain_id: ChainId,
}

impl TransactionFactory {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            transaction_expiration_time: DEFAULT_EXPIRATION_SECS,
            chain_id,
        }
    }

    pub fn with_max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = max_gas_amount;
        self
    }

    pub fn with_gas_unit_price(mut self, gas_unit_price: u64) -> Self {
        self.gas_unit_price = gas_unit_price;
        self
    }

    /// Seconds from now after which the transaction may no longer be committed.
    pub fn with_transaction_expiration_time(mut self, transaction_expiration_time: u64) -> Self {
        self.transaction_expiration_time = transaction_expiration_time;
        self
    }

    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn payload(&self, payload: TransactionPayload) -> TransactionBuilder {
        TransactionBuilder::new(payload, self.expiration_timestamp(), self.chain_id)
            .max_gas_amount(self.max_gas_amount)
            .gas_unit_price(self.gas_unit_price)
    }

    pub fn entry_function(&self, func: EntryFunction) -> TransactionBuilder {
        self.payload(TransactionPayload::EntryFunction(func))
    }

    fn expiration_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|now| now.as_secs())
            .unwrap_or_default()
            + self.transaction_expiration_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urn_types::{ident_str, language_storage::ModuleId};

    fn mint_shovel() -> EntryFunction {
        EntryFunction::new(
            ModuleId::new(AccountAddress::ONE, ident_str!("urn_to_earn")),
            ident_str!("mint_shovel"),
            vec![],
            vec![],
        )
    }

    #[test]
    fn factory_defaults() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let raw = TransactionFactory::new(ChainId::testnet())
            .entry_function(mint_shovel())
            .sender(AccountAddress::ONE)
            .sequence_number(4)
            .build();

        assert_eq!(raw.gas_unit_price(), 100);
        assert_eq!(raw.max_gas_amount(), 500_000);
        assert_eq!(raw.chain_id(), ChainId::testnet());
        assert_eq!(raw.sequence_number(), 4);
        let expiration = raw.expiration_timestamp_secs();
        assert!(expiration >= now + 30 && expiration <= now + 31);
    }

    #[test]
    fn factory_overrides_carry_into_builders() {
        let raw = TransactionFactory::new(ChainId::testnet())
            .with_gas_unit_price(150)
            .with_max_gas_amount(2_000)
            .with_chain_id(ChainId::mainnet())
            .entry_function(mint_shovel())
            .build();

        assert_eq!(raw.gas_unit_price(), 150);
        assert_eq!(raw.max_gas_amount(), 2_000);
        assert_eq!(raw.chain_id(), ChainId::mainnet());
    }
}
