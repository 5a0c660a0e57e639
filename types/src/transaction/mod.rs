// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    account_address::AccountAddress,
    chain_id::ChainId,
    crypto::Ed25519PrivateKey,
    error::TypesError,
    hash::HashValue,
    language_storage::{Identifier, ModuleId, TypeTag},
};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub mod authenticator;

use authenticator::TransactionAuthenticator;

/// Domain separator hashed in front of every signed raw transaction.
const RAW_TRANSACTION_SALT: &[u8] = b"APTOS::RawTransaction";

/// BCS tag of the entry function variant. Tags 0 and 1 are scripts and the
/// deprecated module bundle, neither of which this crate produces.
const ENTRY_FUNCTION_VARIANT_INDEX: u32 = 2;

/// Call to a public entry function of a published module.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EntryFunction {
    module: ModuleId,
    function: Identifier,
    ty_args: Vec<TypeTag>,
    args: Vec<Vec<u8>>,
}

impl EntryFunction {
    pub fn new(
        module: ModuleId,
        function: Identifier,
        ty_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Self {
        EntryFunction {
            module,
            function,
            ty_args,
            args,
        }
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    pub fn function(&self) -> &Identifier {
        &self.function
    }

    pub fn ty_args(&self) -> &[TypeTag] {
        &self.ty_args
    }

    pub fn args(&self) -> &[Vec<u8>] {
        &self.args
    }
}

impl fmt::Display for EntryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.function)
    }
}

/// The payload of a transaction. Only entry functions are supported.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TransactionPayload {
    EntryFunction(EntryFunction),
}

impl TransactionPayload {
    pub fn entry_function(&self) -> &EntryFunction {
        match self {
            TransactionPayload::EntryFunction(entry_function) => entry_function,
        }
    }
}

impl Serialize for TransactionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TransactionPayload::EntryFunction(entry_function) => serializer
                .serialize_newtype_variant(
                    "TransactionPayload",
                    ENTRY_FUNCTION_VARIANT_INDEX,
                    "EntryFunction",
                    entry_function,
                ),
        }
    }
}

impl From<EntryFunction> for TransactionPayload {
    fn from(entry_function: EntryFunction) -> Self {
        TransactionPayload::EntryFunction(entry_function)
    }
}

/// RawTransaction is the portion of a transaction that a client signs.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct RawTransaction {
    /// Sender's address.
    sender: AccountAddress,

    /// Sequence number of this transaction. This must match the sequence number
    /// stored in the sender's account at the time the transaction executes.
    sequence_number: u64,

    /// The transaction payload, i.e. the entry function to call.
    payload: TransactionPayload,

    /// Maximal total gas to spend for this transaction.
    max_gas_amount: u64,

    /// Price to be paid per gas unit.
    gas_unit_price: u64,

    /// Expiration timestamp for this transaction, represented
    /// as seconds from the Unix Epoch. If the current blockchain timestamp
    /// is greater than or equal to this time, then the transaction has
    /// expired and will be discarded.
    expiration_timestamp_secs: u64,

    /// Chain ID of the network this transaction is intended for.
    chain_id: ChainId,
}

impl RawTransaction {
    pub fn new(
        sender: AccountAddress,
        sequence_number: u64,
        payload: TransactionPayload,
        max_gas_amount: u64,
        gas_unit_price: u64,
        expiration_timestamp_secs: u64,
        chain_id: ChainId,
    ) -> Self {
        RawTransaction {
            sender,
            sequence_number,
            payload,
            max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs,
            chain_id,
        }
    }

    /// The bytes that get signed: `sha3_256(salt) || bcs(self)`.
    pub fn signing_message(&self) -> Result<Vec<u8>, TypesError> {
        let mut message = HashValue::sha3_256_of(RAW_TRANSACTION_SALT).to_vec();
        message.extend(bcs::to_bytes(self)?);
        Ok(message)
    }

    pub fn sign(self, private_key: &Ed25519PrivateKey) -> Result<SignedTransaction, TypesError> {
        let signature = private_key.sign_arbitrary_message(&self.signing_message()?);
        Ok(SignedTransaction::new(
            self,
            TransactionAuthenticator::ed25519(private_key.public_key(), signature),
        ))
    }

    pub fn sender(&self) -> AccountAddress {
        self.sender
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &TransactionPayload {
        &self.payload
    }

    pub fn max_gas_amount(&self) -> u64 {
        self.max_gas_amount
    }

    pub fn gas_unit_price(&self) -> u64 {
        self.gas_unit_price
    }

    pub fn expiration_timestamp_secs(&self) -> u64 {
        self.expiration_timestamp_secs
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }
}

/// A transaction that has been signed.
///
/// The signature is not checked on construction, see [`SignedTransaction::verify_signature`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SignedTransaction {
    /// The raw transaction
    raw_txn: RawTransaction,

    /// Public key and signature to authenticate
    authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    pub fn new(raw_txn: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        SignedTransaction {
            raw_txn,
            authenticator,
        }
    }

    /// A copy carrying a zeroed signature. The simulation endpoint refuses
    /// transactions with a valid signature so they cannot be replayed.
    pub fn for_simulation(&self) -> Self {
        SignedTransaction {
            raw_txn: self.raw_txn.clone(),
            authenticator: self.authenticator.without_signature(),
        }
    }

    pub fn raw_transaction_ref(&self) -> &RawTransaction {
        &self.raw_txn
    }

    pub fn authenticator_ref(&self) -> &TransactionAuthenticator {
        &self.authenticator
    }

    pub fn sender(&self) -> AccountAddress {
        self.raw_txn.sender
    }

    pub fn sequence_number(&self) -> u64 {
        self.raw_txn.sequence_number
    }

    pub fn verify_signature(&self) -> Result<(), TypesError> {
        self.authenticator.verify(&self.raw_txn.signing_message()?)
    }

    pub fn to_bcs_bytes(&self) -> Result<Vec<u8>, TypesError> {
        Ok(bcs::to_bytes(self)?)
    }
}
