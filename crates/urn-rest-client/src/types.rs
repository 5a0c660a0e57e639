// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! JSON shapes returned by the fullnode REST API.
//!
//! The API encodes every `u64` as a decimal string, see [`U64`].

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use urn_types::{
    account_address::AccountAddress, hash::HashValue,
    transaction::authenticator::AuthenticationKey,
};

/// A `u64` carried as a JSON string.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct U64(pub u64);

impl U64 {
    pub fn inner(&self) -> &u64 {
        &self.0
    }
}

impl From<u64> for U64 {
    fn from(d: u64) -> Self {
        Self(d)
    }
}

impl From<U64> for u64 {
    fn from(d: U64) -> Self {
        d.0
    }
}

impl fmt::Display for U64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for U64 {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl Serialize for U64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for U64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String>::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// `GET /` ledger information.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexResponse {
    pub chain_id: u8,
    pub epoch: U64,
    pub ledger_version: U64,
    pub ledger_timestamp: U64,
    #[serde(default)]
    pub node_role: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Account {
    pub sequence_number: U64,
    pub authentication_key: AuthenticationKey,
}

/// A Move resource as JSON. `data` keeps the API's shape verbatim.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AptosCoin {
    pub value: U64,
}

/// The `data` of a `0x1::coin::CoinStore<..>` resource.
#[derive(Debug, Serialize, Deserialize)]
pub struct Balance {
    pub coin: AptosCoin,
}

impl Balance {
    pub fn get(&self) -> u64 {
        *self.coin.value.inner()
    }
}

/// What the node returns for an accepted submission.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PendingTransaction {
    pub hash: HashValue,
    pub sender: AccountAddress,
    pub sequence_number: U64,
    pub max_gas_amount: U64,
    pub gas_unit_price: U64,
    pub expiration_timestamp_secs: U64,
}

/// A transaction as returned by `/transactions/by_hash` and `/transactions/simulate`.
///
/// Only the fields the tools report on are decoded, everything else the node sends is
/// ignored.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "type", default = "user_transaction_type")]
    pub transaction_type: String,
    pub hash: HashValue,
    #[serde(default)]
    pub version: Option<U64>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub vm_status: Option<String>,
    #[serde(default)]
    pub gas_used: Option<U64>,
    #[serde(default)]
    pub sender: Option<AccountAddress>,
    #[serde(default)]
    pub sequence_number: Option<U64>,
}

fn user_transaction_type() -> String {
    Transaction::USER_TRANSACTION.to_string()
}

impl Transaction {
    pub const PENDING_TRANSACTION: &'static str = "pending_transaction";
    pub const USER_TRANSACTION: &'static str = "user_transaction";

    pub fn is_pending(&self) -> bool {
        self.transaction_type == Self::PENDING_TRANSACTION
    }

    pub fn success(&self) -> bool {
        self.success.unwrap_or(false)
    }

    pub fn version(&self) -> Option<u64> {
        self.version.map(u64::from)
    }

    pub fn gas_used(&self) -> Option<u64> {
        self.gas_used.map(u64::from)
    }

    pub fn vm_status(&self) -> String {
        self.vm_status.clone().unwrap_or_default()
    }
}
