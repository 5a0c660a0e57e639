// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A registry of named chain ids
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum NamedChain {
    MAINNET = 1,
    TESTNET = 2,
    DEVNET = 3,
    TESTING = 4,
}

impl NamedChain {
    pub fn id(&self) -> u8 {
        *self as u8
    }

    fn from_str_name(s: &str) -> Option<NamedChain> {
        match s.to_lowercase().as_str() {
            "mainnet" => Some(NamedChain::MAINNET),
            "testnet" => Some(NamedChain::TESTNET),
            "devnet" => Some(NamedChain::DEVNET),
            "testing" => Some(NamedChain::TESTING),
            _ => None,
        }
    }
}

/// The id of the network a transaction is meant for. Transactions signed for one
/// chain are rejected by every other chain.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ChainId(u8);

impl ChainId {
    pub fn new(id: u8) -> Self {
        assert!(id > 0, "cannot have chain ID of 0");
        Self(id)
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn testnet() -> Self {
        ChainId::new(NamedChain::TESTNET.id())
    }

    pub fn mainnet() -> Self {
        ChainId::new(NamedChain::MAINNET.id())
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::testnet()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let id = match NamedChain::from_str_name(s) {
            Some(named) => named.id(),
            None => s
                .parse::<u8>()
                .map_err(|err| TypesError::UnableToParse("ChainId", err.to_string()))?,
        };
        ChainId::try_from(id)
    }
}

impl TryFrom<u8> for ChainId {
    type Error = TypesError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if id == 0 {
            return Err(TypesError::UnableToParse(
                "ChainId",
                "cannot have chain ID of 0".to_string(),
            ));
        }
        Ok(ChainId(id))
    }
}
