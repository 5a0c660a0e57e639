// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("Invalid hex '{0}': {1}")]
    InvalidHex(String, hex::FromHexError),
    #[error("Invalid length for {name}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),
    #[error("Unable to parse {0}: {1}")]
    UnableToParse(&'static str, String),
    #[error("Invalid key material: {0}")]
    InvalidKey(String),
    #[error("BCS serialization failed: {0}")]
    Bcs(#[from] bcs::Error),
}
