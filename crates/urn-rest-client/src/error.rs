// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::State;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use urn_types::{hash::HashValue, TypesError};

/// The error body the fullnode API returns on a non-success status.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AptosError {
    pub message: String,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub vm_error_code: Option<u64>,
}

impl fmt::Display for AptosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug)]
pub struct AptosErrorResponse {
    pub error: AptosError,
    pub status_code: StatusCode,
    pub state: Option<State>,
}

impl fmt::Display for AptosErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status_code, self.error)
    }
}

#[derive(Debug, Error)]
pub enum RestError {
    #[error("API error {0}")]
    Api(AptosErrorResponse),
    #[error("Unknown error {0}, status code: {1}")]
    Http(String, StatusCode),
    #[error("Indexer error: {0}")]
    Indexer(String),
    #[error("Transaction {hash} failed: {vm_status}")]
    TransactionFailed { hash: HashValue, vm_status: String },
    #[error("Simulation of {function} failed: {vm_status}")]
    SimulationFailed { function: String, vm_status: String },
    #[error("Timed out waiting for transaction {hash}: {reason}")]
    Timeout { hash: HashValue, reason: String },
    #[error("Serialization error: {0}")]
    Bcs(#[from] bcs::Error),
    #[error("Invalid data: {0}")]
    Types(#[from] TypesError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unknown error {0}")]
    Unknown(#[from] anyhow::Error),
}

impl From<AptosErrorResponse> for RestError {
    fn from(err: AptosErrorResponse) -> Self {
        RestError::Api(err)
    }
}

impl RestError {
    /// The HTTP status carried by the error, when the server answered at all.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            RestError::Api(response) => Some(response.status_code),
            RestError::Http(_, status) => Some(*status),
            RestError::Request(err) => err.status(),
            _ => None,
        }
    }
}
