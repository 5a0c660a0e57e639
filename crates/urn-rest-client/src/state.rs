// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use reqwest::header::HeaderMap;

pub const X_APTOS_CHAIN_ID: &str = "x-aptos-chain-id";
pub const X_APTOS_EPOCH: &str = "x-aptos-epoch";
pub const X_APTOS_LEDGER_VERSION: &str = "x-aptos-ledger-version";
pub const X_APTOS_LEDGER_TIMESTAMP: &str = "x-aptos-ledger-timestampusec";

/// Ledger state the fullnode reports in the headers of every response.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct State {
    pub chain_id: u8,
    pub epoch: u64,
    pub version: u64,
    pub timestamp_usecs: u64,
}

impl State {
    /// Returns `None` when any of the ledger headers is missing, e.g. behind a proxy
    /// that strips them.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        fn parse<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok())
        }

        Some(Self {
            chain_id: parse(headers, X_APTOS_CHAIN_ID)?,
            epoch: parse(headers, X_APTOS_EPOCH)?,
            version: parse(headers, X_APTOS_LEDGER_VERSION)?,
            timestamp_usecs: parse(headers, X_APTOS_LEDGER_TIMESTAMP)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn parses_complete_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(X_APTOS_CHAIN_ID, HeaderValue::from_static("2"));
        headers.insert(X_APTOS_EPOCH, HeaderValue::from_static("11"));
        headers.insert(X_APTOS_LEDGER_VERSION, HeaderValue::from_static("12345"));
        headers.insert(X_APTOS_LEDGER_TIMESTAMP, HeaderValue::from_static("1700000000000000"));

        assert_eq!(
            State::from_headers(&headers),
            Some(State {
                chain_id: 2,
                epoch: 11,
                version: 12345,
                timestamp_usecs: 1_700_000_000_000_000,
            })
        );
    }

    #[test]
    fn missing_header_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(X_APTOS_CHAIN_ID, HeaderValue::from_static("2"));
        assert_eq!(State::from_headers(&headers), None);
    }
}
