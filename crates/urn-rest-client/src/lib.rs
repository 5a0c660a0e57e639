// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod error;
pub mod indexer;
mod response;
pub mod state;
pub mod types;

pub use error::{AptosError, AptosErrorResponse, RestError};
pub use indexer::{AccountToken, IndexerClient, TokenId};
pub use response::Response;
pub use state::State;
pub use types::{Account, Balance, IndexResponse, PendingTransaction, Resource, Transaction};

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client as ReqwestClient, StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use url::Url;
use urn_types::{
    account_address::AccountAddress,
    hash::HashValue,
    transaction::SignedTransaction,
    utility_coin::{AptosCoinType, CoinType},
};

pub type AptosResult<T> = Result<T, RestError>;

pub const USER_AGENT: &str = concat!("urn-client-sdk-rust / ", env!("CARGO_PKG_VERSION"));
pub const BCS_SIGNED_TRANSACTION: &str = "application/x.aptos.signed_transaction+bcs";

const DEFAULT_VERSION_PATH_BASE: &str = "v1/";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);

/// Builder for [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Url,
    timeout: Duration,
    headers: HeaderMap,
    version_path_base: String,
}

impl ClientBuilder {
    pub fn new(base_url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            base_url,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            headers,
            version_path_base: DEFAULT_VERSION_PATH_BASE.to_string(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path segment every API route is rooted at. Must end in `/`.
    pub fn version_path_base(mut self, version_path_base: String) -> AptosResult<Self> {
        if !version_path_base.ends_with('/') {
            return Err(anyhow::anyhow!("version_path_base must end with '/', e.g. 'v1/'").into());
        }
        self.version_path_base = version_path_base;
        Ok(self)
    }

    pub fn build(self) -> AptosResult<Client> {
        let inner = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(self.headers)
            .cookie_store(true)
            .build()?;
        Ok(Client {
            inner,
            base_url: self.base_url,
            version_path_base: self.version_path_base,
        })
    }
}

/// A client for the fullnode REST API.
#[derive(Clone, Debug)]
pub struct Client {
    inner: ReqwestClient,
    base_url: Url,
    version_path_base: String,
}

impl Client {
    pub fn builder(base_url: Url) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn new(base_url: Url) -> AptosResult<Self> {
        Self::builder(base_url).build()
    }

    /// Ledger information of the node, chain id included.
    pub async fn get_index(&self) -> AptosResult<Response<IndexResponse>> {
        let url = self
            .base_url
            .join(self.version_path_base.trim_end_matches('/'))?;
        self.get(url).await
    }

    pub async fn get_account(&self, address: AccountAddress) -> AptosResult<Response<Account>> {
        let url = self.build_path(&format!("accounts/{}", address.to_hex_literal()))?;
        self.get(url).await
    }

    /// Reads one resource of an account. A resource the account does not hold is `None`.
    pub async fn get_account_resource(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> AptosResult<Response<Option<Resource>>> {
        let url = self.build_path(&format!(
            "accounts/{}/resource/{}",
            address.to_hex_literal(),
            resource_type
        ))?;
        match self.get::<Resource>(url).await {
            Ok(response) => Ok(response.map(Some)),
            Err(RestError::Api(response)) if response.status_code == StatusCode::NOT_FOUND => {
                Ok(Response::new(None, response.state))
            },
            Err(err) => Err(err),
        }
    }

    /// The APT balance of an account in octas.
    pub async fn get_account_balance(
        &self,
        address: AccountAddress,
    ) -> AptosResult<Response<Balance>> {
        let resource_type = AptosCoinType::coin_store_tag().to_string();
        let response = self.get_account_resource(address, &resource_type).await?;
        response.and_then(|resource| -> AptosResult<Balance> {
            match resource {
                Some(resource) => Ok(serde_json::from_value(resource.data)?),
                None => Err(anyhow::anyhow!("no {} under account {}", resource_type, address).into()),
            }
        })
    }

    pub async fn get_transaction_by_hash(
        &self,
        hash: HashValue,
    ) -> AptosResult<Response<Transaction>> {
        let url = self.build_path(&format!("transactions/by_hash/{}", hash.to_hex_literal()))?;
        self.get(url).await
    }

    /// Dry-runs a transaction. The signature is zeroed before sending, the node
    /// refuses simulations that carry a valid one.
    pub async fn simulate(
        &self,
        txn: &SignedTransaction,
    ) -> AptosResult<Response<Vec<Transaction>>> {
        let body = txn.for_simulation().to_bcs_bytes()?;
        let url = self.build_path("transactions/simulate")?;
        let response = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, BCS_SIGNED_TRANSACTION)
            .body(body)
            .send()
            .await?;
        self.json(response).await
    }

    /// Simulates and fails when the VM would not execute the transaction.
    pub async fn simulate_and_check(
        &self,
        txn: &SignedTransaction,
    ) -> AptosResult<Response<Transaction>> {
        let function = txn
            .raw_transaction_ref()
            .payload()
            .entry_function()
            .to_string();
        let response = self.simulate(txn).await?;
        let (mut txns, state) = response.into_parts();
        let simulated = match txns.pop() {
            Some(simulated) => simulated,
            None => {
                return Err(RestError::SimulationFailed {
                    function,
                    vm_status: "node returned no simulation result".to_string(),
                })
            },
        };
        debug!(
            function = %function,
            gas_used = simulated.gas_used().unwrap_or_default(),
            vm_status = %simulated.vm_status(),
            "Simulated transaction"
        );
        if !simulated.success() {
            return Err(RestError::SimulationFailed {
                function,
                vm_status: simulated.vm_status(),
            });
        }
        Ok(Response::new(simulated, state))
    }

    pub async fn submit(
        &self,
        txn: &SignedTransaction,
    ) -> AptosResult<Response<PendingTransaction>> {
        let body = txn.to_bcs_bytes()?;
        let url = self.build_path("transactions")?;
        let response = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, BCS_SIGNED_TRANSACTION)
            .body(body)
            .send()
            .await?;
        let response: Response<PendingTransaction> = self.json(response).await?;
        info!(
            hash = %response.inner().hash,
            sender = %txn.sender(),
            sequence_number = txn.sequence_number(),
            "Submitted transaction"
        );
        Ok(response)
    }

    pub async fn submit_and_wait(
        &self,
        txn: &SignedTransaction,
    ) -> AptosResult<Response<Transaction>> {
        let pending = self.submit(txn).await?.into_inner();
        self.wait_for_transaction(&pending).await
    }

    pub async fn wait_for_transaction(
        &self,
        pending: &PendingTransaction,
    ) -> AptosResult<Response<Transaction>> {
        self.wait_for_transaction_by_hash(
            pending.hash,
            *pending.expiration_timestamp_secs.inner(),
            None,
            None,
        )
        .await
    }

    /// Polls `transactions/by_hash` until the transaction is committed.
    ///
    /// Unknown and pending transactions are polled again after `delay`. A committed
    /// transaction that failed in the VM is an error. Polling stops once the ledger
    /// passes `expiration_timestamp_secs` or `timeout` has elapsed.
    pub async fn wait_for_transaction_by_hash(
        &self,
        hash: HashValue,
        expiration_timestamp_secs: u64,
        timeout: Option<Duration>,
        delay: Option<Duration>,
    ) -> AptosResult<Response<Transaction>> {
        let start = Instant::now();
        let timeout = timeout.unwrap_or(DEFAULT_MAX_WAIT);
        let delay = delay.unwrap_or(DEFAULT_DELAY);

        loop {
            let state = match self.get_transaction_by_hash(hash).await {
                Ok(response) => {
                    let (txn, state) = response.into_parts();
                    if !txn.is_pending() {
                        if !txn.success() {
                            return Err(RestError::TransactionFailed {
                                hash,
                                vm_status: txn.vm_status(),
                            });
                        }
                        info!(
                            hash = %hash,
                            version = txn.version().unwrap_or_default(),
                            gas_used = txn.gas_used().unwrap_or_default(),
                            "Transaction committed"
                        );
                        return Ok(Response::new(txn, state));
                    }
                    state
                },
                Err(RestError::Api(response)) if response.status_code == StatusCode::NOT_FOUND => {
                    response.state
                },
                Err(err) => return Err(err),
            };

            let now_secs = match state {
                Some(state) => state.timestamp_usecs / 1_000_000,
                None => SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|now| now.as_secs())
                    .unwrap_or_default(),
            };
            if now_secs >= expiration_timestamp_secs {
                return Err(RestError::Timeout {
                    hash,
                    reason: format!(
                        "transaction expired at {} (ledger time {})",
                        expiration_timestamp_secs, now_secs
                    ),
                });
            }
            if start.elapsed() >= timeout {
                return Err(RestError::Timeout {
                    hash,
                    reason: format!("still pending after {:?}", timeout),
                });
            }

            debug!(hash = %hash, "Transaction not committed yet");
            tokio::time::sleep(delay).await;
        }
    }

    fn build_path(&self, path: &str) -> AptosResult<Url> {
        Ok(self.base_url.join(&self.version_path_base)?.join(path)?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> AptosResult<Response<T>> {
        debug!(url = %url, "GET");
        let response = self.inner.get(url).send().await?;
        self.json(response).await
    }

    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> AptosResult<(reqwest::Response, Option<State>)> {
        let status_code = response.status();
        let state = State::from_headers(response.headers());
        if !status_code.is_success() {
            let text = response.text().await?;
            return match serde_json::from_str::<AptosError>(&text) {
                Ok(error) => Err(AptosErrorResponse {
                    error,
                    status_code,
                    state,
                }
                .into()),
                Err(_) => Err(RestError::Http(text, status_code)),
            };
        }
        Ok((response, state))
    }

    async fn json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AptosResult<Response<T>> {
        let (response, state) = self.check_response(response).await?;
        let bytes = response.bytes().await?;
        let json = serde_json::from_slice(&bytes)?;
        Ok(Response::new(json, state))
    }
}
