// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{rest_client::Client as ApiClient, types::account_address::AccountAddress};
use anyhow::{Context, Result};
use urn_types::utility_coin::octas_to_apt;

#[derive(Clone, Debug)]
pub struct CoinClient<'a> {
    api_client: &'a ApiClient,
}

impl<'a> CoinClient<'a> {
    pub fn new(api_client: &'a ApiClient) -> Self {
        Self { api_client }
    }

    /// Balance in octas.
    pub async fn get_account_balance(&self, account: &AccountAddress) -> Result<u64> {
        let response = self
            .api_client
            .get_account_balance(*account)
            .await
            .context("Failed to get account balance")?;
        Ok(response.inner().get())
    }

    /// Balance in APT.
    pub async fn get_balance(&self, account: &AccountAddress) -> Result<f64> {
        Ok(octas_to_apt(self.get_account_balance(account).await?))
    }
}
