// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{
    AccountAddressWrapper, CliCommand, CliResult, CliTypedResult, IndexerOptions, ProfileOptions,
    RestOptions,
};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use serde::Serialize;
use urn_rest_client::AccountToken;
use urn_sdk::{
    coin_client::CoinClient,
    types::{account_address::AccountAddress, utility_coin::octas_to_apt},
    urn_client::{ASH_PROPERTY, POINT_PROPERTY, URN_COLLECTION},
};

/// Tool for reading an account's game state
#[derive(Debug, Subcommand)]
pub enum AccountTool {
    Balance(Balance),
    Tokens(ListTokens),
}

impl AccountTool {
    pub async fn execute(self) -> CliResult {
        match self {
            AccountTool::Balance(tool) => tool.execute_serialized().await,
            AccountTool::Tokens(tool) => tool.execute_serialized().await,
        }
    }
}

/// Account to read, defaulting to the profile's account
#[derive(Debug, Default, Parser)]
pub struct AccountOptions {
    /// Address or profile name of the account
    #[clap(long)]
    account: Option<AccountAddressWrapper>,
    #[clap(flatten)]
    profile_options: ProfileOptions,
}

impl AccountOptions {
    pub fn account_address(&self) -> CliTypedResult<AccountAddress> {
        match self.account {
            Some(wrapper) => Ok(wrapper.account_address),
            None => self.profile_options.account_address(),
        }
    }

    fn profile(&self) -> &str {
        &self.profile_options.profile
    }
}

/// List the account's tokens in the `urn` collection
#[derive(Debug, Parser)]
pub struct ListTokens {
    #[clap(flatten)]
    account_options: AccountOptions,
    #[clap(flatten)]
    indexer_options: IndexerOptions,
}

/// A token of the `urn` collection with its game properties
#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct UrnToken {
    pub name: String,
    pub property_version: u64,
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ash: Option<String>,
}

#[async_trait]
impl CliCommand<Vec<UrnToken>> for ListTokens {
    fn command_name(&self) -> &'static str {
        "ListTokens"
    }

    async fn execute(self) -> CliTypedResult<Vec<UrnToken>> {
        let account = self.account_options.account_address()?;
        let indexer = self
            .indexer_options
            .client(self.account_options.profile())?;
        let tokens = indexer.list_account_tokens(account).await?;
        Ok(urn_tokens(tokens))
    }
}

pub fn urn_tokens(tokens: Vec<AccountToken>) -> Vec<UrnToken> {
    tokens
        .into_iter()
        .filter(|token| token.id.collection == URN_COLLECTION)
        .map(|mut token| UrnToken {
            point: token.properties.remove(POINT_PROPERTY),
            ash: token.properties.remove(ASH_PROPERTY),
            name: token.id.name,
            property_version: token.id.property_version,
            amount: token.amount,
        })
        .collect()
}

/// Show the account's APT balance
#[derive(Debug, Parser)]
pub struct Balance {
    #[clap(flatten)]
    account_options: AccountOptions,
    #[clap(flatten)]
    rest_options: RestOptions,
}

#[derive(Debug, Serialize)]
pub struct BalanceSummary {
    pub account: AccountAddress,
    pub octas: u64,
    pub apt: f64,
}

#[async_trait]
impl CliCommand<BalanceSummary> for Balance {
    fn command_name(&self) -> &'static str {
        "Balance"
    }

    async fn execute(self) -> CliTypedResult<BalanceSummary> {
        let account = self.account_options.account_address()?;
        let client = self.rest_options.client(self.account_options.profile())?;
        let octas = CoinClient::new(&client).get_account_balance(&account).await?;
        Ok(BalanceSummary {
            account,
            octas,
            apt: octas_to_apt(octas),
        })
    }
}
