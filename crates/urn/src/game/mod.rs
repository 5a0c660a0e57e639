// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Commands that send transactions to the `urn_to_earn` and `knife` modules.
//!
//! Each one signs with the selected profile (or `--private-key`), waits for the
//! transaction to commit and prints a [`TransactionSummary`].

use crate::common::types::{
    AccountAddressWrapper, CliCommand, CliTypedResult, TransactionOptions, TransactionSummary,
};
use async_trait::async_trait;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use urn_sdk::urn_client::{
    MintTarget, ShovelDig, DEFAULT_RANDOM_ROB_MESSAGE, DEFAULT_ROB_MESSAGE,
};

/// Mint a shovel, an urn, or forge
#[derive(Debug, Parser)]
pub struct Mint {
    /// What to mint: `shovel`, `urn` or `forge`
    #[clap(long)]
    target: MintTarget,
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

#[async_trait]
impl CliCommand<TransactionSummary> for Mint {
    fn command_name(&self) -> &'static str {
        "Mint"
    }

    async fn execute(self) -> CliTypedResult<TransactionSummary> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let pending = session
            .urn_client()
            .mint(&mut account, self.target, session.options())
            .await?;
        session.wait(pending).await
    }
}

/// Dig with a shovel for bone parts
#[derive(Debug, Parser)]
pub struct Dig {
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

#[async_trait]
impl CliCommand<TransactionSummary> for Dig {
    fn command_name(&self) -> &'static str {
        "Dig"
    }

    async fn execute(self) -> CliTypedResult<TransactionSummary> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let pending = session
            .urn_client()
            .dig(&mut account, session.options())
            .await?;
        session.wait(pending).await
    }
}

/// Call the gas heavy `high_cost_func`
#[derive(Debug, Parser)]
pub struct HighCost {
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

#[async_trait]
impl CliCommand<TransactionSummary> for HighCost {
    fn command_name(&self) -> &'static str {
        "HighCost"
    }

    async fn execute(self) -> CliTypedResult<TransactionSummary> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let pending = session
            .urn_client()
            .high_cost_func(&mut account, session.options())
            .await?;
        session.wait(pending).await
    }
}

/// Rob ash from another player's fullest urn
///
/// The robber's urn is the last `urn` token they own, the victim's the `urn` holding the
/// most ash.
#[derive(Debug, Parser)]
pub struct Rob {
    /// Account to rob, as an address or a profile name
    #[clap(long)]
    victim: AccountAddressWrapper,
    /// Message left for the victim
    #[clap(long, default_value = DEFAULT_ROB_MESSAGE)]
    message: String,
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

#[async_trait]
impl CliCommand<TransactionSummary> for Rob {
    fn command_name(&self) -> &'static str {
        "Rob"
    }

    async fn execute(self) -> CliTypedResult<TransactionSummary> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let pending = session
            .urn_client()
            .rob(
                &mut account,
                self.victim.account_address,
                &self.message,
                session.options(),
            )
            .await?;
        session.wait(pending).await
    }
}

/// Rob a victim chosen on chain
#[derive(Debug, Parser)]
pub struct RandomRob {
    /// Message left for the victim
    #[clap(long, default_value = DEFAULT_RANDOM_ROB_MESSAGE)]
    message: String,
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

#[async_trait]
impl CliCommand<TransactionSummary> for RandomRob {
    fn command_name(&self) -> &'static str {
        "RandomRob"
    }

    async fn execute(self) -> CliTypedResult<TransactionSummary> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let pending = session
            .urn_client()
            .random_rob(&mut account, &self.message, session.options())
            .await?;
        session.wait(pending).await
    }
}

/// Burn a bone part into an urn
#[derive(Debug, Parser)]
pub struct PutBonePart {
    /// Name of the bone token, e.g. `hip` or `golden hip`
    #[clap(long)]
    part: String,
    /// Fill the golden urn, only golden parts are accepted
    #[clap(long)]
    golden: bool,
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

#[async_trait]
impl CliCommand<TransactionSummary> for PutBonePart {
    fn command_name(&self) -> &'static str {
        "PutBonePart"
    }

    async fn execute(self) -> CliTypedResult<TransactionSummary> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let pending = session
            .urn_client()
            .put_bone_part(&mut account, &self.part, self.golden, session.options())
            .await?;
        session.wait(pending).await
    }
}

/// Create the knife module's rob history for the account
#[derive(Debug, Parser)]
pub struct CreateRobHistory {
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

#[async_trait]
impl CliCommand<TransactionSummary> for CreateRobHistory {
    fn command_name(&self) -> &'static str {
        "CreateRobHistory"
    }

    async fn execute(self) -> CliTypedResult<TransactionSummary> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let pending = session
            .urn_client()
            .create_rob_history(&mut account, session.options())
            .await?;
        session.wait(pending).await
    }
}

/// Repeatedly mint a shovel and dig with it
///
/// A failed iteration is logged and the next one starts.
#[derive(Debug, Parser)]
pub struct MintShovelDig {
    /// How many shovels to mint and dig with
    #[clap(long, default_value_t = 1)]
    iterations: u64,
    #[clap(flatten)]
    txn_options: TransactionOptions,
}

/// Outcome of one mint-and-dig round
#[derive(Debug, Serialize)]
pub struct IterationSummary {
    pub iteration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint: Option<TransactionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dig: Option<TransactionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[async_trait]
impl CliCommand<Vec<IterationSummary>> for MintShovelDig {
    fn command_name(&self) -> &'static str {
        "MintShovelDig"
    }

    async fn execute(self) -> CliTypedResult<Vec<IterationSummary>> {
        let session = self.txn_options.session()?;
        let mut account = self.txn_options.sender_account()?;
        let urn_client = session.urn_client();

        let mut summaries = Vec::new();
        for iteration in 0..self.iterations {
            let summary = match urn_client
                .mint_shovel_and_dig(&mut account, session.options())
                .await
            {
                Ok(ShovelDig { mint, dig: Ok(dig) }) => {
                    info!(iteration = iteration, dig = %dig.hash, "Finished mint and dig");
                    IterationSummary {
                        iteration,
                        mint: Some(mint.into()),
                        dig: Some(dig.into()),
                        error: None,
                    }
                },
                Ok(ShovelDig { mint, dig: Err(err) }) => {
                    warn!(iteration = iteration, mint = %mint.hash, error = %format!("{:#}", err), "Dig failed");
                    IterationSummary {
                        iteration,
                        mint: Some(mint.into()),
                        dig: None,
                        error: Some(format!("{:#}", err)),
                    }
                },
                Err(err) => {
                    warn!(iteration = iteration, error = %format!("{:#}", err), "Mint failed");
                    IterationSummary {
                        iteration,
                        mint: None,
                        dig: None,
                        error: Some(format!("{:#}", err)),
                    }
                },
            };
            summaries.push(summary);
        }
        Ok(summaries)
    }
}
