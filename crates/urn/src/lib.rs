// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod account;
pub mod common;
pub mod config;
pub mod game;

use crate::common::types::{CliCommand, CliResult};
use clap::Parser;

/// Command line tool for the urn-to-earn game
///
/// Every command prints a JSON object, `{"Result": ...}` on success and `{"Error": ...}`
/// on failure.
#[derive(Parser)]
#[clap(name = "urn", author, version, propagate_version = true)]
pub enum Tool {
    /// Tool for reading account tokens and balances
    #[clap(subcommand)]
    Account(account::AccountTool),
    /// Tool for inspecting the local configuration
    #[clap(subcommand)]
    Config(config::ConfigTool),
    CreateRobHistory(game::CreateRobHistory),
    Dig(game::Dig),
    HighCost(game::HighCost),
    Init(common::init::InitTool),
    Mint(game::Mint),
    MintShovelDig(game::MintShovelDig),
    PutBonePart(game::PutBonePart),
    RandomRob(game::RandomRob),
    Rob(game::Rob),
}

impl Tool {
    pub async fn execute(self) -> CliResult {
        use Tool::*;
        match self {
            Account(tool) => tool.execute().await,
            Config(tool) => tool.execute().await,
            CreateRobHistory(tool) => tool.execute_serialized().await,
            Dig(tool) => tool.execute_serialized().await,
            HighCost(tool) => tool.execute_serialized().await,
            Init(tool) => tool.execute_serialized_success().await,
            Mint(tool) => tool.execute_serialized().await,
            MintShovelDig(tool) => tool.execute_serialized().await,
            PutBonePart(tool) => tool.execute_serialized().await,
            RandomRob(tool) => tool.execute_serialized().await,
            Rob(tool) => tool.execute_serialized().await,
        }
    }
}
