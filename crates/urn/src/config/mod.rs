// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{
    CliCommand, CliConfig, CliResult, CliTypedResult, ConfigSearchMode, ProfileSummary,
};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;

/// Tool for interacting with configuration of the urn tool
#[derive(Debug, Subcommand)]
pub enum ConfigTool {
    ShowProfiles(ShowProfiles),
}

impl ConfigTool {
    pub async fn execute(self) -> CliResult {
        match self {
            ConfigTool::ShowProfiles(tool) => tool.execute_serialized().await,
        }
    }
}

/// Shows the current profiles available
///
/// This will only show public information and will not show
/// private information
#[derive(Debug, Parser)]
pub struct ShowProfiles {
    /// Which profile to show
    ///
    /// If provided, show only this profile
    #[clap(long)]
    profile: Option<String>,
}

#[async_trait]
impl CliCommand<BTreeMap<String, ProfileSummary>> for ShowProfiles {
    fn command_name(&self) -> &'static str {
        "ShowProfiles"
    }

    async fn execute(self) -> CliTypedResult<BTreeMap<String, ProfileSummary>> {
        // Load the profile config
        let config = CliConfig::load(ConfigSearchMode::CurrentDirAndParents)?;
        Ok(summarize_profiles(config, self.profile.as_deref()))
    }
}

pub fn summarize_profiles(
    config: CliConfig,
    only: Option<&str>,
) -> BTreeMap<String, ProfileSummary> {
    config
        .profiles
        .unwrap_or_default()
        .into_iter()
        .filter(|(key, _)| only.map_or(true, |profile| profile == key))
        .map(|(key, profile)| (key, ProfileSummary::from(&profile)))
        .collect()
}
