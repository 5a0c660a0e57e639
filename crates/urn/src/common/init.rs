// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::{
    types::{
        account_address_from_public_key, parse_private_key, CliCommand, CliConfig, CliError,
        CliTypedResult, ConfigSearchMode, ModuleOptions, PrivateKeyInputOptions, ProfileConfig,
        ProfileOptions,
    },
    utils::{prompt_yes, read_line},
};
use async_trait::async_trait;
use clap::Parser;
use std::collections::BTreeMap;
use tracing::info;
use url::Url;
use urn_sdk::types::{
    account_address::AccountAddress, chain_id::ChainId, crypto::Ed25519PrivateKey,
};

pub const DEFAULT_REST_URL: &str = "https://fullnode.testnet.aptoslabs.com";
pub const DEFAULT_INDEXER_URL: &str = "https://api.testnet.aptoslabs.com/v1/graphql";

/// Tool to initialize current directory for the urn tool
///
/// Writes a profile to `.urn/config.yaml`.  When no key is given, one is prompted for,
/// and an empty answer generates a new key.
#[derive(Debug, Parser)]
pub struct InitTool {
    #[clap(flatten)]
    private_key_options: PrivateKeyInputOptions,
    #[clap(flatten)]
    profile_options: ProfileOptions,
    #[clap(flatten)]
    module_options: ModuleOptions,
    /// URL to a fullnode on the network
    #[clap(long)]
    rest_url: Option<Url>,
    /// URL of the token indexer GraphQL endpoint
    #[clap(long)]
    indexer_url: Option<Url>,
    /// Chain id to sign for, by name (testnet) or number
    #[clap(long)]
    chain_id: Option<ChainId>,
    /// Overwrite an existing profile and generate a key without prompting
    #[clap(long)]
    assume_yes: bool,
}

#[async_trait]
impl CliCommand<()> for InitTool {
    fn command_name(&self) -> &'static str {
        "Init"
    }

    async fn execute(self) -> CliTypedResult<()> {
        let profile_name = self.profile_options.profile.clone();
        let mut config = if CliConfig::config_exists(ConfigSearchMode::CurrentDir)? {
            CliConfig::load(ConfigSearchMode::CurrentDir)?
        } else {
            CliConfig::default()
        };

        let exists = config
            .profiles
            .as_ref()
            .map_or(false, |profiles| profiles.contains_key(&profile_name));
        if exists
            && !self.assume_yes
            && !prompt_yes(&format!(
                "Profile {} already exists, do you want to overwrite it?",
                profile_name
            ))
        {
            return Err(CliError::AbortedError);
        }

        // If someone provided an input private key, don't ask them to pass it in
        let private_key = match self.private_key_options.extract_private_key_cli()? {
            Some(private_key) => private_key,
            None if self.assume_yes => generate_private_key(),
            None => private_key_prompt()?,
        };

        let module_address = match self.module_options.module_address {
            Some(wrapper) => wrapper.account_address,
            None => AccountAddress::from_hex_literal(urn_sdk::urn_client::DEFAULT_MODULE_OWNER)?,
        };
        let profile = profile_config(
            private_key,
            self.rest_url.as_ref().map(Url::to_string),
            self.indexer_url.as_ref().map(Url::to_string),
            self.chain_id.unwrap_or_else(ChainId::testnet),
            module_address,
        );
        let account = profile.account.unwrap_or_default();
        info!(profile = %profile_name, account = %account, "Writing profile");

        config
            .profiles
            .get_or_insert_with(BTreeMap::new)
            .insert(profile_name.clone(), profile);
        config.save()?;
        eprintln!(
            "Urn is now set up for account {} as profile {}!  Run `urn help` for more information about commands",
            account, profile_name
        );

        Ok(())
    }
}

/// Builds a profile, filling unset URLs with the testnet defaults
pub fn profile_config(
    private_key: Ed25519PrivateKey,
    rest_url: Option<String>,
    indexer_url: Option<String>,
    chain_id: ChainId,
    module_address: AccountAddress,
) -> ProfileConfig {
    let public_key = private_key.public_key();
    ProfileConfig {
        account: Some(account_address_from_public_key(&public_key)),
        public_key: Some(public_key),
        private_key: Some(private_key),
        rest_url: Some(rest_url.unwrap_or_else(|| DEFAULT_REST_URL.to_string())),
        indexer_url: Some(indexer_url.unwrap_or_else(|| DEFAULT_INDEXER_URL.to_string())),
        chain_id: Some(chain_id),
        module_address: Some(module_address),
    }
}

fn generate_private_key() -> Ed25519PrivateKey {
    Ed25519PrivateKey::generate(&mut rand::rngs::OsRng)
}

/// Read the private key from the command line prompt
fn private_key_prompt() -> CliTypedResult<Ed25519PrivateKey> {
    eprintln!("Enter your private key as a hex literal (0x...) [No input: Generate new key]");
    let input = read_line("Private key")?;
    let input = input.trim();
    if input.is_empty() {
        eprintln!("No key given, generating key...");
        Ok(generate_private_key())
    } else {
        parse_private_key("Ed25519PrivateKey", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_some_eq;

    #[test]
    fn profiles_default_to_testnet() {
        let private_key = Ed25519PrivateKey::from_encoded_string(
            "0xeba9b94746377de1b644a2c11765dcfd7521f4218461aba724969463a8372f9a",
        )
        .unwrap();
        let expected_account = account_address_from_public_key(&private_key.public_key());

        let profile = profile_config(
            private_key,
            None,
            Some("http://localhost:8090/v1/graphql".to_string()),
            ChainId::testnet(),
            AccountAddress::ONE,
        );
        assert_some_eq!(profile.account, expected_account);
        assert_some_eq!(profile.rest_url, DEFAULT_REST_URL.to_string());
        assert_some_eq!(
            profile.indexer_url,
            "http://localhost:8090/v1/graphql".to_string()
        );
        assert_some_eq!(profile.chain_id, ChainId::new(2));
        assert_some_eq!(profile.module_address, AccountAddress::ONE);
    }

    #[test]
    fn generated_keys_are_distinct() {
        assert_ne!(
            generate_private_key().to_encoded_string(),
            generate_private_key().to_encoded_string()
        );
    }
}
