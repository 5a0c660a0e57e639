// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::{
    init::{DEFAULT_INDEXER_URL, DEFAULT_REST_URL},
    utils::{
        create_dir_if_not_exist, current_dir, from_yaml, read_from_file, start_logger,
        to_common_result, to_common_success_result, to_yaml, write_to_user_only_file,
    },
};
use async_trait::async_trait;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
    time::Instant,
};
use thiserror::Error;
use url::Url;
use urn_rest_client::{Client, IndexerClient, PendingTransaction, RestError, Transaction};
use urn_sdk::{
    transaction_builder::{DEFAULT_EXPIRATION_SECS, DEFAULT_GAS_UNIT_PRICE, DEFAULT_MAX_GAS_AMOUNT},
    types::{
        account_address::AccountAddress,
        chain_id::ChainId,
        crypto::{Ed25519PrivateKey, Ed25519PublicKey},
        hash::HashValue,
        transaction::authenticator::AuthenticationKey,
        LocalAccount,
    },
    urn_client::{TransactionOptions as GameOptions, UrnClient, DEFAULT_MODULE_OWNER},
};
use urn_types::TypesError;

pub const CONFIG_FOLDER: &str = ".urn";
pub const CONFIG_FILE: &str = "config.yaml";
pub const GIT_IGNORE: &str = ".gitignore";
pub const URN_FOLDER_GIT_IGNORE: &str = "*";
pub const DEFAULT_PROFILE: &str = "default";

/// A common result to be returned to users
pub type CliResult = Result<String, String>;

/// A common result to remove need for typing `Result<T, CliError>`
pub type CliTypedResult<T> = Result<T, CliError>;

/// CLI Errors for reporting through telemetry and outputs
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Aborted command")]
    AbortedError,
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Invalid arguments: {0}")]
    CommandArgumentError(String),
    #[error("Unable to load config: {0}")]
    ConfigNotFoundError(String),
    #[error("Error (IO) for {0}: {1}")]
    IO(String, #[source] std::io::Error),
    #[error("Transaction error: {0}")]
    TransactionError(String),
    #[error("Unable to parse '{0}': error: {1}")]
    UnableToParse(&'static str, String),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl CliError {
    pub fn to_str(&self) -> &'static str {
        match self {
            CliError::AbortedError => "AbortedError",
            CliError::ApiError(_) => "ApiError",
            CliError::CommandArgumentError(_) => "CommandArgumentError",
            CliError::ConfigNotFoundError(_) => "ConfigNotFoundError",
            CliError::IO(_, _) => "IO",
            CliError::TransactionError(_) => "TransactionError",
            CliError::UnableToParse(_, _) => "UnableToParse",
            CliError::UnexpectedError(_) => "UnexpectedError",
        }
    }

    fn from_rest_error(err: &RestError, message: String) -> Self {
        match err {
            RestError::Api(_)
            | RestError::Http(_, _)
            | RestError::Indexer(_)
            | RestError::Request(_) => CliError::ApiError(message),
            RestError::TransactionFailed { .. }
            | RestError::SimulationFailed { .. }
            | RestError::Timeout { .. } => CliError::TransactionError(message),
            _ => CliError::UnexpectedError(message),
        }
    }
}

impl From<RestError> for CliError {
    fn from(err: RestError) -> Self {
        let message = err.to_string();
        CliError::from_rest_error(&err, message)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        match err.chain().find_map(|cause| cause.downcast_ref::<RestError>()) {
            Some(rest_error) => CliError::from_rest_error(rest_error, message),
            None => CliError::UnexpectedError(message),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        CliError::UnableToParse("YAML", e.to_string())
    }
}

impl From<TypesError> for CliError {
    fn from(e: TypesError) -> Self {
        CliError::CommandArgumentError(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for CliError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        CliError::UnableToParse("UTF-8", e.to_string())
    }
}

/// Where to look for the `.urn` folder
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSearchMode {
    CurrentDir,
    CurrentDirAndParents,
}

/// Config saved to `.urn/config.yaml`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Map of profile configs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<BTreeMap<String, ProfileConfig>>,
}

/// An individual profile
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Private key for commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<Ed25519PrivateKey>,
    /// Public key for commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Ed25519PublicKey>,
    /// Account for commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountAddress>,
    /// URL for the fullnode REST API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_url: Option<String>,
    /// URL for the token indexer GraphQL endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
    /// Account that published the game modules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_address: Option<AccountAddress>,
}

/// ProfileConfig but without the private parts
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub has_private_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Ed25519PublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_address: Option<AccountAddress>,
}

impl From<&ProfileConfig> for ProfileSummary {
    fn from(config: &ProfileConfig) -> Self {
        ProfileSummary {
            has_private_key: config.private_key.is_some(),
            public_key: config.public_key,
            account: config.account_address(),
            rest_url: config.rest_url.clone(),
            indexer_url: config.indexer_url.clone(),
            chain_id: config.chain_id,
            module_address: config.module_address,
        }
    }
}

impl ProfileConfig {
    /// The profile's account, derived from its key when not stored explicitly
    pub fn account_address(&self) -> Option<AccountAddress> {
        self.account.or_else(|| {
            self.private_key
                .as_ref()
                .map(|key| account_address_from_public_key(&key.public_key()))
        })
    }
}

impl CliConfig {
    /// Checks if the config exists in the current working directory
    pub fn config_exists(mode: ConfigSearchMode) -> CliTypedResult<bool> {
        let folder = Self::config_folder(mode)?;
        Ok(folder.join(CONFIG_FILE).exists())
    }

    /// Loads the config from the current working directory or one of its parents
    pub fn load(mode: ConfigSearchMode) -> CliTypedResult<Self> {
        Self::load_from(&Self::config_folder(mode)?)
    }

    pub fn load_from(folder: &Path) -> CliTypedResult<Self> {
        let config_file = folder.join(CONFIG_FILE);
        if !config_file.exists() {
            return Err(CliError::ConfigNotFoundError(format!(
                "{}, have you run `urn init`?",
                config_file.display()
            )));
        }

        from_yaml(&String::from_utf8(read_from_file(config_file.as_path())?)?)
    }

    /// Loads a single profile, or `None` when there is no config or no such profile
    pub fn load_profile(profile: &str) -> CliTypedResult<Option<ProfileConfig>> {
        if !Self::config_exists(ConfigSearchMode::CurrentDirAndParents)? {
            return Ok(None);
        }
        let mut config = Self::load(ConfigSearchMode::CurrentDirAndParents)?;
        Ok(config.remove_profile(profile))
    }

    pub fn remove_profile(&mut self, profile: &str) -> Option<ProfileConfig> {
        self.profiles
            .as_mut()
            .and_then(|profiles| profiles.remove(profile))
    }

    /// Saves the config to `./.urn`
    pub fn save(&self) -> CliTypedResult<()> {
        self.save_to(&Self::config_folder(ConfigSearchMode::CurrentDir)?)
    }

    pub fn save_to(&self, folder: &Path) -> CliTypedResult<()> {
        create_dir_if_not_exist(folder)?;

        // Save over previous config file
        let config_file = folder.join(CONFIG_FILE);
        let config_bytes = to_yaml(&self)?;
        write_to_user_only_file(&config_file, CONFIG_FILE, config_bytes.as_bytes())?;

        // Let's also write a .gitignore that ignores this folder
        let gitignore = folder.join(GIT_IGNORE);
        write_to_user_only_file(&gitignore, GIT_IGNORE, URN_FOLDER_GIT_IGNORE.as_bytes())
    }

    fn config_folder(mode: ConfigSearchMode) -> CliTypedResult<PathBuf> {
        Ok(find_workspace_config(current_dir()?, mode))
    }
}

/// Walks up from `starting_path` looking for a `.urn` folder, falling back to one in
/// `starting_path` itself
pub fn find_workspace_config(starting_path: PathBuf, mode: ConfigSearchMode) -> PathBuf {
    match mode {
        ConfigSearchMode::CurrentDir => starting_path.join(CONFIG_FOLDER),
        ConfigSearchMode::CurrentDirAndParents => {
            let mut current_path = starting_path.clone();
            loop {
                current_path.push(CONFIG_FOLDER);
                if current_path.is_dir() {
                    break current_path;
                } else if !(current_path.pop() && current_path.pop()) {
                    // If we aren't able to find the folder, we'll create a new one right here
                    break starting_path.join(CONFIG_FOLDER);
                }
            }
        },
    }
}

pub fn account_address_from_public_key(public_key: &Ed25519PublicKey) -> AccountAddress {
    AuthenticationKey::ed25519(public_key).account_address()
}

#[derive(Clone, Debug, Parser)]
pub struct ProfileOptions {
    /// Profile to use from config
    #[clap(long, default_value = DEFAULT_PROFILE)]
    pub profile: String,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
        }
    }
}

impl ProfileOptions {
    /// The account of the selected profile
    pub fn account_address(&self) -> CliTypedResult<AccountAddress> {
        CliConfig::load_profile(&self.profile)?
            .and_then(|profile| profile.account_address())
            .ok_or_else(|| {
                CliError::ConfigNotFoundError(format!(
                    "Profile {} has no account, pass '--account' or run `urn init`",
                    self.profile
                ))
            })
    }
}

#[derive(Debug, Default, Parser)]
pub struct PrivateKeyInputOptions {
    /// Private key input file name, holding a hex encoded key
    #[clap(long, group = "private_key_input")]
    private_key_file: Option<PathBuf>,
    /// Private key encoded as a hex literal (0x...)
    #[clap(long, group = "private_key_input")]
    private_key: Option<String>,
}

impl PrivateKeyInputOptions {
    pub fn from_private_key(private_key: &Ed25519PrivateKey) -> Self {
        PrivateKeyInputOptions {
            private_key: Some(private_key.to_encoded_string()),
            private_key_file: None,
        }
    }

    /// Extract private key from CLI args with fallback to config
    pub fn extract_private_key(&self, profile: &str) -> CliTypedResult<Ed25519PrivateKey> {
        if let Some(key) = self.extract_private_key_cli()? {
            Ok(key)
        } else if let Some(Some(private_key)) =
            CliConfig::load_profile(profile)?.map(|p| p.private_key)
        {
            Ok(private_key)
        } else {
            Err(CliError::CommandArgumentError(
                "One of ['--private-key', '--private-key-file'] or a profile with a key must be used"
                    .to_string(),
            ))
        }
    }

    /// Extract private key from CLI args
    pub fn extract_private_key_cli(&self) -> CliTypedResult<Option<Ed25519PrivateKey>> {
        if let Some(ref file) = self.private_key_file {
            let encoded = String::from_utf8(read_from_file(file.as_path())?)?;
            parse_private_key("--private-key-file", &encoded).map(Some)
        } else if let Some(ref key) = self.private_key {
            parse_private_key("--private-key", key).map(Some)
        } else {
            Ok(None)
        }
    }
}

pub fn parse_private_key(name: &'static str, encoded: &str) -> CliTypedResult<Ed25519PrivateKey> {
    Ed25519PrivateKey::from_encoded_string(encoded.trim())
        .map_err(|err| CliError::UnableToParse(name, err.to_string()))
}

/// Options specific to using the Rest endpoint
#[derive(Debug, Default, Parser)]
pub struct RestOptions {
    /// URL to a fullnode on the network
    ///
    /// Defaults to the URL in the profile, then <https://fullnode.testnet.aptoslabs.com>
    #[clap(long)]
    pub url: Option<Url>,
}

impl RestOptions {
    /// Retrieve the URL from the command line, falling back to the profile
    pub fn url(&self, profile: &str) -> CliTypedResult<Url> {
        if let Some(ref url) = self.url {
            return Ok(url.clone());
        }
        self.url_with_profile(CliConfig::load_profile(profile)?.as_ref())
    }

    pub fn url_with_profile(&self, profile: Option<&ProfileConfig>) -> CliTypedResult<Url> {
        resolve_url(
            "Rest URL",
            self.url.as_ref(),
            profile.and_then(|p| p.rest_url.as_deref()),
            DEFAULT_REST_URL,
        )
    }

    pub fn client(&self, profile: &str) -> CliTypedResult<Client> {
        Ok(Client::new(self.url(profile)?)?)
    }
}

/// Options for the token indexer
#[derive(Debug, Default, Parser)]
pub struct IndexerOptions {
    /// URL of the token indexer GraphQL endpoint
    ///
    /// Defaults to the URL in the profile, then <https://api.testnet.aptoslabs.com/v1/graphql>
    #[clap(long)]
    pub indexer_url: Option<Url>,
}

impl IndexerOptions {
    pub fn url(&self, profile: &str) -> CliTypedResult<Url> {
        if let Some(ref url) = self.indexer_url {
            return Ok(url.clone());
        }
        self.url_with_profile(CliConfig::load_profile(profile)?.as_ref())
    }

    pub fn url_with_profile(&self, profile: Option<&ProfileConfig>) -> CliTypedResult<Url> {
        resolve_url(
            "Indexer URL",
            self.indexer_url.as_ref(),
            profile.and_then(|p| p.indexer_url.as_deref()),
            DEFAULT_INDEXER_URL,
        )
    }

    pub fn client(&self, profile: &str) -> CliTypedResult<IndexerClient> {
        Ok(IndexerClient::new(self.url(profile)?)?)
    }
}

fn resolve_url(
    name: &'static str,
    cli_url: Option<&Url>,
    profile_url: Option<&str>,
    default_url: &str,
) -> CliTypedResult<Url> {
    if let Some(url) = cli_url {
        Ok(url.clone())
    } else if let Some(url) = profile_url {
        Url::parse(url).map_err(|err| CliError::UnableToParse(name, err.to_string()))
    } else {
        Url::parse(default_url).map_err(|err| {
            CliError::UnexpectedError(format!("Failed to parse default {} {}", name, err))
        })
    }
}

/// Gas price options for manipulating how to prioritize transactions
#[derive(Debug, Eq, Parser, PartialEq)]
pub struct GasOptions {
    /// Gas multiplier per unit of gas, in octas
    #[clap(long, default_value_t = DEFAULT_GAS_UNIT_PRICE)]
    pub gas_unit_price: u64,
    /// Maximum amount of gas units to be used to send this transaction
    #[clap(long, default_value_t = DEFAULT_MAX_GAS_AMOUNT)]
    pub max_gas: u64,
    /// Number of seconds until the transaction expires
    #[clap(long, default_value_t = DEFAULT_EXPIRATION_SECS)]
    pub expiration_secs: u64,
    /// Submit without simulating first
    #[clap(long)]
    pub skip_simulation: bool,
}

impl Default for GasOptions {
    fn default() -> Self {
        GasOptions {
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            max_gas: DEFAULT_MAX_GAS_AMOUNT,
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            skip_simulation: false,
        }
    }
}

impl From<&GasOptions> for GameOptions {
    fn from(options: &GasOptions) -> Self {
        GameOptions {
            max_gas_amount: options.max_gas,
            gas_unit_price: options.gas_unit_price,
            timeout_secs: options.expiration_secs,
            simulate: !options.skip_simulation,
        }
    }
}

/// A wrapper around `AccountAddress` to be more flexible from strings than AccountAddress
#[derive(Clone, Copy, Debug)]
pub struct AccountAddressWrapper {
    pub account_address: AccountAddress,
}

impl FromStr for AccountAddressWrapper {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AccountAddressWrapper {
            account_address: load_account_arg(s)?,
        })
    }
}

/// Loads an account arg and allows for naming based on profiles
pub fn load_account_arg(str: &str) -> Result<AccountAddress, CliError> {
    if str.starts_with("0x") {
        AccountAddress::from_hex_literal(str).map_err(|err| {
            CliError::CommandArgumentError(format!("Failed to parse AccountAddress {}", err))
        })
    } else if let Ok(account_address) = AccountAddress::from_str(str) {
        Ok(account_address)
    } else if let Some(account_address) =
        CliConfig::load_profile(str)?.and_then(|profile| profile.account_address())
    {
        Ok(account_address)
    } else {
        Err(CliError::CommandArgumentError(format!(
            "'{}' is neither an account address nor a profile with an account",
            str
        )))
    }
}

/// Options for the game modules
#[derive(Debug, Default, Parser)]
pub struct ModuleOptions {
    /// Address of the account that published `urn_to_earn` and `knife`
    #[clap(long)]
    pub module_address: Option<AccountAddressWrapper>,
}

impl ModuleOptions {
    pub fn module_address(
        &self,
        profile: Option<&ProfileConfig>,
    ) -> CliTypedResult<AccountAddress> {
        if let Some(wrapper) = self.module_address {
            Ok(wrapper.account_address)
        } else if let Some(address) = profile.and_then(|p| p.module_address) {
            Ok(address)
        } else {
            Ok(AccountAddress::from_hex_literal(DEFAULT_MODULE_OWNER)?)
        }
    }
}

/// Common options for sending game transactions
#[derive(Debug, Default, Parser)]
pub struct TransactionOptions {
    #[clap(flatten)]
    pub(crate) private_key_options: PrivateKeyInputOptions,
    #[clap(flatten)]
    pub(crate) profile_options: ProfileOptions,
    #[clap(flatten)]
    pub(crate) rest_options: RestOptions,
    #[clap(flatten)]
    pub(crate) indexer_options: IndexerOptions,
    #[clap(flatten)]
    pub(crate) gas_options: GasOptions,
    #[clap(flatten)]
    pub(crate) module_options: ModuleOptions,
    /// Chain id to sign for, by name (testnet) or number
    ///
    /// Defaults to the chain id in the profile, then testnet (2)
    #[clap(long)]
    pub(crate) chain_id: Option<ChainId>,
}

impl TransactionOptions {
    fn profile(&self) -> &str {
        &self.profile_options.profile
    }

    /// Retrieves the private key
    pub fn private_key(&self) -> CliTypedResult<Ed25519PrivateKey> {
        self.private_key_options.extract_private_key(self.profile())
    }

    /// The sending account; its sequence number is refreshed from chain on every submission
    pub fn sender_account(&self) -> CliTypedResult<LocalAccount> {
        Ok(LocalAccount::from_private_key(self.private_key()?, 0))
    }

    pub fn chain_id(&self) -> CliTypedResult<ChainId> {
        match self.chain_id {
            Some(chain_id) => Ok(chain_id),
            None => Ok(self.chain_id_with_profile(
                CliConfig::load_profile(self.profile())?.as_ref(),
            )),
        }
    }

    fn chain_id_with_profile(&self, profile: Option<&ProfileConfig>) -> ChainId {
        self.chain_id
            .or_else(|| profile.and_then(|p| p.chain_id))
            .unwrap_or_else(ChainId::testnet)
    }

    /// Whether any setting is left for the profile to fill
    fn needs_profile(&self) -> bool {
        self.rest_options.url.is_none()
            || self.indexer_options.indexer_url.is_none()
            || self.module_options.module_address.is_none()
            || self.chain_id.is_none()
    }

    /// Resolves every endpoint and setting, reading the config at most once
    pub fn session(&self) -> CliTypedResult<GameSession> {
        let profile = if self.needs_profile() {
            CliConfig::load_profile(self.profile())?
        } else {
            None
        };
        let profile = profile.as_ref();
        Ok(GameSession {
            rest_client: Client::new(self.rest_options.url_with_profile(profile)?)?,
            indexer_client: IndexerClient::new(self.indexer_options.url_with_profile(profile)?)?,
            module_address: self.module_options.module_address(profile)?,
            chain_id: self.chain_id_with_profile(profile),
            options: GameOptions::from(&self.gas_options),
        })
    }
}

/// Resolved clients and settings for one command run
pub struct GameSession {
    rest_client: Client,
    indexer_client: IndexerClient,
    module_address: AccountAddress,
    chain_id: ChainId,
    options: GameOptions,
}

impl GameSession {
    pub fn urn_client(&self) -> UrnClient<'_> {
        UrnClient::new(&self.rest_client, &self.indexer_client, self.module_address)
            .with_chain_id(self.chain_id)
    }

    pub fn options(&self) -> Option<GameOptions> {
        Some(self.options.clone())
    }

    pub fn rest_client(&self) -> &Client {
        &self.rest_client
    }

    /// Waits for the transaction to commit and summarizes it
    pub async fn wait(&self, pending: PendingTransaction) -> CliTypedResult<TransactionSummary> {
        let transaction = self
            .rest_client
            .wait_for_transaction(&pending)
            .await?
            .into_inner();
        Ok(TransactionSummary::from(transaction))
    }
}

/// A common trait for all CLI commands to have consistent outputs
#[async_trait]
pub trait CliCommand<T: Serialize + Send>: Sized + Send {
    /// Returns a name for logging purposes
    fn command_name(&self) -> &'static str;

    /// Executes the command, returning a command specific type
    async fn execute(self) -> CliTypedResult<T>;

    /// Executes the command, and serializes it to the common JSON output type
    async fn execute_serialized(self) -> CliResult {
        let command_name = self.command_name();
        start_logger();
        let start_time = Instant::now();
        to_common_result(command_name, start_time, self.execute().await)
    }

    /// Executes the command, and throws away Ok(result) for the string Success
    async fn execute_serialized_success(self) -> CliResult {
        start_logger();
        let command_name = self.command_name();
        let start_time = Instant::now();
        to_common_success_result(
            command_name,
            start_time,
            self.execute().await.map(|_| ()),
        )
    }
}

/// A shortened transaction output
#[derive(Clone, Debug, Default, Serialize)]
pub struct TransactionSummary {
    pub transaction_hash: HashValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    pub success: bool,
    pub vm_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<AccountAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,
}

impl From<Transaction> for TransactionSummary {
    fn from(transaction: Transaction) -> Self {
        TransactionSummary {
            transaction_hash: transaction.hash,
            version: transaction.version(),
            gas_used: transaction.gas_used(),
            success: transaction.success(),
            vm_status: transaction.vm_status(),
            sender: transaction.sender,
            sequence_number: transaction.sequence_number.map(|seq| *seq.inner()),
        }
    }
}
