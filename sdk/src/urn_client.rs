// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Entry functions of the `urn_to_earn` and `knife` modules.
//!
//! Every call looks up the sender's sequence number on chain, signs a fresh
//! transaction, optionally simulates it, and submits it. Token arguments (urn and
//! bone property versions) are resolved through the indexer first.

use crate::{
    rest_client::{
        AccountToken, Client as ApiClient, IndexerClient, PendingTransaction, TokenId, Transaction,
    },
    transaction_builder::{
        TransactionFactory, DEFAULT_EXPIRATION_SECS, DEFAULT_GAS_UNIT_PRICE,
        DEFAULT_MAX_GAS_AMOUNT,
    },
    types::{
        account_address::AccountAddress,
        chain_id::ChainId,
        language_storage::{Identifier, ModuleId},
        transaction::EntryFunction,
        LocalAccount,
    },
};
use anyhow::{anyhow, bail, Context, Result};
use std::{fmt, str::FromStr};
use tracing::info;

/// Account that published the game modules on testnet.
pub const DEFAULT_MODULE_OWNER: &str =
    "0x56260c419e8b176e0ca7f6d439b69180c2de2cb284d8dee24476f247af204492";
pub const URN_TO_EARN_MODULE: &str = "urn_to_earn";
pub const KNIFE_MODULE: &str = "knife";

pub const URN_COLLECTION: &str = "urn";
pub const URN_TOKEN_NAME: &str = "urn";
pub const GOLDEN_URN_TOKEN_NAME: &str = "golden_urn";
pub const ASH_PROPERTY: &str = "ash";
pub const POINT_PROPERTY: &str = "point";

pub const DEFAULT_ROB_MESSAGE: &str = "hello world";
pub const DEFAULT_RANDOM_ROB_MESSAGE: &str = "Hello random guy";

/// What `mint` produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MintTarget {
    Shovel,
    Urn,
    Forge,
}

impl MintTarget {
    pub fn function_name(&self) -> &'static str {
        match self {
            MintTarget::Shovel => "mint_shovel",
            MintTarget::Urn => "mint_urn",
            MintTarget::Forge => "forge",
        }
    }
}

impl fmt::Display for MintTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MintTarget::Shovel => "shovel",
            MintTarget::Urn => "urn",
            MintTarget::Forge => "forge",
        };
        f.write_str(name)
    }
}

impl FromStr for MintTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shovel" => Ok(MintTarget::Shovel),
            "urn" => Ok(MintTarget::Urn),
            "forge" => Ok(MintTarget::Forge),
            _ => Err(anyhow!("unknown mint target {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TransactionOptions {
    pub max_gas_amount: u64,

    pub gas_unit_price: u64,

    /// This is the number of seconds from now you're willing to wait for the
    /// transaction to be committed.
    pub timeout_secs: u64,

    /// Dry-run the transaction before submitting it.
    pub simulate: bool,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            timeout_secs: DEFAULT_EXPIRATION_SECS,
            simulate: true,
        }
    }
}

/// A committed shovel mint and the outcome of the dig that followed it.
#[derive(Debug)]
pub struct ShovelDig {
    pub mint: Transaction,
    pub dig: Result<Transaction>,
}

#[derive(Clone, Debug)]
pub struct UrnClient<'a> {
    api_client: &'a ApiClient,
    indexer: &'a IndexerClient,
    module_owner: AccountAddress,
    chain_id: Option<ChainId>,
}

impl<'a> UrnClient<'a> {
    pub fn new(
        api_client: &'a ApiClient,
        indexer: &'a IndexerClient,
        module_owner: AccountAddress,
    ) -> Self {
        Self {
            api_client,
            indexer,
            module_owner,
            chain_id: None,
        }
    }

    /// Pins the chain id instead of asking the node for it on every call.
    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn module_owner(&self) -> AccountAddress {
        self.module_owner
    }

    async fn get_chain_id(&self) -> Result<ChainId> {
        if let Some(chain_id) = self.chain_id {
            return Ok(chain_id);
        }
        let id = self
            .api_client
            .get_index()
            .await
            .context("Failed to get chain ID")?
            .inner()
            .chain_id;

        Ok(ChainId::try_from(id)?)
    }

    pub async fn mint(
        &self,
        account: &mut LocalAccount,
        target: MintTarget,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        self.submit_entry_function(
            account,
            URN_TO_EARN_MODULE,
            target.function_name(),
            vec![],
            options,
        )
        .await
        .with_context(|| format!("Failed to mint {}", target))
    }

    pub async fn dig(
        &self,
        account: &mut LocalAccount,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        self.submit_entry_function(account, URN_TO_EARN_MODULE, "dig", vec![], options)
            .await
            .context("Failed to dig")
    }

    pub async fn high_cost_func(
        &self,
        account: &mut LocalAccount,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        self.submit_entry_function(account, URN_TO_EARN_MODULE, "high_cost_func", vec![], options)
            .await
            .context("Failed to call high_cost_func")
    }

    /// Robs the victim's urn holding the most ash with the robber's urn.
    pub async fn rob(
        &self,
        robber: &mut LocalAccount,
        victim: AccountAddress,
        message: &str,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let victim_tokens = self.list_tokens(victim).await?;
        let victim_urn = find_richest_urn(&victim_tokens)?
            .ok_or_else(|| anyhow!("victim {} owns no urn with ash", victim))?;
        info!(victim = %victim, property_version = victim_urn.property_version, "Selected victim urn");

        let robber_tokens = self.list_tokens(robber.address()).await?;
        let robber_urn = find_token_by_name(&robber_tokens, URN_TOKEN_NAME)
            .ok_or_else(|| anyhow!("robber {} owns no urn", robber.address()))?;
        info!(robber = %robber.address(), property_version = robber_urn.property_version, "Selected robber urn");

        let args = vec![
            bcs::to_bytes(&robber_urn.property_version)?,
            bcs::to_bytes(&victim)?,
            bcs::to_bytes(&victim_urn.property_version)?,
            bcs::to_bytes(message)?,
        ];
        self.submit_entry_function(robber, URN_TO_EARN_MODULE, "rob", args, options)
            .await
            .context("Failed to rob")
    }

    /// Robs whoever the module picks.
    pub async fn random_rob(
        &self,
        robber: &mut LocalAccount,
        message: &str,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let robber_tokens = self.list_tokens(robber.address()).await?;
        let robber_urn = find_token_by_name(&robber_tokens, URN_TOKEN_NAME)
            .ok_or_else(|| anyhow!("robber {} owns no urn", robber.address()))?;
        info!(robber = %robber.address(), property_version = robber_urn.property_version, "Selected robber urn");

        let args = vec![
            bcs::to_bytes(&robber_urn.property_version)?,
            bcs::to_bytes(message)?,
        ];
        self.submit_entry_function(robber, URN_TO_EARN_MODULE, "random_rob", args, options)
            .await
            .context("Failed to random rob")
    }

    /// Burns a bone token into the matching urn. Golden parts go into the golden urn.
    pub async fn put_bone_part(
        &self,
        account: &mut LocalAccount,
        part: &str,
        golden: bool,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let tokens = self.list_tokens(account.address()).await?;
        check_bone_part(part, golden)?;

        let bone = find_token_by_name(&tokens, part)
            .ok_or_else(|| anyhow!("no bone token found"))?;
        info!(part = part, property_version = bone.property_version, "Selected bone token");

        let urn_name = urn_token_name(golden);
        let urn = find_token_by_name(&tokens, urn_name)
            .ok_or_else(|| anyhow!("no {} token found", urn_name))?;
        info!(urn = urn_name, property_version = urn.property_version, "Selected urn token");

        let function = if golden {
            "burn_and_fill_golden"
        } else {
            "burn_and_fill"
        };
        let args = vec![
            bcs::to_bytes(&urn.property_version)?,
            bcs::to_bytes(&bone.property_version)?,
            bcs::to_bytes(part)?,
        ];
        self.submit_entry_function(account, URN_TO_EARN_MODULE, function, args, options)
            .await
            .with_context(|| format!("Failed to put bone part {}", part))
    }

    pub async fn create_rob_history(
        &self,
        account: &mut LocalAccount,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        self.submit_entry_function(
            account,
            KNIFE_MODULE,
            "create_rob_history_manually",
            vec![],
            options,
        )
        .await
        .context("Failed to create rob history")
    }

    /// Mints a shovel and digs with it, waiting for each to commit.
    ///
    /// Fails only when the mint does not commit. A committed mint is returned along
    /// with the outcome of the dig.
    pub async fn mint_shovel_and_dig(
        &self,
        account: &mut LocalAccount,
        options: Option<TransactionOptions>,
    ) -> Result<ShovelDig> {
        let pending = self
            .mint(account, MintTarget::Shovel, options.clone())
            .await?;
        let mint = self
            .api_client
            .wait_for_transaction(&pending)
            .await
            .context("Failed to mint shovel")?
            .into_inner();
        info!(hash = %mint.hash, "Minted shovel");

        let dig = match self.dig(account, options).await {
            Ok(pending) => self
                .api_client
                .wait_for_transaction(&pending)
                .await
                .map(|response| response.into_inner())
                .context("Failed to dig"),
            Err(err) => Err(err),
        };
        if let Ok(ref dug) = dig {
            info!(hash = %dug.hash, "Dug");
        }

        Ok(ShovelDig { mint, dig })
    }

    async fn list_tokens(&self, owner: AccountAddress) -> Result<Vec<AccountToken>> {
        self.indexer
            .list_account_tokens(owner)
            .await
            .with_context(|| format!("Failed to list tokens of {}", owner))
    }

    async fn submit_entry_function(
        &self,
        account: &mut LocalAccount,
        module: &str,
        function: &str,
        args: Vec<Vec<u8>>,
        options: Option<TransactionOptions>,
    ) -> Result<PendingTransaction> {
        let options = options.unwrap_or_default();

        let sequence_number = *self
            .api_client
            .get_account(account.address())
            .await
            .context("Failed to get account")?
            .inner()
            .sequence_number
            .inner();
        account.set_sequence_number(sequence_number);

        // create factory
        let factory = TransactionFactory::new(self.get_chain_id().await?)
            .with_gas_unit_price(options.gas_unit_price)
            .with_max_gas_amount(options.max_gas_amount)
            .with_transaction_expiration_time(options.timeout_secs);

        // create payload
        let payload = EntryFunction::new(
            ModuleId::new(self.module_owner, Identifier::new(module)?),
            Identifier::new(function)?,
            vec![],
            args,
        );

        // create transaction
        let signed_txn = account.sign_with_transaction_builder(factory.entry_function(payload))?;

        if options.simulate {
            self.api_client
                .simulate_and_check(&signed_txn)
                .await
                .context("Failed to simulate transaction")?;
        }

        // submit and return
        Ok(self
            .api_client
            .submit(&signed_txn)
            .await
            .context("Failed to submit transaction")?
            .into_inner())
    }
}

/// The last token named `name`.
pub fn find_token_by_name<'t>(tokens: &'t [AccountToken], name: &str) -> Option<&'t TokenId> {
    tokens
        .iter()
        .rev()
        .find(|token| token.id.name == name)
        .map(|token| &token.id)
}

/// The urn with the largest `ash`. Urns without the property are skipped; on a tie
/// the later one wins.
pub fn find_richest_urn(tokens: &[AccountToken]) -> Result<Option<&TokenId>> {
    let mut richest: Option<(u64, &TokenId)> = None;
    for token in tokens.iter().filter(|token| token.id.name == URN_TOKEN_NAME) {
        let ash = match token.properties.get(ASH_PROPERTY) {
            Some(ash) => ash
                .parse::<u64>()
                .with_context(|| format!("urn {} has invalid ash {:?}", token.id.property_version, ash))?,
            None => continue,
        };
        if richest.map_or(true, |(max, _)| ash >= max) {
            richest = Some((ash, &token.id));
        }
    }
    Ok(richest.map(|(_, id)| id))
}

/// Golden parts only go into golden urns, plain parts only into plain ones.
pub fn check_bone_part(part: &str, golden: bool) -> Result<()> {
    if golden != part.contains("golden") {
        bail!("invalid part {}", part);
    }
    Ok(())
}

pub fn urn_token_name(golden: bool) -> &'static str {
    if golden {
        GOLDEN_URN_TOKEN_NAME
    } else {
        URN_TOKEN_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_none, assert_ok};
    use serde_json::json;
    use std::collections::BTreeMap;
    use url::Url;
    use wiremock::{
        matchers::{body_partial_json, method, path, path_regex},
        Mock, MockServer, ResponseTemplate,
    };

    const SEED: &str = "eba9b94746377de1b644a2c11765dcfd7521f4218461aba724969463a8372f9a";
    const HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

    fn token(name: &str, property_version: u64, properties: &[(&str, &str)]) -> AccountToken {
        AccountToken {
            id: TokenId {
                creator: AccountAddress::ONE,
                collection: URN_COLLECTION.to_string(),
                name: name.to_string(),
                property_version,
            },
            amount: 1,
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn mint_targets_map_to_functions() {
        assert_eq!(MintTarget::from_str("shovel").unwrap().function_name(), "mint_shovel");
        assert_eq!(MintTarget::from_str("urn").unwrap().function_name(), "mint_urn");
        assert_eq!(MintTarget::from_str("forge").unwrap().function_name(), "forge");
        assert_err!(MintTarget::from_str("bone"));
    }

    #[test]
    fn richest_urn_wins() {
        let tokens = vec![
            token("urn", 1, &[("ash", "10")]),
            token("urn", 2, &[("ash", "30")]),
            token("shovel", 3, &[("ash", "99")]),
            token("urn", 4, &[("ash", "20")]),
            token("urn", 5, &[]),
        ];
        assert_eq!(
            find_richest_urn(&tokens).unwrap().map(|id| id.property_version),
            Some(2)
        );
    }

    #[test]
    fn richest_urn_ties_go_to_the_later_token() {
        let tokens = vec![token("urn", 1, &[("ash", "5")]), token("urn", 2, &[("ash", "5")])];
        assert_eq!(
            find_richest_urn(&tokens).unwrap().map(|id| id.property_version),
            Some(2)
        );
    }

    #[test]
    fn richest_urn_rejects_bad_ash() {
        assert_err!(find_richest_urn(&[token("urn", 1, &[("ash", "lots")])]));
        assert_none!(find_richest_urn(&[token("shovel", 1, &[])]).unwrap());
    }

    #[test]
    fn last_token_with_the_name_is_used() {
        let tokens = vec![token("urn", 1, &[]), token("hip", 2, &[]), token("urn", 3, &[])];
        assert_eq!(find_token_by_name(&tokens, "urn").map(|id| id.property_version), Some(3));
        assert_none!(find_token_by_name(&tokens, "skull"));
    }

    #[test]
    fn bone_part_must_match_urn_kind() {
        assert_ok!(check_bone_part("golden hip", true));
        assert_ok!(check_bone_part("hip", false));
        assert_err!(check_bone_part("hip", true));
        assert_err!(check_bone_part("golden hip", false));
        assert_eq!(urn_token_name(true), "golden_urn");
        assert_eq!(urn_token_name(false), "urn");
    }

    fn ownership(name: &str, property_version: u64, ash: Option<&str>) -> serde_json::Value {
        let properties = match ash {
            Some(ash) => json!({ "ash": ash }),
            None => json!({}),
        };
        json!({
            "creator_address": DEFAULT_MODULE_OWNER,
            "collection_name": "urn",
            "name": name,
            "property_version": property_version,
            "amount": 1,
            "token_properties": properties,
        })
    }

    async fn mount_tokens(server: &MockServer, owner: AccountAddress, rows: Vec<serde_json::Value>) {
        Mock::given(method("POST"))
            .and(path("/v1/graphql"))
            .and(body_partial_json(json!({
                "variables": { "owner_address": owner.to_hex_literal() }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "current_token_ownerships": rows }
            })))
            .mount(server)
            .await;
    }

    async fn mount_transaction_endpoints(server: &MockServer, sequence_number: u64) {
        Mock::given(method("GET"))
            .and(path_regex("^/v1/accounts/0x[0-9a-f]{64}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sequence_number": sequence_number.to_string(),
                "authentication_key": AccountAddress::ONE.to_hex_literal(),
            })))
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "type": "user_transaction",
                "hash": HASH,
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "40",
            }])))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "hash": HASH,
                "sender": "0x1",
                "sequence_number": sequence_number.to_string(),
                "max_gas_amount": "500000",
                "gas_unit_price": "100",
                "expiration_timestamp_secs": "1900000000",
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    fn clients(server: &MockServer) -> (ApiClient, IndexerClient) {
        let api_client = ApiClient::new(Url::parse(&server.uri()).unwrap()).unwrap();
        let indexer =
            IndexerClient::new(Url::parse(&format!("{}/v1/graphql", server.uri())).unwrap())
                .unwrap();
        (api_client, indexer)
    }

    fn submitted_body(requests: &[wiremock::Request]) -> Vec<u8> {
        requests
            .iter()
            .find(|request| request.url.path() == "/v1/transactions")
            .map(|request| request.body.clone())
            .unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    /// BCS of the entry function call, as it appears inside a signed transaction
    fn call_bytes(
        owner: AccountAddress,
        module: &str,
        function: &str,
        args: Vec<Vec<u8>>,
    ) -> Vec<u8> {
        bcs::to_bytes(&EntryFunction::new(
            ModuleId::new(owner, Identifier::new(module).unwrap()),
            Identifier::new(function).unwrap(),
            vec![],
            args,
        ))
        .unwrap()
    }

    /// Matches requests whose body contains the given bytes
    struct BodyContains(Vec<u8>);

    impl wiremock::Match for BodyContains {
        fn matches(&self, request: &wiremock::Request) -> bool {
            contains(&request.body, &self.0)
        }
    }

    fn urn_client<'a>(api_client: &'a ApiClient, indexer: &'a IndexerClient) -> UrnClient<'a> {
        UrnClient::new(api_client, indexer, AccountAddress::ONE).with_chain_id(ChainId::testnet())
    }

    #[tokio::test]
    async fn rob_targets_the_richest_victim_urn() {
        let server = MockServer::start().await;
        let mut robber = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        let victim = AccountAddress::from_hex_literal("0xbeef").unwrap();
        mount_tokens(&server, victim, vec![
            ownership("urn", 4, Some("12")),
            ownership("urn", 9, Some("70")),
            ownership("shovel", 1, None),
        ])
        .await;
        mount_tokens(&server, robber.address(), vec![ownership("urn", 6, Some("1"))]).await;
        mount_transaction_endpoints(&server, 17).await;

        let (api_client, indexer) = clients(&server);
        let owner = AccountAddress::from_hex_literal(DEFAULT_MODULE_OWNER).unwrap();
        let urn_client =
            UrnClient::new(&api_client, &indexer, owner).with_chain_id(ChainId::testnet());
        let pending = urn_client
            .rob(&mut robber, victim, DEFAULT_ROB_MESSAGE, None)
            .await
            .unwrap();
        assert_eq!(pending.hash.to_hex_literal(), HASH);
        assert_eq!(robber.sequence_number(), 18);

        let expected_args = bcs::to_bytes(&vec![
            bcs::to_bytes(&6u64).unwrap(),
            bcs::to_bytes(&victim).unwrap(),
            bcs::to_bytes(&9u64).unwrap(),
            bcs::to_bytes(DEFAULT_ROB_MESSAGE).unwrap(),
        ])
        .unwrap();
        let body = submitted_body(&server.received_requests().await.unwrap());
        assert!(contains(&body, &expected_args));
        assert!(contains(&body, b"rob"));
    }

    #[tokio::test]
    async fn put_bone_part_requires_the_bone() {
        let server = MockServer::start().await;
        let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        mount_tokens(&server, account.address(), vec![ownership("urn", 2, None)]).await;

        let (api_client, indexer) = clients(&server);
        let urn_client = UrnClient::new(&api_client, &indexer, AccountAddress::ONE)
            .with_chain_id(ChainId::testnet());
        let err = urn_client
            .put_bone_part(&mut account, "hip", false, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no bone token found"));

        let err = urn_client
            .put_bone_part(&mut account, "golden hip", false, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid part"));
    }

    #[tokio::test]
    async fn put_golden_bone_part_fills_the_golden_urn() {
        let server = MockServer::start().await;
        let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        mount_tokens(&server, account.address(), vec![
            ownership("urn", 2, None),
            ownership("golden_urn", 5, None),
            ownership("golden hip", 8, None),
        ])
        .await;
        mount_transaction_endpoints(&server, 0).await;

        let (api_client, indexer) = clients(&server);
        let urn_client = UrnClient::new(&api_client, &indexer, AccountAddress::ONE)
            .with_chain_id(ChainId::testnet());
        assert_ok!(
            urn_client
                .put_bone_part(&mut account, "golden hip", true, None)
                .await
        );

        let expected_args = bcs::to_bytes(&vec![
            bcs::to_bytes(&5u64).unwrap(),
            bcs::to_bytes(&8u64).unwrap(),
            bcs::to_bytes("golden hip").unwrap(),
        ])
        .unwrap();
        let body = submitted_body(&server.received_requests().await.unwrap());
        assert!(contains(&body, &expected_args));
        assert!(contains(&body, b"burn_and_fill_golden"));
    }

    #[tokio::test]
    async fn simulation_can_be_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/v1/accounts/0x[0-9a-f]{64}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sequence_number": "3",
                "authentication_key": AccountAddress::ONE.to_hex_literal(),
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "hash": HASH,
                "sender": "0x1",
                "sequence_number": "3",
                "max_gas_amount": "500000",
                "gas_unit_price": "100",
                "expiration_timestamp_secs": "1900000000",
            })))
            .mount(&server)
            .await;

        let (api_client, indexer) = clients(&server);
        let urn_client = UrnClient::new(&api_client, &indexer, AccountAddress::ONE)
            .with_chain_id(ChainId::testnet());
        let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        let options = TransactionOptions {
            simulate: false,
            ..Default::default()
        };
        assert_ok!(urn_client.dig(&mut account, Some(options)).await);
        let body = submitted_body(&server.received_requests().await.unwrap());
        assert!(contains(&body, b"dig"));
    }

    #[tokio::test]
    async fn mint_targets_call_their_entry_functions() {
        for (target, function) in [
            (MintTarget::Shovel, "mint_shovel"),
            (MintTarget::Urn, "mint_urn"),
            (MintTarget::Forge, "forge"),
        ] {
            let server = MockServer::start().await;
            mount_transaction_endpoints(&server, 1).await;
            let (api_client, indexer) = clients(&server);
            let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
            assert_ok!(urn_client(&api_client, &indexer).mint(&mut account, target, None).await);

            let body = submitted_body(&server.received_requests().await.unwrap());
            let expected = call_bytes(AccountAddress::ONE, URN_TO_EARN_MODULE, function, vec![]);
            assert!(contains(&body, &expected), "{} did not call {}", target, function);
        }
    }

    #[tokio::test]
    async fn high_cost_func_calls_urn_to_earn() {
        let server = MockServer::start().await;
        mount_transaction_endpoints(&server, 0).await;
        let (api_client, indexer) = clients(&server);
        let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        assert_ok!(urn_client(&api_client, &indexer).high_cost_func(&mut account, None).await);

        let body = submitted_body(&server.received_requests().await.unwrap());
        let expected =
            call_bytes(AccountAddress::ONE, URN_TO_EARN_MODULE, "high_cost_func", vec![]);
        assert!(contains(&body, &expected));
    }

    #[tokio::test]
    async fn rob_history_lives_in_the_knife_module() {
        let server = MockServer::start().await;
        mount_transaction_endpoints(&server, 0).await;
        let (api_client, indexer) = clients(&server);
        let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        assert_ok!(
            urn_client(&api_client, &indexer)
                .create_rob_history(&mut account, None)
                .await
        );

        let body = submitted_body(&server.received_requests().await.unwrap());
        let expected = call_bytes(
            AccountAddress::ONE,
            KNIFE_MODULE,
            "create_rob_history_manually",
            vec![],
        );
        assert!(contains(&body, &expected));
    }

    #[tokio::test]
    async fn random_rob_sends_the_robber_urn_and_message() {
        let server = MockServer::start().await;
        let mut robber = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        mount_tokens(&server, robber.address(), vec![
            ownership("urn", 3, Some("5")),
            ownership("shovel", 4, None),
            ownership("urn", 11, None),
        ])
        .await;
        mount_transaction_endpoints(&server, 2).await;

        let (api_client, indexer) = clients(&server);
        assert_ok!(
            urn_client(&api_client, &indexer)
                .random_rob(&mut robber, DEFAULT_RANDOM_ROB_MESSAGE, None)
                .await
        );

        let expected = call_bytes(AccountAddress::ONE, URN_TO_EARN_MODULE, "random_rob", vec![
            bcs::to_bytes(&11u64).unwrap(),
            bcs::to_bytes(DEFAULT_RANDOM_ROB_MESSAGE).unwrap(),
        ]);
        let body = submitted_body(&server.received_requests().await.unwrap());
        assert!(contains(&body, &expected));
    }

    #[tokio::test]
    async fn rob_needs_urns_on_both_sides() {
        let server = MockServer::start().await;
        let mut robber = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        let poor_victim = AccountAddress::from_hex_literal("0xdead").unwrap();
        let rich_victim = AccountAddress::from_hex_literal("0xbeef").unwrap();
        mount_tokens(&server, poor_victim, vec![ownership("urn", 1, None)]).await;
        mount_tokens(&server, rich_victim, vec![ownership("urn", 2, Some("80"))]).await;
        mount_tokens(&server, robber.address(), vec![ownership("shovel", 3, None)]).await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let (api_client, indexer) = clients(&server);
        let urn_client = urn_client(&api_client, &indexer);
        let err = urn_client
            .rob(&mut robber, poor_victim, DEFAULT_ROB_MESSAGE, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("owns no urn with ash"));

        let err = urn_client
            .rob(&mut robber, rich_victim, DEFAULT_ROB_MESSAGE, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("robber"));
        assert!(err.to_string().contains("owns no urn"));

        let err = urn_client
            .random_rob(&mut robber, DEFAULT_RANDOM_ROB_MESSAGE, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("owns no urn"));
    }

    #[tokio::test]
    async fn committed_mint_is_kept_when_the_dig_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/v1/accounts/0x[0-9a-f]{64}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sequence_number": "5",
                "authentication_key": AccountAddress::ONE.to_hex_literal(),
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .and(BodyContains(call_bytes(
                AccountAddress::ONE,
                URN_TO_EARN_MODULE,
                "dig",
                vec![],
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "type": "user_transaction",
                "hash": HASH,
                "success": false,
                "vm_status": "Move abort ENO_SHOVEL",
            }])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions/simulate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "type": "user_transaction",
                "hash": HASH,
                "success": true,
                "vm_status": "Executed successfully",
            }])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/transactions"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "hash": HASH,
                "sender": "0x1",
                "sequence_number": "5",
                "max_gas_amount": "500000",
                "gas_unit_price": "100",
                "expiration_timestamp_secs": "4000000000",
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/transactions/by_hash/{}", HASH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "user_transaction",
                "hash": HASH,
                "version": "31",
                "success": true,
                "vm_status": "Executed successfully",
                "gas_used": "9",
            })))
            .mount(&server)
            .await;

        let (api_client, indexer) = clients(&server);
        let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        let outcome = urn_client(&api_client, &indexer)
            .mint_shovel_and_dig(&mut account, None)
            .await
            .unwrap();
        assert_eq!(outcome.mint.version(), Some(31));
        let err = format!("{:#}", outcome.dig.unwrap_err());
        assert!(err.starts_with("Failed to dig"));
        assert!(err.contains("ENO_SHOVEL"));

        let body = submitted_body(&server.received_requests().await.unwrap());
        assert!(contains(
            &body,
            &call_bytes(AccountAddress::ONE, URN_TO_EARN_MODULE, "mint_shovel", vec![])
        ));
    }

    #[tokio::test]
    async fn chain_id_zero_from_the_node_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/v1/accounts/0x[0-9a-f]{64}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sequence_number": "0",
                "authentication_key": AccountAddress::ONE.to_hex_literal(),
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chain_id": 0,
                "epoch": "1",
                "ledger_version": "10",
                "ledger_timestamp": "1700000000000000",
                "node_role": "full_node",
            })))
            .mount(&server)
            .await;

        let (api_client, indexer) = clients(&server);
        let mut account = LocalAccount::from_private_key_hex(SEED, 0).unwrap();
        let err = UrnClient::new(&api_client, &indexer, AccountAddress::ONE)
            .dig(&mut account, None)
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("chain ID of 0"));
    }
}
