// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Client for the token ownership view of the GraphQL indexer.

use crate::{error::RestError, AptosResult, USER_AGENT};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{collections::BTreeMap, time::Duration};
use tracing::debug;
use url::Url;
use urn_types::account_address::AccountAddress;

const CURRENT_TOKEN_OWNERSHIPS_QUERY: &str = r#"query CurrentTokens($owner_address: String) {
  current_token_ownerships(
    where: {owner_address: {_eq: $owner_address}, amount: {_gt: "0"}}
  ) {
    creator_address
    collection_name
    name
    property_version
    amount
    token_properties
  }
}"#;

/// Globally unique id of a token: creator, collection, name and property version.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TokenId {
    pub creator: AccountAddress,
    pub collection: String,
    pub name: String,
    pub property_version: u64,
}

/// A token an account currently owns, with its property map rendered as strings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AccountToken {
    pub id: TokenId,
    pub amount: u64,
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Clone, Debug)]
pub struct IndexerClient {
    inner: ReqwestClient,
    url: Url,
}

impl IndexerClient {
    pub fn new(url: Url) -> AptosResult<Self> {
        let inner = ReqwestClient::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { inner, url })
    }

    /// Every token with a positive balance held by `owner`.
    pub async fn list_account_tokens(
        &self,
        owner: AccountAddress,
    ) -> AptosResult<Vec<AccountToken>> {
        let body = json!({
            "query": CURRENT_TOKEN_OWNERSHIPS_QUERY,
            "variables": { "owner_address": owner.to_hex_literal() },
        });
        let response = self.inner.post(self.url.clone()).json(&body).send().await?;
        let status_code = response.status();
        let text = response.text().await?;
        if !status_code.is_success() {
            return Err(RestError::Http(text, status_code));
        }

        let response: GraphQlResponse = serde_json::from_str(&text)?;
        if !response.errors.is_empty() {
            let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(RestError::Indexer(messages.join("; ")));
        }
        let rows = match response
            .data
            .as_ref()
            .and_then(|data| data.get("current_token_ownerships"))
            .and_then(Value::as_array)
        {
            Some(rows) => rows,
            None => {
                return Err(RestError::Indexer(
                    "response carries no current_token_ownerships".to_string(),
                ))
            },
        };

        let tokens = rows
            .iter()
            .map(parse_ownership)
            .collect::<AptosResult<Vec<_>>>()?;
        debug!(owner = %owner, count = tokens.len(), "Listed account tokens");
        Ok(tokens)
    }
}

fn parse_ownership(row: &Value) -> AptosResult<AccountToken> {
    let creator = AccountAddress::from_hex_literal(string_field(row, "creator_address")?)?;
    let properties = match row.get("token_properties") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| (key.clone(), property_to_string(value)))
            .collect(),
        _ => BTreeMap::new(),
    };

    Ok(AccountToken {
        id: TokenId {
            creator,
            collection: string_field(row, "collection_name")?.to_string(),
            name: string_field(row, "name")?.to_string(),
            property_version: numeric_field(row, "property_version")?,
        },
        amount: numeric_field(row, "amount")?,
        properties,
    })
}

fn string_field<'a>(row: &'a Value, field: &str) -> AptosResult<&'a str> {
    row.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| RestError::Indexer(format!("missing string field {}", field)))
}

/// Hasura renders `numeric` columns either as JSON numbers or as strings.
fn numeric_field(row: &Value, field: &str) -> AptosResult<u64> {
    let text = match row.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(RestError::Indexer(format!("missing numeric field {}", field))),
    };
    text.parse::<u64>()
        .map_err(|_| RestError::Indexer(format!("field {} is not a u64: {}", field, text)))
}

fn property_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_matches;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn indexer(server: &MockServer) -> IndexerClient {
        IndexerClient::new(Url::parse(&format!("{}/v1/graphql", server.uri())).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn lists_tokens_of_the_owner() {
        let owner = AccountAddress::from_hex_literal("0xcafe").unwrap();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/graphql"))
            .and(body_partial_json(json!({
                "variables": { "owner_address": owner.to_hex_literal() }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "current_token_ownerships": [
                        {
                            "creator_address": "0x1",
                            "collection_name": "urn",
                            "name": "urn",
                            "property_version": 3,
                            "amount": 1,
                            "token_properties": { "ash": "42", "point": 7 },
                        },
                        {
                            "creator_address": "0x1",
                            "collection_name": "urn",
                            "name": "shovel",
                            "property_version": "0",
                            "amount": "2",
                            "token_properties": {},
                        },
                    ]
                }
            })))
            .mount(&server)
            .await;

        let tokens = indexer(&server).list_account_tokens(owner).await.unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].id.name, "urn");
        assert_eq!(tokens[0].id.property_version, 3);
        assert_eq!(tokens[0].properties.get("ash").map(String::as_str), Some("42"));
        assert_eq!(tokens[0].properties.get("point").map(String::as_str), Some("7"));
        assert_eq!(tokens[1].amount, 2);
        assert_eq!(tokens[1].id.creator, AccountAddress::ONE);
    }

    #[tokio::test]
    async fn graphql_errors_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{ "message": "field 'current_token_ownerships' not found" }]
            })))
            .mount(&server)
            .await;

        let err = indexer(&server)
            .list_account_tokens(AccountAddress::ONE)
            .await
            .unwrap_err();
        assert_matches!(err, RestError::Indexer(ref message) if message.contains("not found"));
    }
}
