// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Client library for the urn-to-earn Move modules.
//!
//! [`urn_client::UrnClient`] builds, signs, simulates and submits the game's entry
//! functions. Token arguments are looked up through the indexer.

pub mod coin_client;
pub mod transaction_builder;
pub mod types;
pub mod urn_client;

pub use urn_rest_client as rest_client;
