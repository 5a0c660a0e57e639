// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Client-side data model of the Aptos chain as used by the urn tools: account
//! addresses, Move identifiers and type tags, entry-function transactions and the
//! Ed25519 authenticator that signs them.

pub mod account_address;
pub mod chain_id;
pub mod crypto;
pub mod error;
pub mod hash;
pub mod language_storage;
pub mod transaction;
pub mod utility_coin;

pub use account_address::AccountAddress;
pub use error::TypesError;
