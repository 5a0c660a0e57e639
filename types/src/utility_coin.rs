// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    account_address::AccountAddress,
    ident_str,
    language_storage::{StructTag, TypeTag},
};
use once_cell::sync::Lazy;

/// Number of octas in one APT.
pub const APTOS_COIN_DECIMALS: u64 = 100_000_000;

pub trait CoinType {
    fn type_tag() -> TypeTag;

    /// `0x1::coin::CoinStore<Self>`, the resource holding an account's balance.
    fn coin_store_tag() -> StructTag {
        StructTag {
            address: AccountAddress::ONE,
            module: ident_str!("coin"),
            name: ident_str!("CoinStore"),
            type_args: vec![Self::type_tag()],
        }
    }
}

static APTOS_COIN_TYPE: Lazy<TypeTag> = Lazy::new(|| {
    TypeTag::Struct(Box::new(StructTag {
        address: AccountAddress::ONE,
        module: ident_str!("aptos_coin"),
        name: ident_str!("AptosCoin"),
        type_args: vec![],
    }))
});

pub struct AptosCoinType;

impl CoinType for AptosCoinType {
    fn type_tag() -> TypeTag {
        APTOS_COIN_TYPE.clone()
    }
}

/// Converts octas to APT for display.
pub fn octas_to_apt(octas: u64) -> f64 {
    octas as f64 / APTOS_COIN_DECIMALS as f64
}
