// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{account_address::AccountAddress, error::TypesError};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// A Move identifier: a module, function or struct name.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Identifier(Box<str>);

impl Identifier {
    pub fn new(s: impl Into<Box<str>>) -> Result<Self, TypesError> {
        let s = s.into();
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(TypesError::InvalidIdentifier(s.into_string()))
        }
    }

    /// `[a-zA-Z][a-zA-Z0-9_]*` or `_[a-zA-Z0-9_]+`
    pub fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            },
            Some('_') => {
                let rest = chars.as_str();
                !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            },
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Identifier::new(s).map_err(D::Error::custom)
    }
}

/// Builds an [`Identifier`] from a string literal known to be valid.
#[macro_export]
macro_rules! ident_str {
    ($ident:literal) => {{
        $crate::language_storage::Identifier::new($ident)
            .expect(concat!("invalid identifier literal: ", $ident))
    }};
}

/// The address and name of a published Move module.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ModuleId {
    address: AccountAddress,
    name: Identifier,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: Identifier) -> Self {
        ModuleId { address, name }
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address.to_hex_literal(), self.name)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: Identifier,
    pub name: Identifier,
    // alias for compatibility with old json serialized data.
    #[serde(rename = "type_args", alias = "type_params")]
    pub type_args: Vec<TypeTag>,
}

impl StructTag {
    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.address, self.module.clone())
    }
}

/// Prints the canonical form the REST API accepts in resource paths, e.g.
/// `0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>`.
impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}::{}::{}",
            self.address.short_str_lossless(),
            self.module,
            self.name
        )?;
        if let Some(first_ty) = self.type_args.first() {
            write!(f, "<{}", first_ty)?;
            for ty in self.type_args.iter().skip(1) {
                write!(f, ", {}", ty)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Variant order is part of the BCS encoding and must not change.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TypeTag {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "u8")]
    U8,
    #[serde(rename = "u64")]
    U64,
    #[serde(rename = "u128")]
    U128,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "signer")]
    Signer,
    #[serde(rename = "vector")]
    Vector(Box<TypeTag>),
    #[serde(rename = "struct")]
    Struct(Box<StructTag>),
    #[serde(rename = "u16")]
    U16,
    #[serde(rename = "u32")]
    U32,
    #[serde(rename = "u256")]
    U256,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident_str;

    #[test]
    fn identifier_rules() {
        assert!(Identifier::is_valid("urn_to_earn"));
        assert!(Identifier::is_valid("_private"));
        assert!(!Identifier::is_valid("_"));
        assert!(!Identifier::is_valid("1abc"));
        assert!(!Identifier::is_valid("golden hip"));
        assert!(!Identifier::is_valid(""));
    }

    #[test]
    fn struct_tag_display() {
        let coin = TypeTag::Struct(Box::new(StructTag {
            address: AccountAddress::ONE,
            module: ident_str!("aptos_coin"),
            name: ident_str!("AptosCoin"),
            type_args: vec![],
        }));
        let store = StructTag {
            address: AccountAddress::ONE,
            module: ident_str!("coin"),
            name: ident_str!("CoinStore"),
            type_args: vec![coin],
        };
        assert_eq!(
            store.to_string(),
            "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>"
        );
    }

    #[test]
    fn module_id_bcs_layout() {
        let module = ModuleId::new(AccountAddress::ONE, ident_str!("knife"));
        let bytes = bcs::to_bytes(&module).unwrap();
        // 32 address bytes, uleb128 length, then the name.
        assert_eq!(bytes.len(), 32 + 1 + 5);
        assert_eq!(bytes[32], 5);
        assert_eq!(&bytes[33..], b"knife");
    }
}
