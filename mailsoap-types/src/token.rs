// mailsoap-types/src/token.rs
//! Closed vocabularies with canonical string tokens.
//!
//! Each family is declared once through [`token_enum!`]. The declaration fixes
//! the variant to token mapping at compile time; the reverse table used by
//! `from_token` is built on first use behind a [`Lazy`] and never mutated
//! afterwards, so concurrent readers always observe a complete table.
//!
//! Two lookup policies exist. [`LookupPolicy::FailLoud`] families reject an
//! unknown token with [`TypeError::InvalidInput`]; they back request fields
//! that must be validated. [`LookupPolicy::FailQuiet`] families return `None`
//! instead; they back fields that are interpreted on a best-effort basis.

use crate::error::TypeError;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use tracing::{debug, warn};

#[doc(hidden)]
pub use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupPolicy {
    FailLoud,
    FailQuiet,
}

impl LookupPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailLoud => "fail-loud",
            Self::FailQuiet => "fail-quiet",
        }
    }
}

pub trait TokenEnum: Copy + Eq + Send + Sync + 'static {
    /// Family name used in diagnostics.
    const FAMILY: &'static str;
    const POLICY: LookupPolicy;
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    fn token(self) -> &'static str;

    fn table() -> &'static TokenTable<Self>;

    /// Policy-free reverse lookup.
    fn lookup(token: &str) -> Option<Self> {
        Self::table().get(token)
    }

    fn tokens() -> &'static [&'static str] {
        Self::table().tokens()
    }
}

/// Reverse lookup table for one family.
#[derive(Debug)]
pub struct TokenTable<T> {
    by_token: HashMap<&'static str, T>,
    tokens: Vec<&'static str>,
}

impl<T: TokenEnum> TokenTable<T> {
    pub fn build() -> Self {
        debug!(family = T::FAMILY, "building token table");
        let mut by_token = HashMap::with_capacity(T::VARIANTS.len());
        let mut tokens = Vec::with_capacity(T::VARIANTS.len());
        for &variant in T::VARIANTS {
            let token = variant.token();
            let previous = by_token.insert(token, variant);
            debug_assert!(previous.is_none(), "duplicate token {:?} in {}", token, T::FAMILY);
            tokens.push(token);
        }
        Self { by_token, tokens }
    }

    pub fn get(&self, token: &str) -> Option<T> {
        self.by_token.get(token).copied()
    }

    /// Tokens in declaration order.
    pub fn tokens(&self) -> &[&'static str] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

pub fn invalid_input<T: TokenEnum>(token: &str) -> TypeError {
    TypeError::InvalidInput {
        family: T::FAMILY,
        token: token.to_string(),
        valid: T::tokens().to_vec(),
    }
}

/// `deserialize_with` helper for optional fail-quiet fields: an unknown token
/// becomes `None` instead of failing the whole record.
pub fn deserialize_quiet<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TokenEnum,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|token| {
        let value = T::lookup(&token);
        if value.is_none() {
            warn!(family = T::FAMILY, token = %token, "dropping unrecognized token");
        }
        value
    }))
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $policy:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::token::TokenEnum for $name {
            const FAMILY: &'static str = stringify!($name);
            const POLICY: $crate::token::LookupPolicy = $crate::token::LookupPolicy::$policy;
            const VARIANTS: &'static [Self] = &[$( Self::$variant ),+];

            fn token(self) -> &'static str {
                match self {
                    $( Self::$variant => $token ),+
                }
            }

            fn table() -> &'static $crate::token::TokenTable<Self> {
                static TABLE: $crate::token::Lazy<$crate::token::TokenTable<$name>> =
                    $crate::token::Lazy::new($crate::token::TokenTable::build);
                &TABLE
            }
        }

        impl $name {
            pub fn token(self) -> &'static str {
                <Self as $crate::token::TokenEnum>::token(self)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.token())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.token())
            }
        }

        token_enum!(@policy $policy $name);
    };

    (@policy FailLoud $name:ident) => {
        impl $name {
            pub fn from_token(token: &str) -> Result<Self, $crate::error::TypeError> {
                <Self as $crate::token::TokenEnum>::lookup(token)
                    .ok_or_else(|| $crate::token::invalid_input::<Self>(token))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_token(s)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_token(&token).map_err(::serde::de::Error::custom)
            }
        }
    };

    (@policy FailQuiet $name:ident) => {
        impl $name {
            pub fn from_token(token: &str) -> Option<Self> {
                <Self as $crate::token::TokenEnum>::lookup(token)
            }
        }

        // Fields that cannot be absent have nowhere to put the quiet miss, so a
        // bare value still rejects unknown tokens; optional fields go through
        // `deserialize_quiet`.
        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_token(&token)
                    .ok_or_else(|| ::serde::de::Error::custom($crate::token::invalid_input::<Self>(&token)))
            }
        }
    };
}

pub(crate) use token_enum;
