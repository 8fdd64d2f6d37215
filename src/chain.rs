//! Source chain registry
//!
//! Chains a holder snapshot can be taken from, and which provider
//! credential each one needs.

use std::fmt;

use crate::error::{Error, Result};

/// How holders are discovered on a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFamily {
    /// Single ownership request against Alchemy
    Evm,
    /// Paginated asset-group walk against Helius
    Solana,
}

/// Provider credential a chain needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredKey {
    Alchemy,
    Helius,
}

impl fmt::Display for RequiredKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredKey::Alchemy => write!(f, "alchemy"),
            RequiredKey::Helius => write!(f, "helius"),
        }
    }
}

/// A supported source chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub name: &'static str,
    pub slug: &'static str,
    pub family: ChainFamily,
    pub required_key: RequiredKey,
}

pub const CHAINS: &[Chain] = &[
    Chain { name: "Ethereum", slug: "eth-mainnet", family: ChainFamily::Evm, required_key: RequiredKey::Alchemy },
    Chain { name: "Arbitrum", slug: "arb-mainnet", family: ChainFamily::Evm, required_key: RequiredKey::Alchemy },
    Chain { name: "Optimism", slug: "opt-mainnet", family: ChainFamily::Evm, required_key: RequiredKey::Alchemy },
    Chain { name: "Base", slug: "base-mainnet", family: ChainFamily::Evm, required_key: RequiredKey::Alchemy },
    Chain { name: "Polygon", slug: "polygon-mainnet", family: ChainFamily::Evm, required_key: RequiredKey::Alchemy },
    Chain { name: "zkSync Era", slug: "zksync-mainnet", family: ChainFamily::Evm, required_key: RequiredKey::Alchemy },
    Chain { name: "Solana", slug: "solana", family: ChainFamily::Solana, required_key: RequiredKey::Helius },
];

impl Chain {
    /// Look up a chain by its slug
    pub fn from_slug(slug: &str) -> Result<&'static Chain> {
        CHAINS
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| Error::UnknownChain(slug.to_string()))
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slug() {
        let chain = Chain::from_slug("base-mainnet").unwrap();
        assert_eq!(chain.name, "Base");
        assert_eq!(chain.family, ChainFamily::Evm);
        assert_eq!(chain.required_key, RequiredKey::Alchemy);

        let solana = Chain::from_slug("solana").unwrap();
        assert_eq!(solana.family, ChainFamily::Solana);
        assert_eq!(solana.required_key, RequiredKey::Helius);
    }

    #[test]
    fn test_unknown_slug() {
        let err = Chain::from_slug("fantom").unwrap_err();
        assert!(matches!(err, Error::UnknownChain(ref s) if s == "fantom"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_slugs_are_unique() {
        for (i, a) in CHAINS.iter().enumerate() {
            for b in &CHAINS[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }
}
