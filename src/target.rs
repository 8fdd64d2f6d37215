//! Target address types and wallet filter rules
//!
//! A target type selects which of a cluster's wallets are extracted. Chains
//! with several address formats (bitcoin, litecoin, ripple) carry the set of
//! formats the caller selected; an empty selection matches nothing.

use std::collections::BTreeSet;
use std::fmt;

use crate::clusters::ClusterWallet;
use crate::error::{Error, Result};

/// EVM wallets registered with the zero address are placeholders
pub const EVM_ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Target chains whose wallets match on type equality alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleChain {
    Evm,
    Solana,
    Near,
    Dogecoin,
    Aptos,
    Tron,
    Hedera,
    Stacks,
    Algorand,
    Filecoin,
}

impl SimpleChain {
    pub const ALL: &'static [SimpleChain] = &[
        SimpleChain::Evm,
        SimpleChain::Solana,
        SimpleChain::Near,
        SimpleChain::Dogecoin,
        SimpleChain::Aptos,
        SimpleChain::Tron,
        SimpleChain::Hedera,
        SimpleChain::Stacks,
        SimpleChain::Algorand,
        SimpleChain::Filecoin,
    ];

    /// Wallet type tag used by the clusters API
    pub fn wallet_type(&self) -> &'static str {
        match self {
            SimpleChain::Evm => "evm",
            SimpleChain::Solana => "solana",
            SimpleChain::Near => "near",
            SimpleChain::Dogecoin => "dogecoin",
            SimpleChain::Aptos => "aptos",
            SimpleChain::Tron => "tron",
            SimpleChain::Hedera => "hedera",
            SimpleChain::Stacks => "stacks",
            SimpleChain::Algorand => "algorand",
            SimpleChain::Filecoin => "filecoin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SimpleChain::Evm => "EVM",
            SimpleChain::Solana => "Solana",
            SimpleChain::Near => "NEAR",
            SimpleChain::Dogecoin => "Dogecoin",
            SimpleChain::Aptos => "Aptos",
            SimpleChain::Tron => "Tron",
            SimpleChain::Hedera => "Hedera",
            SimpleChain::Stacks => "Stacks",
            SimpleChain::Algorand => "Algorand",
            SimpleChain::Filecoin => "Filecoin",
        }
    }

    fn accepts(&self, wallet: &ClusterWallet) -> bool {
        if wallet.wallet_type != self.wallet_type() {
            return false;
        }
        !(*self == SimpleChain::Evm && wallet.address == EVM_ZERO_ADDRESS)
    }
}

/// An address format a caller can select for a multi-format chain
pub trait AddressSubtype: Copy + Ord + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Selection name, e.g. `bitcoin-p2pkh`
    fn name(&self) -> &'static str;

    /// Short description shown in listings
    fn label(&self) -> &'static str;

    /// Whether a wallet type tag belongs to this selection
    fn matches(&self, wallet_type: &str) -> bool {
        wallet_type == self.name()
    }

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BitcoinSubtype {
    P2pkh,
    P2sh,
    /// Native segwit, both key-hash and script-hash
    P2wpkhP2wsh,
    P2tr,
}

impl AddressSubtype for BitcoinSubtype {
    const ALL: &'static [Self] = &[
        BitcoinSubtype::P2pkh,
        BitcoinSubtype::P2sh,
        BitcoinSubtype::P2wpkhP2wsh,
        BitcoinSubtype::P2tr,
    ];

    fn name(&self) -> &'static str {
        match self {
            BitcoinSubtype::P2pkh => "bitcoin-p2pkh",
            BitcoinSubtype::P2sh => "bitcoin-p2sh",
            BitcoinSubtype::P2wpkhP2wsh => "bitcoin-p2wpkh-p2wsh",
            BitcoinSubtype::P2tr => "bitcoin-p2tr",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BitcoinSubtype::P2pkh => "P2PKH (1...)",
            BitcoinSubtype::P2sh => "P2SH (3...)",
            BitcoinSubtype::P2wpkhP2wsh => "P2WPKH/P2WSH (bc1q...)",
            BitcoinSubtype::P2tr => "P2TR (bc1p...)",
        }
    }

    fn matches(&self, wallet_type: &str) -> bool {
        match self {
            BitcoinSubtype::P2wpkhP2wsh => {
                wallet_type == "bitcoin-p2wpkh" || wallet_type == "bitcoin-p2wsh"
            }
            _ => wallet_type == self.name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LitecoinSubtype {
    P2pkh,
    P2sh,
    P2wpkh,
}

impl AddressSubtype for LitecoinSubtype {
    const ALL: &'static [Self] = &[
        LitecoinSubtype::P2pkh,
        LitecoinSubtype::P2sh,
        LitecoinSubtype::P2wpkh,
    ];

    fn name(&self) -> &'static str {
        match self {
            LitecoinSubtype::P2pkh => "litecoin-p2pkh",
            LitecoinSubtype::P2sh => "litecoin-p2sh",
            LitecoinSubtype::P2wpkh => "litecoin-p2wpkh",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LitecoinSubtype::P2pkh => "P2PKH (L...)",
            LitecoinSubtype::P2sh => "P2SH (M...)",
            LitecoinSubtype::P2wpkh => "P2WPKH (ltc1q...)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RippleSubtype {
    Classic,
    X,
}

impl AddressSubtype for RippleSubtype {
    const ALL: &'static [Self] = &[RippleSubtype::Classic, RippleSubtype::X];

    fn name(&self) -> &'static str {
        match self {
            RippleSubtype::Classic => "ripple-classic",
            RippleSubtype::X => "ripple-x",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RippleSubtype::Classic => "Classic (r...)",
            RippleSubtype::X => "X-Address (X...)",
        }
    }
}

/// Selected target chain, carrying its address format selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    Simple(SimpleChain),
    Bitcoin(BTreeSet<BitcoinSubtype>),
    Litecoin(BTreeSet<LitecoinSubtype>),
    Ripple(BTreeSet<RippleSubtype>),
    /// Cosmos hub plus every `cosmos-*` ecosystem chain
    Cosmos,
}

impl TargetType {
    /// Every target type name, in listing order
    pub const NAMES: &'static [&'static str] = &[
        "evm", "solana", "bitcoin", "near", "dogecoin", "aptos", "tron", "hedera", "stacks",
        "algorand", "filecoin", "litecoin", "ripple", "cosmos",
    ];

    /// Parse a target type name and its sub-type selection
    pub fn parse<S: AsRef<str>>(name: &str, subtypes: &[S]) -> Result<Self> {
        let target = match name {
            "bitcoin" => TargetType::Bitcoin(parse_selection(name, subtypes)?),
            "litecoin" => TargetType::Litecoin(parse_selection(name, subtypes)?),
            "ripple" => TargetType::Ripple(parse_selection(name, subtypes)?),
            "cosmos" => TargetType::Cosmos,
            other => TargetType::Simple(
                SimpleChain::ALL
                    .iter()
                    .copied()
                    .find(|c| c.wallet_type() == other)
                    .ok_or_else(|| Error::UnknownTargetType(other.to_string()))?,
            ),
        };

        if matches!(target, TargetType::Simple(_) | TargetType::Cosmos) {
            if let Some(subtype) = subtypes.first() {
                return Err(Error::InvalidSubtype {
                    target: name.to_string(),
                    subtype: subtype.as_ref().to_string(),
                });
            }
        }

        Ok(target)
    }

    /// Target type name
    pub fn name(&self) -> &'static str {
        match self {
            TargetType::Simple(chain) => chain.wallet_type(),
            TargetType::Bitcoin(_) => "bitcoin",
            TargetType::Litecoin(_) => "litecoin",
            TargetType::Ripple(_) => "ripple",
            TargetType::Cosmos => "cosmos",
        }
    }

    /// Whether a wallet is extracted for this target
    pub fn accepts(&self, wallet: &ClusterWallet) -> bool {
        match self {
            TargetType::Simple(chain) => chain.accepts(wallet),
            TargetType::Bitcoin(selected) => accepts_selected(selected, wallet),
            TargetType::Litecoin(selected) => accepts_selected(selected, wallet),
            TargetType::Ripple(selected) => accepts_selected(selected, wallet),
            TargetType::Cosmos => {
                wallet.wallet_type == "cosmos" || wallet.wallet_type.starts_with("cosmos-")
            }
        }
    }

    /// Addresses of the accepted wallets, in wallet order
    pub fn filter(&self, wallets: &[ClusterWallet]) -> Vec<String> {
        wallets
            .iter()
            .filter(|w| self.accepts(w))
            .map(|w| w.address.clone())
            .collect()
    }

    /// Selectable sub-types for a target type name as `(name, label)` pairs
    pub fn subtypes_for(name: &str) -> Vec<(&'static str, &'static str)> {
        match name {
            "bitcoin" => listing::<BitcoinSubtype>(),
            "litecoin" => listing::<LitecoinSubtype>(),
            "ripple" => listing::<RippleSubtype>(),
            _ => Vec::new(),
        }
    }

    /// Selected sub-type names, empty for single-format targets
    pub fn selected_subtypes(&self) -> Vec<&'static str> {
        match self {
            TargetType::Bitcoin(s) => s.iter().map(|t| t.name()).collect(),
            TargetType::Litecoin(s) => s.iter().map(|t| t.name()).collect(),
            TargetType::Ripple(s) => s.iter().map(|t| t.name()).collect(),
            TargetType::Simple(_) | TargetType::Cosmos => Vec::new(),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subtypes = self.selected_subtypes();
        if matches!(self, TargetType::Simple(_) | TargetType::Cosmos) {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{} [{}]", self.name(), subtypes.join(", "))
        }
    }
}

fn accepts_selected<T: AddressSubtype>(selected: &BTreeSet<T>, wallet: &ClusterWallet) -> bool {
    selected.iter().any(|t| t.matches(&wallet.wallet_type))
}

fn parse_selection<T: AddressSubtype, S: AsRef<str>>(
    target: &str,
    subtypes: &[S],
) -> Result<BTreeSet<T>> {
    subtypes
        .iter()
        .map(|s| {
            T::parse(s.as_ref()).ok_or_else(|| Error::InvalidSubtype {
                target: target.to_string(),
                subtype: s.as_ref().to_string(),
            })
        })
        .collect()
}

fn listing<T: AddressSubtype>() -> Vec<(&'static str, &'static str)> {
    T::ALL.iter().map(|t| (t.name(), t.label())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(wallet_type: &str, address: &str) -> ClusterWallet {
        ClusterWallet {
            wallet_type: wallet_type.to_string(),
            address: address.to_string(),
        }
    }

    fn bitcoin_wallets() -> Vec<ClusterWallet> {
        vec![
            wallet("bitcoin-p2pkh", "A"),
            wallet("bitcoin-p2wpkh", "B"),
            wallet("bitcoin-p2wsh", "C"),
            wallet("bitcoin-p2tr", "D"),
        ]
    }

    #[test]
    fn test_bitcoin_segwit_selection_matches_both_formats() {
        let target = TargetType::parse("bitcoin", &["bitcoin-p2wpkh-p2wsh"]).unwrap();
        assert_eq!(target.filter(&bitcoin_wallets()), vec!["B", "C"]);
    }

    #[test]
    fn test_bitcoin_empty_selection_matches_nothing() {
        let target = TargetType::parse::<&str>("bitcoin", &[]).unwrap();
        assert!(target.filter(&bitcoin_wallets()).is_empty());
    }

    #[test]
    fn test_bitcoin_exact_selections() {
        let target = TargetType::parse("bitcoin", &["bitcoin-p2tr", "bitcoin-p2pkh"]).unwrap();
        // wallet order wins over selection order
        assert_eq!(target.filter(&bitcoin_wallets()), vec!["A", "D"]);
    }

    #[test]
    fn test_evm_excludes_zero_address() {
        let target = TargetType::parse::<&str>("evm", &[]).unwrap();
        let wallets = vec![
            wallet("evm", EVM_ZERO_ADDRESS),
            wallet("evm", "0xabc"),
            wallet("solana", "So1"),
        ];
        assert_eq!(target.filter(&wallets), vec!["0xabc"]);
    }

    #[test]
    fn test_zero_address_kept_for_other_simple_chains() {
        let target = TargetType::parse::<&str>("tron", &[]).unwrap();
        let wallets = vec![wallet("tron", EVM_ZERO_ADDRESS)];
        assert_eq!(target.filter(&wallets), vec![EVM_ZERO_ADDRESS]);
    }

    #[test]
    fn test_simple_chain_keeps_repeated_types() {
        let target = TargetType::parse::<&str>("solana", &[]).unwrap();
        let wallets = vec![
            wallet("solana", "S1"),
            wallet("evm", "0x1"),
            wallet("solana", "S2"),
        ];
        assert_eq!(target.filter(&wallets), vec!["S1", "S2"]);
    }

    #[test]
    fn test_litecoin_has_no_wsh_option() {
        assert!(TargetType::parse("litecoin", &["litecoin-p2wsh"]).is_err());

        let target = TargetType::parse("litecoin", &["litecoin-p2wpkh"]).unwrap();
        let wallets = vec![
            wallet("litecoin-p2wpkh", "L1"),
            wallet("litecoin-p2wsh", "L2"),
            wallet("litecoin-p2pkh", "L3"),
        ];
        assert_eq!(target.filter(&wallets), vec!["L1"]);
    }

    #[test]
    fn test_ripple_selection() {
        let target = TargetType::parse("ripple", &["ripple-x"]).unwrap();
        let wallets = vec![wallet("ripple-classic", "r1"), wallet("ripple-x", "X1")];
        assert_eq!(target.filter(&wallets), vec!["X1"]);
    }

    #[test]
    fn test_cosmos_prefix_rule() {
        let target = TargetType::parse::<&str>("cosmos", &[]).unwrap();
        let wallets = vec![
            wallet("cosmos", "cosmos1a"),
            wallet("cosmos-osmosis", "osmo1b"),
            wallet("cosmoshub", "x"),
            wallet("evm", "0x1"),
        ];
        assert_eq!(target.filter(&wallets), vec!["cosmos1a", "osmo1b"]);
    }

    #[test]
    fn test_parse_rejects_unknown_and_misplaced_subtypes() {
        assert!(matches!(
            TargetType::parse::<&str>("monero", &[]),
            Err(Error::UnknownTargetType(_))
        ));
        assert!(matches!(
            TargetType::parse("evm", &["bitcoin-p2pkh"]),
            Err(Error::InvalidSubtype { .. })
        ));
        assert!(matches!(
            TargetType::parse("bitcoin", &["ripple-x"]),
            Err(Error::InvalidSubtype { .. })
        ));
    }

    #[test]
    fn test_every_listed_name_parses() {
        for name in TargetType::NAMES {
            let target = TargetType::parse::<&str>(name, &[]).unwrap();
            assert_eq!(target.name(), *name);
        }
    }

    #[test]
    fn test_display() {
        let target = TargetType::parse("ripple", &["ripple-x", "ripple-classic"]).unwrap();
        assert_eq!(target.to_string(), "ripple [ripple-classic, ripple-x]");
        assert_eq!(TargetType::Cosmos.to_string(), "cosmos");
    }
}
