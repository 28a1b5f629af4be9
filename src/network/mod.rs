//! Static per-chain network descriptors.
//!
//! A descriptor serializes exactly to the parameter object of the
//! wallet's add-chain request, so registry entries can be handed to
//! the provider unchanged. The built-in entries carry placeholder RPC
//! endpoints that operators substitute via configuration.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Native currency metadata of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Immutable per-chain record, keyed by hex chain id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

fn descriptor(
    chain_id: &str,
    chain_name: &str,
    currency_name: &str,
    symbol: &str,
    rpc_url: &str,
    explorer_url: &str,
) -> NetworkDescriptor {
    NetworkDescriptor {
        chain_id: chain_id.to_string(),
        chain_name: chain_name.to_string(),
        native_currency: NativeCurrency {
            name: currency_name.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
        },
        rpc_urls: vec![rpc_url.to_string()],
        block_explorer_urls: vec![explorer_url.to_string()],
    }
}

static BUILTIN_NETWORKS: Lazy<HashMap<String, NetworkDescriptor>> = Lazy::new(|| {
    let mut networks = HashMap::with_capacity(3);
    networks.insert(
        "0x1".to_string(),
        descriptor(
            "0x1",
            "Ethereum Mainnet",
            "Ether",
            "ETH",
            "https://mainnet.infura.io/v3/YOUR_INFURA_ID",
            "https://etherscan.io",
        ),
    );
    networks.insert(
        "0x5".to_string(),
        descriptor(
            "0x5",
            "Goerli Testnet",
            "Goerli Ether",
            "ETH",
            "https://goerli.infura.io/v3/YOUR_INFURA_ID",
            "https://goerli.etherscan.io",
        ),
    );
    networks.insert(
        "0x89".to_string(),
        descriptor(
            "0x89",
            "Polygon",
            "MATIC",
            "MATIC",
            "https://polygon-rpc.com",
            "https://polygonscan.com",
        ),
    );
    networks
});

/// Read-only lookup table of known networks.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    networks: HashMap<String, NetworkDescriptor>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self { networks: BUILTIN_NETWORKS.clone() }
    }
}

impl NetworkRegistry {
    /// A registry with no built-in entries.
    pub fn empty() -> Self {
        Self { networks: HashMap::new() }
    }

    pub fn get(&self, chain_id: &str) -> Option<&NetworkDescriptor> {
        self.networks.get(chain_id)
    }

    pub fn contains(&self, chain_id: &str) -> bool {
        self.networks.contains_key(chain_id)
    }

    /// Registers a descriptor under its own chain id, replacing any
    /// existing entry.
    pub fn insert(&mut self, descriptor: NetworkDescriptor) {
        self.networks.insert(descriptor.chain_id.clone(), descriptor);
    }

    /// Folds operator-supplied descriptors into the registry.
    pub fn merge(&mut self, extra: &HashMap<String, NetworkDescriptor>) {
        for descriptor in extra.values() {
            self.insert(descriptor.clone());
        }
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_builtin_networks_present() {
        let registry = NetworkRegistry::default();
        assert!(registry.contains("0x1"));
        assert!(registry.contains("0x5"));
        assert!(registry.contains("0x89"));
        assert_eq!(registry.chain_ids().count(), 3);
    }

    #[test]
    fn test_descriptor_serializes_to_add_chain_params() {
        let registry = NetworkRegistry::default();
        let polygon = registry.get("0x89").unwrap();
        let value = serde_json::to_value(polygon).unwrap();
        assert_eq!(
            value,
            json!({
                "chainId": "0x89",
                "chainName": "Polygon",
                "nativeCurrency": { "name": "MATIC", "symbol": "MATIC", "decimals": 18 },
                "rpcUrls": ["https://polygon-rpc.com"],
                "blockExplorerUrls": ["https://polygonscan.com"],
            })
        );
    }

    #[test]
    fn test_merge_overrides_builtin_entry() {
        let mut registry = NetworkRegistry::default();
        let mut custom = registry.get("0x1").unwrap().clone();
        custom.rpc_urls = vec!["https://eth.example.org".to_string()];

        let mut extra = HashMap::new();
        extra.insert("0x1".to_string(), custom);
        registry.merge(&extra);

        assert_eq!(registry.get("0x1").unwrap().rpc_urls, vec!["https://eth.example.org"]);
        assert_eq!(registry.chain_ids().count(), 3);
    }

    #[test]
    fn test_unknown_chain_lookup() {
        assert!(NetworkRegistry::default().get("0x99").is_none());
    }
}
