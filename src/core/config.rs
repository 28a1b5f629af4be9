use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::network::NetworkDescriptor;

/// Connector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Lifetime of the missing-provider install prompt (seconds)
    #[serde(default = "ConnectorConfig::default_install_prompt_timeout")]
    pub install_prompt_timeout_secs: u64,

    /// Gas limit applied to plain native transfers when no override is given
    #[serde(default = "ConnectorConfig::default_gas_limit")]
    pub default_gas_limit: u64,

    /// Ask the host to reload after a chain change. The upstream wallet
    /// convention reloads unconditionally to avoid stale-chain state;
    /// here the reload is surfaced through a hook and gated on this flag.
    #[serde(default)]
    pub reload_on_chain_change: bool,

    /// Operator-supplied network descriptors, keyed by hex chain id.
    /// Merged over the built-in registry; matching ids override it.
    #[serde(default)]
    pub networks: HashMap<String, NetworkDescriptor>,
}

impl ConnectorConfig {
    fn default_install_prompt_timeout() -> u64 {
        10
    }
    fn default_gas_limit() -> u64 {
        21_000
    }

    /// Loads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            install_prompt_timeout_secs: Self::default_install_prompt_timeout(),
            default_gas_limit: Self::default_gas_limit(),
            reload_on_chain_change: false,
            networks: HashMap::new(),
        }
    }
}
