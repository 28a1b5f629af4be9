//! Bridge between a host application and an injected wallet provider.

pub mod hooks;

use ethers::types::U256;
use parking_lot::RwLock;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::ConnectorConfig;
use crate::core::errors::ConnectorError;
use crate::core::{units, validation};
use crate::network::NetworkRegistry;
use crate::provider::{
    ProviderEvent, WalletProvider, ETH_ACCOUNTS, ETH_CHAIN_ID, ETH_GAS_PRICE, ETH_GET_BALANCE,
    ETH_REQUEST_ACCOUNTS, ETH_SEND_TRANSACTION, WALLET_ADD_CHAIN, WALLET_SWITCH_CHAIN,
};
use self::hooks::{ConnectorHooks, INSTALL_PROMPT};

/// Session fields mutated only by provider events and explicit connect
/// calls. Recreated fresh per connector; never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SessionState {
    account: Option<String>,
    chain_id: Option<String>,
    connected: bool,
}

/// Bridges a host application and an injected wallet provider: detects
/// the provider, proxies its request methods, and re-emits its events
/// through [`ConnectorHooks`].
pub struct WalletConnector {
    provider: Option<Arc<dyn WalletProvider>>,
    config: ConnectorConfig,
    registry: NetworkRegistry,
    hooks: Arc<ConnectorHooks>,
    state: RwLock<SessionState>,
}

impl WalletConnector {
    /// Creates a connector around the injected provider, when one
    /// exists, with default configuration and logging-only hooks.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self::with_config(provider, ConnectorConfig::default())
    }

    pub fn with_config(provider: Option<Arc<dyn WalletProvider>>, config: ConnectorConfig) -> Self {
        let mut registry = NetworkRegistry::default();
        registry.merge(&config.networks);
        Self {
            provider,
            config,
            registry,
            hooks: Arc::new(ConnectorHooks::default()),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Replaces the notification hooks.
    pub fn with_hooks(mut self, hooks: ConnectorHooks) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Checks for the provider's presence. When absent, surfaces the
    /// install prompt and schedules its dismissal after the configured
    /// delay; no provider request is ever issued. Must run inside a
    /// Tokio runtime.
    pub fn detect_provider(&self) -> bool {
        if self.provider.is_some() {
            debug!("Wallet provider detected");
            return true;
        }
        info!("No wallet provider injected, surfacing install prompt");
        self.hooks.install_prompt(&INSTALL_PROMPT);

        let hooks = Arc::clone(&self.hooks);
        let timeout = Duration::from_secs(self.config.install_prompt_timeout_secs);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            hooks.install_prompt_dismissed();
        });
        false
    }

    /// Detects the provider and, when present, restores any session the
    /// wallet already exposes. Returns whether a provider was found.
    pub async fn init(&self) -> bool {
        if !self.detect_provider() {
            return false;
        }
        self.check_connection().await;
        true
    }

    async fn check_connection(&self) {
        let provider = match &self.provider {
            Some(p) => p,
            None => return,
        };
        match provider.request(ETH_ACCOUNTS, json!([])).await {
            Ok(value) => match serde_json::from_value::<Vec<String>>(value) {
                Ok(accounts) if !accounts.is_empty() => self.adopt_accounts(&accounts).await,
                Ok(_) => debug!("No prior wallet session to restore"),
                Err(e) => warn!("Malformed accounts response: {}", e),
            },
            Err(e) => warn!("Failed to query existing accounts: {}", e),
        }
    }

    /// Requests account access. Returns the active account, or the
    /// provider's rejection converted into an error; never panics past
    /// its own boundary.
    pub async fn connect(&self) -> Result<String, ConnectorError> {
        let provider = self.provider()?;
        let value = provider.request(ETH_REQUEST_ACCOUNTS, json!([])).await.map_err(|e| {
            warn!("Wallet connection rejected: {}", e);
            ConnectorError::from(e)
        })?;
        let accounts: Vec<String> = serde_json::from_value(value).map_err(|e| {
            ConnectorError::InvalidResponse(format!("eth_requestAccounts: {}", e))
        })?;
        self.adopt_accounts(&accounts).await;
        self.account().ok_or(ConnectorError::NotConnected)
    }

    /// The active account, if any.
    pub fn account(&self) -> Option<String> {
        self.state.read().account.clone()
    }

    /// The hex id of the chain the wallet reported last, if any.
    pub fn chain_id(&self) -> Option<String> {
        self.state.read().chain_id.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.read().connected
    }

    /// Retrieves the native balance of the active account as a decimal
    /// ether string.
    pub async fn get_balance(&self) -> Result<String, ConnectorError> {
        let account = self.require_session()?;
        let provider = self.provider()?;

        debug!(account = %account, "Querying native balance");
        let value = provider.request(ETH_GET_BALANCE, json!([account, "latest"])).await?;
        let raw = value.as_str().ok_or_else(|| {
            ConnectorError::InvalidResponse(format!("eth_getBalance returned {}", value))
        })?;
        let balance = units::format_wei(units::parse_quantity(raw)?);
        debug!(balance = %balance, "Balance fetched");
        Ok(balance)
    }

    /// Submits a plain native transfer and returns the transaction
    /// hash. Gas defaults to the configured transfer limit. Not
    /// idempotent; a failure surfaces once and is not retried.
    pub async fn send_transfer(
        &self,
        to: &str,
        amount: &str,
        gas_limit: Option<u64>,
    ) -> Result<String, ConnectorError> {
        let from = self.require_session()?;
        let provider = self.provider()?;

        validation::validate_address(to)?;
        let value_wei = units::parse_amount(amount)?;
        let gas = gas_limit.unwrap_or(self.config.default_gas_limit);

        info!("Sending {} native units to {}", amount, to);
        let gas_price_raw = provider.request(ETH_GAS_PRICE, json!([])).await?;
        let gas_price = units::parse_quantity(gas_price_raw.as_str().ok_or_else(|| {
            ConnectorError::InvalidResponse(format!("eth_gasPrice returned {}", gas_price_raw))
        })?)?;
        debug!("Gas price: 0x{:x}", gas_price);

        let params = json!([{
            "from": from,
            "to": to,
            "value": units::to_quantity(value_wei),
            "gas": units::to_quantity(U256::from(gas)),
            "gasPrice": units::to_quantity(gas_price),
        }]);
        let result = provider.request(ETH_SEND_TRANSACTION, params).await.map_err(|e| {
            warn!("Transfer failed: {}", e);
            ConnectorError::from(e)
        })?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| {
                ConnectorError::InvalidResponse(format!("eth_sendTransaction returned {}", result))
            })?
            .to_string();

        info!(tx_hash = %tx_hash, "Transaction sent");
        Ok(tx_hash)
    }

    /// Asks the wallet to switch to `chain_id`. When the wallet does
    /// not know the chain, falls back to registering it from the
    /// network registry; all other rejections propagate.
    pub async fn switch_network(&self, chain_id: &str) -> Result<(), ConnectorError> {
        let provider = self.provider()?;
        info!("Switching wallet network to chain {}", chain_id);
        match provider.request(WALLET_SWITCH_CHAIN, json!([{ "chainId": chain_id }])).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_unrecognized_chain() => {
                debug!("Chain {} unknown to the wallet, requesting add", chain_id);
                self.add_network(chain_id).await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Asks the wallet to register `chain_id` from the registry. A
    /// chain without a descriptor is skipped silently.
    pub async fn add_network(&self, chain_id: &str) -> Result<(), ConnectorError> {
        let provider = self.provider()?;
        let descriptor = match self.registry.get(chain_id) {
            Some(d) => d,
            None => {
                debug!("No descriptor for chain {}, skipping add request", chain_id);
                return Ok(());
            }
        };
        let params = serde_json::to_value(descriptor)
            .map_err(|e| ConnectorError::SerializationError(e.to_string()))?;
        provider.request(WALLET_ADD_CHAIN, json!([params])).await.map_err(|e| {
            warn!("Failed to add network {}: {}", chain_id, e);
            ConnectorError::from(e)
        })?;
        Ok(())
    }

    /// Applies one provider event. Exposed so hosts driving their own
    /// event pump can dispatch manually; [`WalletConnector::run`] is
    /// the usual entry point.
    pub async fn handle_event(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => {
                debug!("Provider accounts changed ({} exposed)", accounts.len());
                self.adopt_accounts(&accounts).await;
            }
            ProviderEvent::ChainChanged(chain_id) => {
                info!("Provider chain changed to {}", chain_id);
                self.state.write().chain_id = Some(chain_id.clone());
                self.hooks.chain_changed(&chain_id);
                if self.config.reload_on_chain_change {
                    self.hooks.reload_requested();
                }
            }
            ProviderEvent::Connect { chain_id } => {
                debug!("Provider reported connect");
                let mut state = self.state.write();
                state.connected = true;
                if let Some(id) = chain_id {
                    state.chain_id = Some(id);
                }
            }
            ProviderEvent::Disconnect { error } => {
                if let Some(e) = error {
                    warn!("Provider disconnected: {}", e);
                }
                self.reset_session();
            }
        }
    }

    /// Drains the provider's event subscription, dispatching events in
    /// arrival order until the provider closes the stream.
    pub async fn run(&self) -> Result<(), ConnectorError> {
        let provider = self.provider()?;
        let mut events = provider.subscribe();
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        debug!("Provider event stream closed");
        Ok(())
    }

    fn provider(&self) -> Result<&Arc<dyn WalletProvider>, ConnectorError> {
        self.provider.as_ref().ok_or(ConnectorError::ProviderUnavailable)
    }

    fn require_session(&self) -> Result<String, ConnectorError> {
        let state = self.state.read();
        if !state.connected {
            return Err(ConnectorError::NotConnected);
        }
        state.account.clone().ok_or(ConnectorError::NotConnected)
    }

    /// Shared accounts-changed path: an empty list is a disconnect, a
    /// non-empty list adopts the first account and re-derives the
    /// chain id.
    async fn adopt_accounts(&self, accounts: &[String]) {
        let account = match accounts.first() {
            None => {
                self.reset_session();
                return;
            }
            Some(a) => a.clone(),
        };

        let fetched = self.fetch_chain_id().await;
        let chain_for_hook = {
            let mut state = self.state.write();
            state.account = Some(account.clone());
            state.connected = true;
            // keep the previous chain id when the fetch fails
            if let Some(id) = fetched {
                state.chain_id = Some(id);
            }
            state.chain_id.clone()
        };
        self.hooks.account_changed(&account, chain_for_hook.as_deref());
    }

    async fn fetch_chain_id(&self) -> Option<String> {
        let provider = self.provider.as_ref()?;
        match provider.request(ETH_CHAIN_ID, json!([])).await {
            Ok(serde_json::Value::String(id)) => Some(id),
            Ok(other) => {
                warn!("Unexpected chain id response: {}", other);
                None
            }
            Err(e) => {
                warn!("Failed to fetch chain id: {}", e);
                None
            }
        }
    }

    fn reset_session(&self) {
        {
            let mut state = self.state.write();
            *state = SessionState::default();
        }
        self.hooks.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(flavor = "current_thread")]
    async fn test_fresh_connector_has_no_session() {
        let connector = WalletConnector::new(Some(Arc::new(MockProvider::new())));
        assert_eq!(connector.account(), None);
        assert_eq!(connector.chain_id(), None);
        assert!(!connector.is_connected());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_detect_provider_present() {
        let connector = WalletConnector::new(Some(Arc::new(MockProvider::new())));
        assert!(connector.detect_provider());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_operations_without_provider_fail_closed() {
        let connector = WalletConnector::new(None);
        assert!(matches!(connector.connect().await, Err(ConnectorError::ProviderUnavailable)));
        assert!(matches!(
            connector.switch_network("0x1").await,
            Err(ConnectorError::ProviderUnavailable)
        ));
        assert!(matches!(connector.run().await, Err(ConnectorError::ProviderUnavailable)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_connect_event_marks_session_connected() {
        let connector = WalletConnector::new(Some(Arc::new(MockProvider::new())));
        connector
            .handle_event(ProviderEvent::Connect { chain_id: Some("0x89".to_string()) })
            .await;
        assert!(connector.is_connected());
        assert_eq!(connector.chain_id(), Some("0x89".to_string()));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_reload_hook_fires_only_when_configured() {
        let reloads = Arc::new(AtomicUsize::new(0));

        for (reload_on_chain_change, expected) in [(false, 0), (true, 1)] {
            let seen = Arc::clone(&reloads);
            let config = ConnectorConfig { reload_on_chain_change, ..Default::default() };
            let connector = WalletConnector::with_config(Some(Arc::new(MockProvider::new())), config)
                .with_hooks(ConnectorHooks::new().with_reload_requested(move || {
                    seen.fetch_add(1, Ordering::SeqCst);
                }));

            connector.handle_event(ProviderEvent::ChainChanged("0x5".to_string())).await;
            assert_eq!(reloads.load(Ordering::SeqCst), expected);
        }
    }
}
