//! The injected wallet provider contract.
//!
//! Browser wallets expose a single object with a promise-returning
//! `request` method and an event subscription. [`WalletProvider`]
//! models that object so live providers and deterministic test doubles
//! are interchangeable.
//!
//! Ordering: events are delivered in emission order. No ordering is
//! guaranteed between an in-flight `request` and an event arriving
//! concurrently; that hazard is inherent to the upstream provider
//! design and is not arbitrated here.

pub mod mock;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use tokio::sync::mpsc;

/// JSON-RPC methods issued to the provider.
pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_GET_BALANCE: &str = "eth_getBalance";
pub const ETH_GAS_PRICE: &str = "eth_gasPrice";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
pub const WALLET_SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
pub const WALLET_ADD_CHAIN: &str = "wallet_addEthereumChain";

/// The wallet rejected the request at the user's direction.
pub const ERR_USER_REJECTED: i64 = 4001;
/// The requested chain is unknown to the wallet and must be added first.
pub const ERR_UNRECOGNIZED_CHAIN: i64 = 4902;

/// A rejected provider request: a message plus an optional numeric
/// code. Only [`ERR_UNRECOGNIZED_CHAIN`] is inspected structurally;
/// all other codes are opaque to the connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into() }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self { code: Some(code), message: message.into() }
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(ERR_UNRECOGNIZED_CHAIN)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Push notifications emitted by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The set of exposed accounts changed. An empty list means the
    /// wallet revoked access entirely.
    AccountsChanged(Vec<String>),
    /// The active chain changed; carries the new hex chain id.
    ChainChanged(String),
    /// The provider established a connection to its chain.
    Connect { chain_id: Option<String> },
    /// The provider lost its connection.
    Disconnect { error: Option<ProviderError> },
}

/// Defines the standard interface for an injected wallet provider.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Submits a request and suspends until the provider resolves or
    /// rejects it. There is no cancellation or timeout; a hung
    /// provider hangs the caller.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Opens an event subscription. Events are delivered in the order
    /// the provider emits them.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ProviderEvent>;
}
