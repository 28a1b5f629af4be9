// src/lib.rs
//! Browser-wallet connector.
//!
//! Bridges a host application and an externally-owned wallet provider
//! (the EIP-1193-style request/event object injected by browser
//! wallets). The provider is an injected dependency behind the
//! [`provider::WalletProvider`] trait, so the connector's reaction
//! logic can be driven deterministically by a test double.

pub mod connector;
pub mod core;
pub mod network;
pub mod provider;

pub use crate::connector::hooks::{ConnectorHooks, InstallPrompt, INSTALL_PROMPT};
pub use crate::connector::WalletConnector;
pub use crate::core::config::ConnectorConfig;
pub use crate::core::errors::ConnectorError;
pub use crate::network::{NativeCurrency, NetworkDescriptor, NetworkRegistry};
pub use crate::provider::{ProviderError, ProviderEvent, WalletProvider};
