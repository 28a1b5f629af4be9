#![allow(dead_code)]

use serde_json::json;
use std::sync::Arc;
use wallet_connector::provider::mock::MockProvider;
use wallet_connector::provider::{ETH_CHAIN_ID, ETH_REQUEST_ACCOUNTS};
use wallet_connector::WalletConnector;

pub const ACCOUNT: &str = "0x742d35cc6634c0532925a3b8d400e8b78ffe4860";
pub const OTHER_ACCOUNT: &str = "0x53d284357ec70ce289d6d64134dfac8e511c8a3d";
pub const RECIPIENT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

/// Scripts a successful account-access grant for [`ACCOUNT`] on
/// mainnet.
pub fn script_session(mock: &MockProvider) {
    mock.script_ok(ETH_REQUEST_ACCOUNTS, json!([ACCOUNT]));
    mock.script_ok(ETH_CHAIN_ID, json!("0x1"));
}

/// A connector with an established session for [`ACCOUNT`].
pub async fn connected_connector(mock: Arc<MockProvider>) -> WalletConnector {
    script_session(&mock);
    let connector = WalletConnector::new(Some(mock));
    connector.connect().await.expect("scripted connect succeeds");
    connector
}
