use thiserror::Error;

use crate::provider::ProviderError;

/// Custom error type for connector operations.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// No wallet provider was injected into the host environment.
    #[error("Provider unavailable: no injected wallet provider was detected")]
    ProviderUnavailable,
    /// An operation requiring an active session was invoked without one.
    /// Raised before any provider request is issued.
    #[error("Wallet not connected")]
    NotConnected,
    /// The provider rejected a request.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    /// Recipient address validation errors.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// Amount parsing/conversion errors.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    /// The provider resolved a request with a payload the connector
    /// cannot interpret.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ConnectorError {
    /// Whether the failure came from the provider rather than from
    /// caller misuse or a malformed payload.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, ConnectorError::Provider(_))
    }

    /// Numeric code carried by the provider rejection, when present.
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            ConnectorError::Provider(err) => err.code,
            _ => None,
        }
    }
}
