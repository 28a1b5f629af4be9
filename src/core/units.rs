use ethers::types::U256;
use ethers::utils::{format_ether, parse_ether};

use crate::core::errors::ConnectorError;

/// Decodes a 0x-prefixed hex quantity as returned by the provider
/// (balances, gas prices).
pub fn parse_quantity(raw: &str) -> Result<U256, ConnectorError> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).unwrap_or(raw);
    if digits.is_empty() {
        return Err(ConnectorError::InvalidResponse(format!("empty hex quantity '{}'", raw)));
    }
    U256::from_str_radix(digits, 16).map_err(|e| {
        ConnectorError::InvalidResponse(format!("invalid hex quantity '{}': {}", raw, e))
    })
}

/// Encodes a quantity for a provider request field.
pub fn to_quantity(value: U256) -> String {
    format!("{:#x}", value)
}

/// Converts a wei amount to a decimal ether display string, with
/// trailing fractional zeros trimmed.
pub fn format_wei(amount: U256) -> String {
    let formatted = format_ether(amount);
    // format_ether always carries the full 18-digit fractional part
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses a decimal ether amount into wei.
pub fn parse_amount(amount: &str) -> Result<U256, ConnectorError> {
    parse_ether(amount)
        .map_err(|e| ConnectorError::InvalidAmount(format!("'{}': {}", amount, e)))
}
