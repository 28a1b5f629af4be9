use ethers::types::Address;
use ethers::utils::to_checksum;
use std::str::FromStr;

use crate::core::errors::ConnectorError;

/// Validates an Ethereum address.
///
/// EIP-55: if mixed-case, enforce checksum. All-lower or all-upper
/// acceptable for compatibility.
pub fn validate_address(address: &str) -> Result<(), ConnectorError> {
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(ConnectorError::InvalidAddress(format!(
            "'{}' is not a 0x-prefixed 20-byte hex string",
            address
        )));
    }
    let parsed = Address::from_str(address)
        .map_err(|e| ConnectorError::InvalidAddress(format!("'{}': {}", address, e)))?;

    let body = &address[2..];
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower && to_checksum(&parsed, None) != address {
        return Err(ConnectorError::InvalidAddress(format!(
            "EIP-55 checksum mismatch for '{}'",
            address
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all_lowercase() {
        assert!(validate_address("0x742d35cc6634c0532925a3b8d400e8b78ffe4860").is_ok());
    }

    #[test]
    fn test_accepts_valid_checksum() {
        // Canonical EIP-55 test vector
        assert!(validate_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").is_ok());
    }

    #[test]
    fn test_rejects_bad_checksum() {
        // Same vector with one letter's case flipped
        let res = validate_address("0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
        assert!(matches!(res, Err(ConnectorError::InvalidAddress(_))));
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert!(validate_address("742d35cc6634c0532925a3b8d400e8b78ffe4860").is_err());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(validate_address("0x742d35").is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(validate_address("0x742d35cc6634c0532925a3b8d400e8b78ffe48zz").is_err());
    }
}
