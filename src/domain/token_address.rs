//! TokenAddress value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest address accepted (EVM hex addresses are 42, Solana base58 up to 44).
const MAX_ADDRESS_LEN: usize = 64;

/// A type-safe wrapper for on-chain token addresses.
///
/// Addresses are validated at construction time: they must be non-empty,
/// ASCII alphanumeric, and at most 64 characters long. No chain-specific
/// checksum is verified.
///
/// # Example
///
/// ```
/// use token_screener_mcp::domain::TokenAddress;
///
/// let address = TokenAddress::new("Ey59PH7Z4BFU4HjyKnyMdWt5GGN76KazTAwQihoUXRnk").unwrap();
/// assert_eq!(address.as_str(), "Ey59PH7Z4BFU4HjyKnyMdWt5GGN76KazTAwQihoUXRnk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAddress(String);

impl TokenAddress {
    /// Create a new TokenAddress, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyAddress` for an empty string and
    /// `ValidationError::InvalidAddress` for anything else malformed.
    pub fn new(address: impl Into<String>) -> Result<Self, ValidationError> {
        let address = address.into();
        if address.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        if address.len() > MAX_ADDRESS_LEN || !address.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidAddress(address));
        }
        Ok(Self(address))
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for TokenAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TokenAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TokenAddress::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
