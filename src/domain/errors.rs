//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided token address is empty.
    EmptyAddress,

    /// The provided token address is malformed.
    InvalidAddress(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "Token address cannot be empty"),
            Self::InvalidAddress(address) => write!(f, "Invalid token address: {}", address),
        }
    }
}

impl std::error::Error for ValidationError {}
