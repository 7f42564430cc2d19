//! # Error Types
//!
//! Every caller-facing rejection aborts the whole operation; the gauge rolls
//! back its state before returning one of these.

use thiserror::Error;

use crate::types::Address;

/// Errors returned by external collaborators (token, pool)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalCallError {
    #[error("Token is paused")]
    Paused,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Insufficient allowance")]
    InsufficientAllowance,

    #[error("Call rejected: {0}")]
    Rejected(String),
}

/// Gauge errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GaugeError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("Token {0} is not eligible")]
    NotEligible(Address),

    #[error("Caller {0} is not authorized")]
    NotAuthorized(Address),

    #[error("Bid {bid} does not exceed current deposit {current}")]
    BidTooLow { bid: u128, current: u128 },

    #[error("Zero address for '{0}'")]
    ZeroAddress(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    // ========================================================================
    // Environment Errors
    // ========================================================================
    #[error("External call failed: {0}")]
    ExternalCall(#[from] ExternalCallError),

    #[error("Gauge lock poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type using gauge errors
pub type GaugeResult<T> = Result<T, GaugeError>;

impl From<std::io::Error> for GaugeError {
    fn from(err: std::io::Error) -> Self {
        GaugeError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for GaugeError {
    fn from(err: toml::de::Error) -> Self {
        GaugeError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for GaugeError {
    fn from(err: toml::ser::Error) -> Self {
        GaugeError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for GaugeError {
    fn from(err: serde_json::Error) -> Self {
        GaugeError::Parse(err.to_string())
    }
}

impl GaugeError {
    /// Create an insufficient balance error
    pub fn insufficient(requested: u128, available: u128) -> Self {
        Self::InsufficientBalance { requested, available }
    }

    /// Create an invalid configuration error with reason
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}
