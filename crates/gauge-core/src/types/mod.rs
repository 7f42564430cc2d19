//! # Type Definitions
//!
//! Identities, pool keys and the per-call context.

pub mod address;
pub mod pool;

pub use address::*;
pub use pool::*;

/// Caller identity and block time for one public operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Identity invoking the operation
    pub caller: Address,
    /// Unix timestamp (seconds) at which the operation executes
    pub timestamp: u64,
}

impl CallContext {
    pub fn new(caller: Address, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }
}
