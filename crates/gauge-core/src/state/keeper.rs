//! # Keeper Auction State
//!
//! King-of-the-hill: a bid must strictly exceed the standing deposit, and
//! the displaced holder is refunded in full as part of the takeover.

use serde::{Deserialize, Serialize};

use crate::errors::{GaugeError, GaugeResult};
use crate::types::Address;

/// Current keeper and the deposit backing it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperState {
    pub holder: Option<Address>,
    pub deposit: u128,
}

impl KeeperState {
    /// Check a bid against the standing deposit
    pub fn validate_bid(&self, amount: u128) -> GaugeResult<()> {
        if amount == 0 {
            return Err(GaugeError::ZeroAmount);
        }
        if amount <= self.deposit {
            return Err(GaugeError::BidTooLow {
                bid: amount,
                current: self.deposit,
            });
        }
        Ok(())
    }

    /// Holder and deposit to refund if `amount` takes over
    pub fn refund_due(&self) -> Option<(Address, u128)> {
        self.holder.map(|holder| (holder, self.deposit))
    }

    pub fn is_keeper(&self, identity: &Address) -> bool {
        self.holder.as_ref() == Some(identity)
    }

    /// Install `candidate` as keeper
    pub fn commit(&mut self, candidate: Address, amount: u128) {
        self.holder = Some(candidate);
        self.deposit = amount;
    }
}
