//! # Buckets and Positions
//!
//! A bucket aggregates stake for one listed partner token and remembers the
//! index at its last checkpoint. Buckets and positions are never removed,
//! only zeroed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{GaugeError, GaugeResult};
use crate::math::{safe_add_u128, safe_sub_u128, RewardIndex};
use crate::types::Address;

/// Reward accounting unit for one partner token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub staked_amount: u128,
    /// Global index at the last checkpoint; never ahead of the global index
    pub checkpoint_index: RewardIndex,
    /// Reward earned before a stake change and not yet settled
    pub accrued_unsettled: u128,
}

impl Bucket {
    /// Fresh bucket checkpointed at `index`, so nothing accrued before
    /// its creation is ever owed to it
    pub fn new(index: RewardIndex) -> Self {
        Self {
            staked_amount: 0,
            checkpoint_index: index,
            accrued_unsettled: 0,
        }
    }

    /// Reward owed to this bucket at `index`
    pub fn pending(&self, index: &RewardIndex) -> GaugeResult<u128> {
        let earned = index.earned_since(&self.checkpoint_index, self.staked_amount)?;
        safe_add_u128(self.accrued_unsettled, earned)
    }

    /// Bank what the current stake earned and move the checkpoint to `index`
    pub fn checkpoint(&mut self, index: RewardIndex) -> GaugeResult<()> {
        self.accrued_unsettled = self.pending(&index)?;
        self.checkpoint_index = index;
        Ok(())
    }

    /// Take everything owed at `index`.
    ///
    /// Returns 0 and leaves the bucket untouched when nothing is owed.
    pub fn take_owed(&mut self, index: RewardIndex) -> GaugeResult<u128> {
        let owed = self.pending(&index)?;
        if owed == 0 {
            return Ok(0);
        }
        self.accrued_unsettled = 0;
        self.checkpoint_index = index;
        Ok(owed)
    }
}

/// Stake positions of a single user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLedger {
    /// Amount staked per bucket (zeroed entries are kept)
    pub positions: BTreeMap<Address, u128>,
    /// Buckets with a non-zero position
    pub active: BTreeSet<Address>,
}

impl UserLedger {
    pub fn amount_of(&self, bucket: &Address) -> u128 {
        self.positions.get(bucket).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, bucket: Address, amount: u128) -> GaugeResult<()> {
        let position = self.positions.entry(bucket).or_insert(0);
        *position = safe_add_u128(*position, amount)?;
        if *position > 0 {
            self.active.insert(bucket);
        }
        Ok(())
    }

    pub fn debit(&mut self, bucket: Address, amount: u128) -> GaugeResult<()> {
        let available = self.amount_of(&bucket);
        if amount > available {
            return Err(GaugeError::insufficient(amount, available));
        }
        let remaining = safe_sub_u128(available, amount)?;
        self.positions.insert(bucket, remaining);
        if remaining == 0 {
            self.active.remove(&bucket);
        }
        Ok(())
    }
}
