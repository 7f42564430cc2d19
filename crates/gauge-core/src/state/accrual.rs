//! # Global Accrual State
//!
//! Single monotonic reward index advanced lazily from elapsed time, mint
//! rate and total stake. `advance` must run before anything changes the
//! total stake or the mint rate, so each interval is priced at the
//! configuration that was in force during it.

use serde::{Deserialize, Serialize};

use crate::errors::GaugeResult;
use crate::math::{safe_mul_u128, RewardIndex};

/// Global accrual record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalAccrualState {
    /// Sum of all bucket stakes, genesis stake included
    pub total_staked: u128,
    /// Cumulative emission per unit of stake (scale 1e18)
    pub reward_index: RewardIndex,
    /// Timestamp the index was last advanced to
    pub last_accrual_time: u64,
    /// Emission units minted per second
    pub mint_rate: u128,
}

/// Result of a non-trivial index advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexAdvance {
    pub elapsed: u64,
    pub minted: u128,
    pub reward_index: RewardIndex,
}

impl GlobalAccrualState {
    pub fn new(mint_rate: u128, now: u64) -> Self {
        Self {
            total_staked: 0,
            reward_index: RewardIndex::ZERO,
            last_accrual_time: now,
            mint_rate,
        }
    }

    /// Index value `advance(now)` would produce, without mutating
    pub fn index_at(&self, now: u64) -> GaugeResult<RewardIndex> {
        match self.pending_emission(now)? {
            Some((_, minted)) => self.reward_index.accrue(minted, self.total_staked),
            None => Ok(self.reward_index),
        }
    }

    /// Advance the index to `now`.
    ///
    /// No-op when nothing is staked or no time has passed. Timestamps
    /// earlier than the last accrual are treated as zero elapsed time.
    pub fn advance(&mut self, now: u64) -> GaugeResult<Option<IndexAdvance>> {
        let Some((elapsed, minted)) = self.pending_emission(now)? else {
            return Ok(None);
        };

        self.reward_index = self.reward_index.accrue(minted, self.total_staked)?;
        self.last_accrual_time = now;

        Ok(Some(IndexAdvance {
            elapsed,
            minted,
            reward_index: self.reward_index,
        }))
    }

    fn pending_emission(&self, now: u64) -> GaugeResult<Option<(u64, u128)>> {
        if self.total_staked == 0 || now <= self.last_accrual_time {
            return Ok(None);
        }
        let elapsed = now - self.last_accrual_time;
        let minted = safe_mul_u128(elapsed as u128, self.mint_rate)?;
        Ok(Some((elapsed, minted)))
    }
}
