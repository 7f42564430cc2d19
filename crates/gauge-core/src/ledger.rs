//! # Stake Ledger
//!
//! Bookkeeping for total, per-bucket and per-(user, bucket) stake. These
//! are pure state transitions; the caller advances the index first and
//! performs token transfers afterwards.
//!
//! Every stake change checkpoints the bucket at the current index. The
//! reward the bucket's previous balance earned up to that point is banked
//! in `accrued_unsettled` first, so a stake change never forfeits reward
//! that has not been settled yet.

use crate::errors::{GaugeError, GaugeResult};
use crate::math::{safe_add_u128, safe_sub_u128, RewardIndex};
use crate::state::{Bucket, GaugeState};
use crate::types::Address;

impl GaugeState {
    /// Credit `amount` of stake from `user` into `bucket_key`
    pub fn credit_stake(&mut self, user: Address, bucket_key: Address, amount: u128) -> GaugeResult<()> {
        if amount == 0 {
            return Err(GaugeError::ZeroAmount);
        }
        let index = self.accrual.reward_index;
        let total = safe_add_u128(self.accrual.total_staked, amount)?;

        let bucket = self
            .buckets
            .entry(bucket_key)
            .or_insert_with(|| Bucket::new(index));
        bucket.checkpoint(index)?;
        bucket.staked_amount = safe_add_u128(bucket.staked_amount, amount)?;

        self.users.entry(user).or_default().credit(bucket_key, amount)?;
        self.accrual.total_staked = total;
        Ok(())
    }

    /// Debit `amount` of `user`'s stake from `bucket_key`
    pub fn debit_stake(&mut self, user: Address, bucket_key: Address, amount: u128) -> GaugeResult<()> {
        if amount == 0 {
            return Err(GaugeError::ZeroAmount);
        }
        let index = self.accrual.reward_index;

        let bucket_available = self.buckets.get(&bucket_key).map_or(0, |b| b.staked_amount);
        if amount > bucket_available {
            return Err(GaugeError::insufficient(amount, bucket_available));
        }
        let user_available = self.user_stake(&user, &bucket_key);
        if amount > user_available {
            return Err(GaugeError::insufficient(amount, user_available));
        }
        let total = safe_sub_u128(self.accrual.total_staked, amount)?;

        if let Some(bucket) = self.buckets.get_mut(&bucket_key) {
            bucket.checkpoint(index)?;
            bucket.staked_amount = safe_sub_u128(bucket.staked_amount, amount)?;
        }
        if let Some(ledger) = self.users.get_mut(&user) {
            ledger.debit(bucket_key, amount)?;
        }
        self.accrual.total_staked = total;
        Ok(())
    }

    /// Reward owed to `bucket_key` at `index` (0 for unknown buckets)
    pub fn pending_at(&self, bucket_key: &Address, index: &RewardIndex) -> GaugeResult<u128> {
        match self.buckets.get(bucket_key) {
            Some(bucket) => bucket.pending(index),
            None => Ok(0),
        }
    }

    /// Take everything owed to `bucket_key` at the current index
    pub fn take_owed(&mut self, bucket_key: &Address) -> GaugeResult<u128> {
        let index = self.accrual.reward_index;
        match self.buckets.get_mut(bucket_key) {
            Some(bucket) => bucket.take_owed(index),
            None => Ok(0),
        }
    }

    pub fn user_stake(&self, user: &Address, bucket_key: &Address) -> u128 {
        self.users.get(user).map_or(0, |ledger| ledger.amount_of(bucket_key))
    }

    /// Buckets where `user` holds a non-zero position
    pub fn user_buckets(&self, user: &Address) -> Vec<Address> {
        self.users
            .get(user)
            .map(|ledger| ledger.active.iter().copied().collect())
            .unwrap_or_default()
    }
}
