//! # Gauge State
//!
//! Persisted records: one global accrual record, one keeper record, the
//! bucket map and the per-user position ledgers. All maps are ordered so
//! that serialized snapshots are deterministic.

pub mod accrual;
pub mod bucket;
pub mod keeper;

pub use accrual::*;
pub use bucket::*;
pub use keeper::*;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::{GaugeError, GaugeResult};
use crate::fees::FeeSchedule;
use crate::math::safe_add_u128;
use crate::types::Address;

/// Key of the genesis bucket holding the bootstrap stake
pub const GENESIS_BUCKET: Address = Address::ZERO;

/// Complete gauge state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeState {
    pub accrual: GlobalAccrualState,
    pub keeper: KeeperState,
    pub fees: FeeSchedule,
    /// Identities charged the internal fee tier
    pub internal_identities: BTreeSet<Address>,
    /// Buckets keyed by the partner token of a listed pair
    pub buckets: BTreeMap<Address, Bucket>,
    /// Position ledgers keyed by user
    pub users: BTreeMap<Address, UserLedger>,
}

impl GaugeState {
    pub fn new(mint_rate: u128, fees: FeeSchedule, now: u64) -> Self {
        Self {
            accrual: GlobalAccrualState::new(mint_rate, now),
            keeper: KeeperState::default(),
            fees,
            internal_identities: BTreeSet::new(),
            buckets: BTreeMap::new(),
            users: BTreeMap::new(),
        }
    }

    /// Pretty JSON snapshot of the state
    pub fn to_json(&self) -> GaugeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot written by [`GaugeState::to_json`]
    pub fn from_json(content: &str) -> GaugeResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Verify conservation and checkpoint ordering.
    ///
    /// - Σ user positions in a bucket == bucket stake
    /// - Σ bucket stakes == total staked
    /// - every checkpoint ≤ global index
    pub fn check_invariants(&self) -> GaugeResult<()> {
        let mut per_bucket: BTreeMap<Address, u128> = BTreeMap::new();
        for (user, ledger) in &self.users {
            for (bucket_key, amount) in &ledger.positions {
                let sum = per_bucket.entry(*bucket_key).or_insert(0);
                *sum = safe_add_u128(*sum, *amount)?;
                if (*amount > 0) != ledger.active.contains(bucket_key) {
                    return Err(GaugeError::invalid_config(format!(
                        "active set of {} out of sync for bucket {}",
                        user, bucket_key
                    )));
                }
            }
            if ledger.active.iter().any(|key| !ledger.positions.contains_key(key)) {
                return Err(GaugeError::invalid_config(format!(
                    "active set of {} references unknown bucket",
                    user
                )));
            }
        }

        let mut total = 0u128;
        for (key, bucket) in &self.buckets {
            let positions = per_bucket.remove(key).unwrap_or(0);
            if positions != bucket.staked_amount {
                return Err(GaugeError::invalid_config(format!(
                    "bucket {} holds {} but positions sum to {}",
                    key, bucket.staked_amount, positions
                )));
            }
            if bucket.checkpoint_index > self.accrual.reward_index {
                return Err(GaugeError::invalid_config(format!(
                    "bucket {} checkpoint ahead of global index",
                    key
                )));
            }
            total = safe_add_u128(total, bucket.staked_amount)?;
        }

        if per_bucket.values().any(|amount| *amount > 0) {
            return Err(GaugeError::invalid_config("positions reference unknown bucket"));
        }
        if total != self.accrual.total_staked {
            return Err(GaugeError::invalid_config(format!(
                "buckets sum to {} but total staked is {}",
                total, self.accrual.total_staked
            )));
        }
        Ok(())
    }
}
