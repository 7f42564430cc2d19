//! # Fee Tier Selection
//!
//! Maps a swapper identity to a fee: internal identities first, then the
//! current keeper, then everyone else. Tier values are independent; a
//! keeper fee above the external fee is a policy choice, not an error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXTERNAL_FEE, DEFAULT_INTERNAL_FEE, DEFAULT_KEEPER_FEE, MAX_LP_FEE, OVERRIDE_FEE_FLAG,
};
use crate::errors::{GaugeError, GaugeResult};
use crate::state::KeeperState;
use crate::types::Address;

/// Fee tier a swapper falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    Internal,
    Keeper,
    External,
}

/// Fee per tier, in pips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub internal: u32,
    pub keeper: u32,
    pub external: u32,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            internal: DEFAULT_INTERNAL_FEE,
            keeper: DEFAULT_KEEPER_FEE,
            external: DEFAULT_EXTERNAL_FEE,
        }
    }
}

impl FeeSchedule {
    pub fn get(&self, tier: FeeTier) -> u32 {
        match tier {
            FeeTier::Internal => self.internal,
            FeeTier::Keeper => self.keeper,
            FeeTier::External => self.external,
        }
    }

    pub fn set(&mut self, tier: FeeTier, value: u32) -> GaugeResult<()> {
        validate_fee(tier, value)?;
        match tier {
            FeeTier::Internal => self.internal = value,
            FeeTier::Keeper => self.keeper = value,
            FeeTier::External => self.external = value,
        }
        Ok(())
    }

    pub fn validate(&self) -> GaugeResult<()> {
        validate_fee(FeeTier::Internal, self.internal)?;
        validate_fee(FeeTier::Keeper, self.keeper)?;
        validate_fee(FeeTier::External, self.external)
    }
}

fn validate_fee(tier: FeeTier, value: u32) -> GaugeResult<()> {
    if value > MAX_LP_FEE {
        return Err(GaugeError::invalid_config(format!(
            "{:?} fee {} exceeds maximum {}",
            tier, value, MAX_LP_FEE
        )));
    }
    Ok(())
}

/// Tier for `identity`
pub fn tier_for(
    identity: &Address,
    internal_identities: &BTreeSet<Address>,
    keeper: &KeeperState,
) -> FeeTier {
    if internal_identities.contains(identity) {
        FeeTier::Internal
    } else if keeper.is_keeper(identity) {
        FeeTier::Keeper
    } else {
        FeeTier::External
    }
}

/// Fee charged to `identity`
pub fn select_fee(
    identity: &Address,
    schedule: &FeeSchedule,
    internal_identities: &BTreeSet<Address>,
    keeper: &KeeperState,
) -> u32 {
    schedule.get(tier_for(identity, internal_identities, keeper))
}

/// Fee with the override flag set, as returned to a dynamic-fee swap path
pub fn with_override_flag(fee: u32) -> u32 {
    fee | OVERRIDE_FEE_FLAG
}
