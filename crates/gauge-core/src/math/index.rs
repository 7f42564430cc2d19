//! # Reward Index
//!
//! Cumulative emission per unit of stake, scaled by [`INDEX_SCALE`]. A single
//! global index is advanced lazily; buckets read it through checkpoint diffs.
//! Backed by a 256-bit integer so that long idle periods over a tiny genesis
//! stake cannot overflow.

use std::fmt;

use ethnum::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::INDEX_SCALE;
use crate::errors::{GaugeError, GaugeResult};
use crate::math::safe_math::u256_to_u128;

/// Fixed-point reward index (scale 1e18)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RewardIndex(U256);

impl RewardIndex {
    pub const ZERO: RewardIndex = RewardIndex(U256::ZERO);

    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    pub fn from_u128(raw: u128) -> Self {
        Self(U256::from(raw))
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    /// Index increment for `minted` units spread over `total_stake`:
    /// floor(minted * 1e18 / total_stake)
    pub fn delta_for(minted: u128, total_stake: u128) -> GaugeResult<U256> {
        if total_stake == 0 {
            return Err(GaugeError::DivisionByZero);
        }
        let scaled = U256::from(minted)
            .checked_mul(U256::from(INDEX_SCALE))
            .ok_or(GaugeError::MathOverflow)?;
        Ok(scaled / U256::from(total_stake))
    }

    /// Index after distributing `minted` units over `total_stake`
    pub fn accrue(&self, minted: u128, total_stake: u128) -> GaugeResult<Self> {
        let delta = Self::delta_for(minted, total_stake)?;
        self.0
            .checked_add(delta)
            .map(Self)
            .ok_or(GaugeError::MathOverflow)
    }

    /// Reward earned by `stake` between `checkpoint` and this index:
    /// floor(stake * (self - checkpoint) / 1e18)
    pub fn earned_since(&self, checkpoint: &RewardIndex, stake: u128) -> GaugeResult<u128> {
        let diff = self
            .0
            .checked_sub(checkpoint.0)
            .ok_or(GaugeError::MathUnderflow)?;
        if stake == 0 || diff == U256::ZERO {
            return Ok(0);
        }
        let product = diff
            .checked_mul(U256::from(stake))
            .ok_or(GaugeError::MathOverflow)?;
        u256_to_u128(product / U256::from(INDEX_SCALE))
    }
}

impl Default for RewardIndex {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RewardIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for RewardIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RewardIndex({})", self.0)
    }
}

// Decimal string, since a 256-bit value does not fit any JSON/TOML number
impl Serialize for RewardIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for RewardIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_str_radix(&s, 10)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}
