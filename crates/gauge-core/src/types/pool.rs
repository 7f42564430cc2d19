//! # Pool Key
//!
//! Identifies a pool by its currency pair, fee and hook.

use serde::{Deserialize, Serialize};

use crate::types::Address;

/// Key of an AMM pool pairing two currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    /// Lower-sorted currency
    pub currency0: Address,
    /// Higher-sorted currency
    pub currency1: Address,
    /// Pool fee (pips), or the dynamic fee marker
    pub fee: u32,
    pub tick_spacing: i32,
    /// Hook contract attached to the pool
    pub hooks: Address,
}

impl PoolKey {
    /// Build a key, sorting the two currencies
    pub fn new(token_a: Address, token_b: Address, fee: u32, tick_spacing: i32, hooks: Address) -> Self {
        let (currency0, currency1) = if token_a <= token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Self { currency0, currency1, fee, tick_spacing, hooks }
    }

    /// The currency paired against `token`, if the pool contains it
    pub fn other_currency(&self, token: &Address) -> Option<Address> {
        if self.currency0 == *token {
            Some(self.currency1)
        } else if self.currency1 == *token {
            Some(self.currency0)
        } else {
            None
        }
    }

    /// Whether `token` is currency0 of this pool
    pub fn is_currency0(&self, token: &Address) -> bool {
        self.currency0 == *token
    }
}
