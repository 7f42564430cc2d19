//! # Gauge Events
//!
//! Observer notifications, buffered per gauge and drained by the host.
//! Events from an operation that fails are discarded along with its state.

use crate::fees::FeeTier;
use crate::math::RewardIndex;
use crate::types::Address;

/// Emitted state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GaugeEvent {
    IndexAdvanced {
        reward_index: RewardIndex,
        minted: u128,
        timestamp: u64,
    },
    Staked {
        user: Address,
        bucket: Address,
        amount: u128,
    },
    Unstaked {
        user: Address,
        bucket: Address,
        amount: u128,
    },
    RewardsDistributed {
        bucket: Address,
        owed: u128,
        developer_share: u128,
        community_share: u128,
        donated: bool,
    },
    /// A mint was refused and its amount forfeited for this cycle
    MintFailed {
        bucket: Address,
        to: Address,
        amount: u128,
    },
    KeeperChanged {
        previous: Option<Address>,
        keeper: Address,
        deposit: u128,
    },
    MintRateUpdated {
        old_rate: u128,
        new_rate: u128,
    },
    FeeTierUpdated {
        tier: FeeTier,
        value: u32,
    },
    InternalIdentityUpdated {
        identity: Address,
        internal: bool,
    },
}

/// Pending event buffer
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GaugeEvent>,
}

impl EventLog {
    pub fn emit(&mut self, event: GaugeEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop events recorded after `mark`
    pub fn truncate(&mut self, mark: usize) {
        self.events.truncate(mark);
    }

    pub fn drain(&mut self) -> Vec<GaugeEvent> {
        std::mem::take(&mut self.events)
    }
}
