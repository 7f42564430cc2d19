//! # Gauge Core - Emission Gauge Engine
//!
//! Distributes a continuously-minted emission token across buckets (one per
//! listed partner asset) in proportion to stake, and settles each bucket's
//! share whenever liquidity changes in its pool. It provides:
//!
//! - A lazily-evaluated global reward index shared by every bucket
//! - The stake/unstake ledger with per-bucket checkpoints
//! - Settlement that tolerates failing mints without corrupting accounting
//! - A king-of-the-hill keeper auction with atomic refunds
//! - Fee tier selection for internal, keeper and external swappers
//!
//! External systems (the emission token, the pool and the listing oracle)
//! are reached through the traits in [`interfaces`].

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod fees;
pub mod gauge;
pub mod interfaces;
pub mod ledger;
pub mod math;
pub mod settlement;
pub mod shared;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use config::GaugeConfig;
pub use constants::*;
pub use errors::{ExternalCallError, GaugeError, GaugeResult};
pub use events::GaugeEvent;
pub use fees::{FeeSchedule, FeeTier};
pub use gauge::Gauge;
pub use interfaces::{EmissionToken, ListingOracle, LiquidityPool};
pub use math::RewardIndex;
pub use settlement::{MintAttempt, SettlementOutcome, SettlementReport};
pub use shared::SharedGauge;
pub use state::{Bucket, GaugeState, GlobalAccrualState, KeeperState, UserLedger};
pub use types::{Address, CallContext, PoolKey};
