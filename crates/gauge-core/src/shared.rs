//! # Shared Gauge
//!
//! Thread-safe handle for hosts without an atomic transaction substrate.
//! The lock is held for the whole of each entry point, external calls
//! included, so no two operations ever interleave on the ledgers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{GaugeError, GaugeResult};
use crate::gauge::Gauge;
use crate::interfaces::{EmissionToken, ListingOracle, LiquidityPool};
use crate::settlement::SettlementOutcome;
use crate::types::{Address, CallContext, PoolKey};

/// Cloneable, lock-protected gauge
pub struct SharedGauge<T, P, L> {
    inner: Arc<Mutex<Gauge<T, P, L>>>,
}

impl<T, P, L> Clone for SharedGauge<T, P, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, P, L> SharedGauge<T, P, L>
where
    T: EmissionToken,
    P: LiquidityPool,
    L: ListingOracle,
{
    pub fn new(gauge: Gauge<T, P, L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(gauge)),
        }
    }

    fn lock(&self) -> GaugeResult<MutexGuard<'_, Gauge<T, P, L>>> {
        self.inner.lock().map_err(|_| GaugeError::LockPoisoned)
    }

    pub fn stake(&self, ctx: CallContext, bucket_key: Address, amount: u128) -> GaugeResult<()> {
        self.lock()?.stake(ctx, bucket_key, amount)
    }

    pub fn unstake(&self, ctx: CallContext, bucket_key: Address, amount: u128) -> GaugeResult<()> {
        self.lock()?.unstake(ctx, bucket_key, amount)
    }

    pub fn on_liquidity_event(
        &self,
        ctx: CallContext,
        pool_key: &PoolKey,
        hook_data: &[u8],
    ) -> GaugeResult<SettlementOutcome> {
        self.lock()?.on_liquidity_event(ctx, pool_key, hook_data)
    }

    pub fn bid_for_keeper(&self, ctx: CallContext, amount: u128) -> GaugeResult<()> {
        self.lock()?.bid_for_keeper(ctx, amount)
    }

    pub fn preview_pending(&self, bucket_key: &Address, now: u64) -> GaugeResult<u128> {
        self.lock()?.preview_pending(bucket_key, now)
    }

    pub fn total_staked(&self) -> GaugeResult<u128> {
        Ok(self.lock()?.total_staked())
    }

    /// Run `f` with exclusive access to the gauge
    pub fn with<R>(&self, f: impl FnOnce(&mut Gauge<T, P, L>) -> R) -> GaugeResult<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }
}
