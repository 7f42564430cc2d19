//! # Gauge
//!
//! Public surface of the engine. Each mutating entry point is an atomic
//! transition: the gauge's state and event buffer are restored if the
//! operation fails at any step. Ledger effects are committed before any
//! external call that could observe them, and the index is always advanced
//! before anything that changes total stake or the mint rate.

use crate::config::GaugeConfig;
use crate::errors::{GaugeError, GaugeResult};
use crate::events::{EventLog, GaugeEvent};
use crate::fees::{self, FeeTier};
use crate::interfaces::{EmissionToken, ListingOracle, LiquidityPool};
use crate::math::RewardIndex;
use crate::settlement::{self, MintAttempt, SettlementOutcome};
use crate::state::{Bucket, GaugeState, GENESIS_BUCKET};
use crate::types::{Address, CallContext, PoolKey};

/// Emission gauge bound to its external collaborators
pub struct Gauge<T, P, L> {
    config: GaugeConfig,
    state: GaugeState,
    events: EventLog,
    token: T,
    pool: P,
    listing: L,
}

impl<T, P, L> Gauge<T, P, L>
where
    T: EmissionToken,
    P: LiquidityPool,
    L: ListingOracle,
{
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a gauge and seed the genesis stake.
    ///
    /// Pulls `bootstrap_stake` from the admin and books it to a reserved
    /// bucket owned by the gauge itself, so total stake is never zero and
    /// a first depositor cannot collect emission from an idle period.
    pub fn initialize(config: GaugeConfig, mut token: T, pool: P, listing: L, now: u64) -> GaugeResult<Self> {
        config.validate()?;
        if token.address() != config.emission_token {
            return Err(GaugeError::invalid_config(format!(
                "token at {} does not match configured emission token {}",
                token.address(),
                config.emission_token
            )));
        }

        let mut state = GaugeState::new(config.mint_rate as u128, config.fees, now);
        state.internal_identities.extend(config.internal_identities.iter().copied());

        let bootstrap = config.bootstrap_stake as u128;
        state.credit_stake(config.gauge, GENESIS_BUCKET, bootstrap)?;
        token.transfer_from(config.gauge, config.admin, config.gauge, bootstrap)?;

        log::info!(
            "Gauge initialized: mint_rate={} bootstrap_stake={} developer={}",
            config.mint_rate,
            bootstrap,
            config.developer
        );

        Ok(Self {
            config,
            state,
            events: EventLog::default(),
            token,
            pool,
            listing,
        })
    }

    /// Re-hydrate a gauge from persisted state
    pub fn resume(config: GaugeConfig, state: GaugeState, token: T, pool: P, listing: L) -> GaugeResult<Self> {
        config.validate()?;
        state.check_invariants()?;
        if state.accrual.total_staked == 0 {
            return Err(GaugeError::invalid_config("persisted state has no genesis stake"));
        }
        log::info!(
            "Gauge resumed: total_staked={} buckets={} index={}",
            state.accrual.total_staked,
            state.buckets.len(),
            state.accrual.reward_index
        );
        Ok(Self {
            config,
            state,
            events: EventLog::default(),
            token,
            pool,
            listing,
        })
    }

    // ========================================================================
    // Stake Ledger
    // ========================================================================

    /// Stake `amount` of the emission token into the bucket of `bucket_key`
    pub fn stake(&mut self, ctx: CallContext, bucket_key: Address, amount: u128) -> GaugeResult<()> {
        self.transact(|gauge| {
            if amount == 0 {
                return Err(GaugeError::ZeroAmount);
            }
            gauge.ensure_eligible(&bucket_key)?;
            gauge.advance(ctx.timestamp)?;

            gauge.state.credit_stake(ctx.caller, bucket_key, amount)?;
            gauge
                .token
                .transfer_from(gauge.config.gauge, ctx.caller, gauge.config.gauge, amount)?;

            log::info!("Staked {} into {} by {}", amount, bucket_key, ctx.caller);
            gauge.events.emit(GaugeEvent::Staked {
                user: ctx.caller,
                bucket: bucket_key,
                amount,
            });
            Ok(())
        })
    }

    /// Withdraw `amount` of the caller's stake from `bucket_key`
    pub fn unstake(&mut self, ctx: CallContext, bucket_key: Address, amount: u128) -> GaugeResult<()> {
        self.transact(|gauge| {
            if amount == 0 {
                return Err(GaugeError::ZeroAmount);
            }
            if bucket_key == GENESIS_BUCKET {
                return Err(GaugeError::NotEligible(bucket_key));
            }
            gauge.advance(ctx.timestamp)?;

            gauge.state.debit_stake(ctx.caller, bucket_key, amount)?;
            gauge.token.transfer(gauge.config.gauge, ctx.caller, amount)?;

            log::info!("Unstaked {} from {} by {}", amount, bucket_key, ctx.caller);
            gauge.events.emit(GaugeEvent::Unstaked {
                user: ctx.caller,
                bucket: bucket_key,
                amount,
            });
            Ok(())
        })
    }

    /// Reward a settlement of `bucket_key` at `now` would compute
    pub fn preview_pending(&self, bucket_key: &Address, now: u64) -> GaugeResult<u128> {
        if *bucket_key == GENESIS_BUCKET {
            return Ok(0);
        }
        let index = self.state.accrual.index_at(now)?;
        self.state.pending_at(bucket_key, &index)
    }

    pub fn get_user_stake(&self, user: &Address, bucket_key: &Address) -> u128 {
        self.state.user_stake(user, bucket_key)
    }

    /// Buckets where `user` has a non-zero stake; never includes the genesis bucket
    pub fn get_user_buckets(&self, user: &Address) -> Vec<Address> {
        let mut buckets = self.state.user_buckets(user);
        buckets.retain(|key| *key != GENESIS_BUCKET);
        buckets
    }

    pub fn total_staked(&self) -> u128 {
        self.state.accrual.total_staked
    }

    pub fn bucket(&self, bucket_key: &Address) -> Option<&Bucket> {
        self.state.buckets.get(bucket_key)
    }

    // ========================================================================
    // Reward Index
    // ========================================================================

    /// Advance the global index to `timestamp`
    pub fn accrue(&mut self, timestamp: u64) -> GaugeResult<RewardIndex> {
        self.transact(|gauge| {
            gauge.advance(timestamp)?;
            Ok(gauge.state.accrual.reward_index)
        })
    }

    pub fn reward_index(&self) -> RewardIndex {
        self.state.accrual.reward_index
    }

    pub fn mint_rate(&self) -> u128 {
        self.state.accrual.mint_rate
    }

    /// Change the emission rate; elapsed time is priced at the old rate first
    pub fn set_mint_rate(&mut self, ctx: CallContext, new_rate: u128) -> GaugeResult<()> {
        self.transact(|gauge| {
            gauge.ensure_admin(&ctx)?;
            gauge.advance(ctx.timestamp)?;

            let old_rate = gauge.state.accrual.mint_rate;
            gauge.state.accrual.mint_rate = new_rate;

            log::info!("Mint rate changed from {} to {}", old_rate, new_rate);
            gauge.events.emit(GaugeEvent::MintRateUpdated { old_rate, new_rate });
            Ok(())
        })
    }

    // ========================================================================
    // Distribution Settlement
    // ========================================================================

    /// Settle the bucket of `pool_key` ahead of a liquidity change.
    ///
    /// The checkpoint moves before any mint is attempted and stays moved
    /// whatever the mints do; refused mints are reported, not raised.
    /// A pool pairing the emission token with the native currency maps to
    /// the genesis bucket and always reports `NothingOwed`.
    pub fn on_liquidity_event(
        &mut self,
        ctx: CallContext,
        pool_key: &PoolKey,
        hook_data: &[u8],
    ) -> GaugeResult<SettlementOutcome> {
        self.transact(|gauge| {
            if ctx.caller != gauge.config.hook {
                return Err(GaugeError::NotAuthorized(ctx.caller));
            }
            let emission = gauge.config.emission_token;
            let bucket_key = pool_key
                .other_currency(&emission)
                .ok_or(GaugeError::NotEligible(pool_key.currency0))?;
            // Native-currency pools share the genesis key; the genesis share is never paid out
            if bucket_key == GENESIS_BUCKET {
                return Ok(SettlementOutcome::NothingOwed);
            }

            gauge.advance(ctx.timestamp)?;
            let owed = gauge.state.take_owed(&bucket_key)?;
            if owed == 0 {
                return Ok(SettlementOutcome::NothingOwed);
            }

            let report = settlement::distribute(
                &mut gauge.token,
                &mut gauge.pool,
                pool_key,
                bucket_key,
                gauge.config.developer,
                owed,
                hook_data,
            )?;

            for attempt in [&report.developer_mint, &report.community_mint] {
                if let MintAttempt::Failed { to, amount, .. } = attempt {
                    gauge.events.emit(GaugeEvent::MintFailed {
                        bucket: bucket_key,
                        to: *to,
                        amount: *amount,
                    });
                }
            }
            log::info!(
                "Settled {} for {}: developer={} community={} donated={}",
                owed,
                bucket_key,
                report.developer_share,
                report.community_share,
                report.donated
            );
            gauge.events.emit(GaugeEvent::RewardsDistributed {
                bucket: bucket_key,
                owed,
                developer_share: report.developer_share,
                community_share: report.community_share,
                donated: report.donated,
            });
            Ok(SettlementOutcome::Settled(report))
        })
    }

    // ========================================================================
    // Keeper Auction
    // ========================================================================

    /// Take the keeper seat with a deposit strictly above the current one.
    ///
    /// The new deposit is pulled before the displaced keeper is refunded,
    /// and the seat changes hands only after both transfers succeed.
    pub fn bid_for_keeper(&mut self, ctx: CallContext, amount: u128) -> GaugeResult<()> {
        self.transact(|gauge| {
            gauge.state.keeper.validate_bid(amount)?;
            let refund = gauge.state.keeper.refund_due();
            let custody = gauge.config.gauge;

            gauge.token.transfer_from(custody, ctx.caller, custody, amount)?;
            if let Some((previous, deposit)) = refund {
                gauge.token.transfer(custody, previous, deposit)?;
            }
            gauge.state.keeper.commit(ctx.caller, amount);

            log::info!("Keeper seat taken by {} with deposit {}", ctx.caller, amount);
            gauge.events.emit(GaugeEvent::KeeperChanged {
                previous: refund.map(|(holder, _)| holder),
                keeper: ctx.caller,
                deposit: amount,
            });
            Ok(())
        })
    }

    pub fn current_keeper(&self) -> (Option<Address>, u128) {
        (self.state.keeper.holder, self.state.keeper.deposit)
    }

    // ========================================================================
    // Fee Tiers
    // ========================================================================

    pub fn fee_tier_of(&self, identity: &Address) -> FeeTier {
        fees::tier_for(identity, &self.state.internal_identities, &self.state.keeper)
    }

    /// Fee charged to `identity` on a swap
    pub fn select_fee(&self, identity: &Address) -> u32 {
        fees::select_fee(
            identity,
            &self.state.fees,
            &self.state.internal_identities,
            &self.state.keeper,
        )
    }

    /// Fee for `identity` with the pool-fee override flag set
    pub fn before_swap_fee(&self, identity: &Address) -> u32 {
        fees::with_override_flag(self.select_fee(identity))
    }

    pub fn is_internal(&self, identity: &Address) -> bool {
        self.state.internal_identities.contains(identity)
    }

    pub fn set_internal_identity(&mut self, ctx: CallContext, identity: Address, internal: bool) -> GaugeResult<()> {
        self.transact(|gauge| {
            gauge.ensure_admin(&ctx)?;
            if identity.is_zero() {
                return Err(GaugeError::ZeroAddress("identity"));
            }
            if internal {
                gauge.state.internal_identities.insert(identity);
            } else {
                gauge.state.internal_identities.remove(&identity);
            }
            log::info!("Internal flag of {} set to {}", identity, internal);
            gauge
                .events
                .emit(GaugeEvent::InternalIdentityUpdated { identity, internal });
            Ok(())
        })
    }

    pub fn set_fee_tier(&mut self, ctx: CallContext, tier: FeeTier, value: u32) -> GaugeResult<()> {
        self.transact(|gauge| {
            gauge.ensure_admin(&ctx)?;
            gauge.state.fees.set(tier, value)?;
            log::info!("{:?} fee set to {}", tier, value);
            gauge.events.emit(GaugeEvent::FeeTierUpdated { tier, value });
            Ok(())
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn state(&self) -> &GaugeState {
        &self.state
    }

    /// Drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<GaugeEvent> {
        self.events.drain()
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    pub fn listing_mut(&mut self) -> &mut L {
        &mut self.listing
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Run `op` atomically against the gauge's own state
    fn transact<R>(&mut self, op: impl FnOnce(&mut Self) -> GaugeResult<R>) -> GaugeResult<R> {
        let snapshot = self.state.clone();
        let mark = self.events.len();
        let result = op(self);
        if let Err(ref err) = result {
            log::debug!("Operation rolled back: {}", err);
            self.state = snapshot;
            self.events.truncate(mark);
        }
        result
    }

    fn advance(&mut self, now: u64) -> GaugeResult<()> {
        if let Some(advance) = self.state.accrual.advance(now)? {
            log::debug!(
                "Index advanced over {}s: minted={} index={}",
                advance.elapsed,
                advance.minted,
                advance.reward_index
            );
            self.events.emit(GaugeEvent::IndexAdvanced {
                reward_index: advance.reward_index,
                minted: advance.minted,
                timestamp: now,
            });
        }
        Ok(())
    }

    fn ensure_admin(&self, ctx: &CallContext) -> GaugeResult<()> {
        if ctx.caller != self.config.admin {
            return Err(GaugeError::NotAuthorized(ctx.caller));
        }
        Ok(())
    }

    fn ensure_eligible(&self, bucket_key: &Address) -> GaugeResult<()> {
        if *bucket_key == GENESIS_BUCKET
            || *bucket_key == self.config.emission_token
            || !self.listing.is_token_listed(bucket_key)
        {
            return Err(GaugeError::NotEligible(*bucket_key));
        }
        Ok(())
    }
}
