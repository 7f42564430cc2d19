//! # Distribution Settlement
//!
//! Forwards a bucket's owed reward once the ledger has already been
//! checkpointed. Mint failures are captured as [`MintAttempt::Failed`] and
//! never propagated: the index must keep advancing even when the emission
//! token refuses to mint (paused, capped). A failed mint forfeits that
//! amount for this cycle; it is not queued for retry.

use crate::errors::{ExternalCallError, GaugeResult};
use crate::interfaces::{EmissionToken, LiquidityPool};
use crate::types::{Address, PoolKey};

/// Outcome of one mint call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintAttempt {
    /// Nothing to mint
    Skipped,
    Minted { to: Address, amount: u128 },
    Failed { to: Address, amount: u128, reason: ExternalCallError },
}

impl MintAttempt {
    pub fn is_minted(&self) -> bool {
        matches!(self, MintAttempt::Minted { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MintAttempt::Failed { .. })
    }
}

/// What a settlement did with a bucket's owed reward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReport {
    pub bucket: Address,
    pub owed: u128,
    pub pool_liquidity: u128,
    pub developer_share: u128,
    pub community_share: u128,
    pub developer_mint: MintAttempt,
    pub community_mint: MintAttempt,
    /// Whether the community share reached the pool's LPs
    pub donated: bool,
}

/// Result of a liquidity event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Bucket had nothing owed; no side effects
    NothingOwed,
    Settled(SettlementReport),
}

/// Split `owed` in half, any odd unit going to the community
pub fn split_owed(owed: u128) -> (u128, u128) {
    let developer_share = owed / 2;
    (developer_share, owed - developer_share)
}

/// Try to mint, capturing a refusal instead of propagating it
pub fn attempt_mint<T: EmissionToken>(token: &mut T, to: Address, amount: u128) -> MintAttempt {
    if amount == 0 {
        return MintAttempt::Skipped;
    }
    match token.mint(to, amount) {
        Ok(()) => MintAttempt::Minted { to, amount },
        Err(reason) => {
            log::warn!("Mint of {} to {} failed: {}", amount, to, reason);
            MintAttempt::Failed { to, amount, reason }
        }
    }
}

/// Forward `owed` for `bucket` to the developer and the pool.
///
/// With no active liquidity the whole amount goes to the developer.
/// Otherwise half goes to the developer and the rest is minted into pool
/// custody and donated to LPs. Pool call failures are returned as errors.
pub fn distribute<T: EmissionToken, P: LiquidityPool>(
    token: &mut T,
    pool: &mut P,
    key: &PoolKey,
    bucket: Address,
    developer: Address,
    owed: u128,
    hook_data: &[u8],
) -> GaugeResult<SettlementReport> {
    let pool_liquidity = pool.liquidity(key);

    if pool_liquidity == 0 {
        let developer_mint = attempt_mint(token, developer, owed);
        return Ok(SettlementReport {
            bucket,
            owed,
            pool_liquidity,
            developer_share: owed,
            community_share: 0,
            developer_mint,
            community_mint: MintAttempt::Skipped,
            donated: false,
        });
    }

    let (developer_share, community_share) = split_owed(owed);
    let developer_mint = attempt_mint(token, developer, developer_share);

    let mut donated = false;
    let community_mint = if community_share == 0 {
        MintAttempt::Skipped
    } else {
        let emission = token.address();
        pool.sync(emission)?;
        let attempt = attempt_mint(token, pool.custody_address(), community_share);
        if attempt.is_minted() {
            let (amount0, amount1) = if key.is_currency0(&emission) {
                (community_share, 0)
            } else {
                (0, community_share)
            };
            pool.donate(key, amount0, amount1, hook_data)?;
            pool.settle()?;
            donated = true;
        }
        attempt
    };

    Ok(SettlementReport {
        bucket,
        owed,
        pool_liquidity,
        developer_share,
        community_share,
        developer_mint,
        community_mint,
        donated,
    })
}
