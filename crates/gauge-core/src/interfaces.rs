//! # External Collaborators
//!
//! The gauge never owns token balances, pool liquidity or listing
//! decisions. It reaches them through these traits. An implementation that
//! returns an error must leave its own state unchanged.

use crate::errors::ExternalCallError;
use crate::types::{Address, PoolKey};

/// The emission token
pub trait EmissionToken {
    /// Address of the token contract
    fn address(&self) -> Address;

    /// Move `amount` from `from` to `to` on behalf of `spender`
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), ExternalCallError>;

    /// Move `amount` out of `sender`'s own balance
    fn transfer(&mut self, sender: Address, to: Address, amount: u128) -> Result<(), ExternalCallError>;

    /// Mint `amount` new units to `to`. May fail under the token's own
    /// minting policy (paused, capped, recipient blocked).
    fn mint(&mut self, to: Address, amount: u128) -> Result<(), ExternalCallError>;
}

/// The AMM pool manager
pub trait LiquidityPool {
    /// Address whose token balance backs the pool's accounting
    fn custody_address(&self) -> Address;

    /// Active liquidity of the pool
    fn liquidity(&self, key: &PoolKey) -> u128;

    /// Snapshot the custody balance of `currency` ahead of a payment
    fn sync(&mut self, currency: Address) -> Result<(), ExternalCallError>;

    /// Donate to in-range liquidity providers
    fn donate(&mut self, key: &PoolKey, amount0: u128, amount1: u128, data: &[u8]) -> Result<(), ExternalCallError>;

    /// Credit the balance paid in since the last `sync`; returns the amount settled
    fn settle(&mut self) -> Result<u128, ExternalCallError>;
}

/// Source of truth for which partner tokens are listed
pub trait ListingOracle {
    fn is_token_listed(&self, token: &Address) -> bool;
}
