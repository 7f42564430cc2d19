//! Shared fixtures for gauge integration tests

#![allow(dead_code)]

pub mod mocks;

pub use mocks::{MockListing, MockPool, MockToken};

use gauge_core::{Address, CallContext, Gauge, GaugeConfig, PoolKey};

/// One whole token with 18 decimals
pub const E: u128 = 1_000_000_000_000_000_000;

pub const START: u64 = 1_700_000_000;
pub const DAY: u64 = 86_400;

pub const EMISSION: u64 = 0xE0;
pub const GAUGE: u64 = 0x6A;
pub const ADMIN: u64 = 0xAD;
pub const HOOK: u64 = 0x400;
pub const DEVELOPER: u64 = 0xDE;
pub const POOL_CUSTODY: u64 = 0x900;

pub const TOKEN_A: u64 = 0xA0A;
pub const TOKEN_B: u64 = 0xB0B;
pub const UNLISTED: u64 = 0xBAD;

pub const ALICE: u64 = 0x1;
pub const BOB: u64 = 0x2;
pub const CAROL: u64 = 0x3;

/// Dynamic fee marker used by pools that let the hook pick the fee
pub const DYNAMIC_FEE: u32 = 0x80_0000;

pub type TestGauge = Gauge<MockToken, MockPool, MockListing>;

pub fn addr(id: u64) -> Address {
    Address::from_u64(id)
}

pub fn ctx(caller: u64, timestamp: u64) -> CallContext {
    CallContext::new(addr(caller), timestamp)
}

pub fn pool_key(token: u64) -> PoolKey {
    PoolKey::new(addr(EMISSION), addr(token), DYNAMIC_FEE, 60, addr(HOOK))
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn config(mint_rate: u64) -> GaugeConfig {
    let mut config = GaugeConfig::new(
        addr(GAUGE),
        addr(ADMIN),
        addr(HOOK),
        addr(DEVELOPER),
        addr(EMISSION),
    );
    config.mint_rate = mint_rate;
    config
}

/// Gauge at `START` with tokens A and B listed, pool liquidity set and
/// every participant funded
pub fn setup(mint_rate: u64) -> TestGauge {
    setup_with(config(mint_rate))
}

pub fn setup_with(config: GaugeConfig) -> TestGauge {
    init_logging();

    let mut token = MockToken::new(addr(EMISSION));
    token.credit(addr(ADMIN), 1_000 * E);
    for user in [ALICE, BOB, CAROL] {
        token.credit(addr(user), 1_000_000 * E);
    }

    let mut pool = MockPool::new(addr(POOL_CUSTODY));
    pool.set_liquidity(pool_key(TOKEN_A), 1_000_000);
    pool.set_liquidity(pool_key(TOKEN_B), 1_000_000);

    let listing = MockListing::with_tokens(&[addr(TOKEN_A), addr(TOKEN_B)]);

    Gauge::initialize(config, token, pool, listing, START).unwrap()
}
