//! Settlement on liquidity events: split, redirect and mint-failure tolerance

mod common;

use common::*;
use gauge_core::settlement::split_owed;
use gauge_core::{
    Address, ExternalCallError, GaugeError, GaugeEvent, MintAttempt, PoolKey, SettlementOutcome, SettlementReport,
};
use proptest::prelude::*;

const OWED_A: u128 = 1_200 * E - 600;

/// Alice 600 in A and Bob 400 in B at 100 tokens/s, settled 20s later
fn staked_gauge() -> TestGauge {
    let mut gauge = setup(0);
    gauge.set_mint_rate(ctx(ADMIN, START), 100 * E).unwrap();
    gauge.stake(ctx(ALICE, START), addr(TOKEN_A), 600 * E).unwrap();
    gauge.stake(ctx(BOB, START), addr(TOKEN_B), 400 * E).unwrap();
    gauge.take_events();
    gauge
}

fn settle_a(gauge: &mut TestGauge, data: &[u8]) -> SettlementReport {
    match gauge.on_liquidity_event(ctx(HOOK, START + 20), &pool_key(TOKEN_A), data).unwrap() {
        SettlementOutcome::Settled(report) => report,
        SettlementOutcome::NothingOwed => panic!("expected a settlement"),
    }
}

#[test]
fn test_split_with_liquidity() {
    let mut gauge = staked_gauge();
    let report = settle_a(&mut gauge, b"lp-add");

    let half = OWED_A / 2;
    assert_eq!(report.owed, OWED_A);
    assert_eq!(report.pool_liquidity, 1_000_000);
    assert_eq!(report.developer_share, half);
    assert_eq!(report.community_share, OWED_A - half);
    assert_eq!(report.developer_mint, MintAttempt::Minted { to: addr(DEVELOPER), amount: half });
    assert_eq!(
        report.community_mint,
        MintAttempt::Minted { to: addr(POOL_CUSTODY), amount: OWED_A - half }
    );
    assert!(report.donated);

    assert_eq!(gauge.token().balance_of(&addr(DEVELOPER)), half);
    assert_eq!(gauge.token().balance_of(&addr(POOL_CUSTODY)), OWED_A - half);

    // Emission is currency0 of this pool
    let pool = gauge.pool();
    assert_eq!(pool.synced, vec![addr(EMISSION)]);
    assert_eq!(pool.donations.len(), 1);
    assert_eq!(pool.donations[0].key, pool_key(TOKEN_A));
    assert_eq!(pool.donations[0].amount0, OWED_A - half);
    assert_eq!(pool.donations[0].amount1, 0);
    assert_eq!(pool.donations[0].data, b"lp-add".to_vec());
    assert_eq!(pool.settled, vec![OWED_A - half]);
}

#[test]
fn test_events_for_settlement() {
    let mut gauge = staked_gauge();
    settle_a(&mut gauge, &[]);

    let events = gauge.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], GaugeEvent::IndexAdvanced { minted, .. } if minted == 2_000 * E));
    assert_eq!(
        events[1],
        GaugeEvent::RewardsDistributed {
            bucket: addr(TOKEN_A),
            owed: OWED_A,
            developer_share: OWED_A / 2,
            community_share: OWED_A - OWED_A / 2,
            donated: true,
        }
    );
}

#[test]
fn test_donation_on_currency1_side() {
    let mut gauge = staked_gauge();
    let low = 0x50;
    gauge.listing_mut().listed.insert(addr(low));
    let key = PoolKey::new(addr(EMISSION), addr(low), DYNAMIC_FEE, 60, addr(HOOK));
    assert_eq!(key.currency1, addr(EMISSION));
    gauge.pool_mut().set_liquidity(key, 10);

    gauge.stake(ctx(CAROL, START), addr(low), 1_000 * E).unwrap();
    let outcome = gauge.on_liquidity_event(ctx(HOOK, START + 50), &key, &[]).unwrap();
    let SettlementOutcome::Settled(report) = outcome else {
        panic!("expected a settlement");
    };
    assert!(report.donated);

    let donation = &gauge.pool().donations[0];
    assert_eq!(donation.amount0, 0);
    assert_eq!(donation.amount1, report.community_share);
}

#[test]
fn test_zero_liquidity_redirects_to_developer() {
    let mut gauge = staked_gauge();
    gauge.pool_mut().set_liquidity(pool_key(TOKEN_A), 0);

    let report = settle_a(&mut gauge, &[]);
    assert_eq!(report.pool_liquidity, 0);
    assert_eq!(report.developer_share, OWED_A);
    assert_eq!(report.community_share, 0);
    assert_eq!(report.community_mint, MintAttempt::Skipped);
    assert!(!report.donated);

    assert_eq!(gauge.token().balance_of(&addr(DEVELOPER)), OWED_A);
    assert!(gauge.pool().synced.is_empty());
    assert!(gauge.pool().donations.is_empty());
    assert!(gauge.pool().settled.is_empty());
}

#[test]
fn test_developer_mint_failure_is_tolerated() {
    let mut gauge = staked_gauge();
    gauge.token_mut().blocked_recipients.insert(addr(DEVELOPER));

    let report = settle_a(&mut gauge, &[]);
    assert!(report.developer_mint.is_failed());
    assert!(report.community_mint.is_minted());
    assert!(report.donated);
    assert_eq!(gauge.token().balance_of(&addr(DEVELOPER)), 0);

    let events = gauge.take_events();
    assert!(events.contains(&GaugeEvent::MintFailed {
        bucket: addr(TOKEN_A),
        to: addr(DEVELOPER),
        amount: OWED_A / 2,
    }));
}

#[test]
fn test_community_mint_failure_skips_donation() {
    let mut gauge = staked_gauge();
    gauge.token_mut().blocked_recipients.insert(addr(POOL_CUSTODY));

    let report = settle_a(&mut gauge, &[]);
    assert!(report.developer_mint.is_minted());
    assert!(report.community_mint.is_failed());
    assert!(!report.donated);

    // Sync precedes the mint; donate and settle never run
    assert_eq!(gauge.pool().synced, vec![addr(EMISSION)]);
    assert!(gauge.pool().donations.is_empty());
    assert!(gauge.pool().settled.is_empty());

    // The checkpoint moved anyway and the failed share is not re-queued
    let again = gauge
        .on_liquidity_event(ctx(HOOK, START + 20), &pool_key(TOKEN_A), &[])
        .unwrap();
    assert_eq!(again, SettlementOutcome::NothingOwed);
    assert_eq!(gauge.preview_pending(&addr(TOKEN_A), START + 20).unwrap(), 0);
}

#[test]
fn test_paused_mint_still_advances_checkpoint() {
    let mut gauge = staked_gauge();
    gauge.token_mut().mint_paused = true;

    let report = settle_a(&mut gauge, &[]);
    assert_eq!(
        report.developer_mint,
        MintAttempt::Failed { to: addr(DEVELOPER), amount: OWED_A / 2, reason: ExternalCallError::Paused }
    );
    assert!(report.community_mint.is_failed());
    assert!(!report.donated);
    assert!(gauge.token().mints.is_empty());

    let bucket = gauge.bucket(&addr(TOKEN_A)).unwrap();
    assert_eq!(bucket.checkpoint_index, gauge.reward_index());
    assert_eq!(bucket.accrued_unsettled, 0);

    let failures = gauge
        .take_events()
        .into_iter()
        .filter(|event| matches!(event, GaugeEvent::MintFailed { .. }))
        .count();
    assert_eq!(failures, 2);
}

#[test]
fn test_nothing_owed_has_no_side_effects() {
    let mut gauge = staked_gauge();
    let outcome = gauge
        .on_liquidity_event(ctx(HOOK, START), &pool_key(TOKEN_A), &[])
        .unwrap();
    assert_eq!(outcome, SettlementOutcome::NothingOwed);
    assert!(gauge.token().mints.is_empty());
    assert!(gauge.pool().synced.is_empty());
    assert!(gauge.take_events().is_empty());
}

#[test]
fn test_unknown_bucket_owes_nothing() {
    let mut gauge = staked_gauge();
    let outcome = gauge
        .on_liquidity_event(ctx(HOOK, START + 20), &pool_key(UNLISTED), &[])
        .unwrap();
    assert_eq!(outcome, SettlementOutcome::NothingOwed);
}

#[test]
fn test_only_hook_may_settle() {
    let mut gauge = staked_gauge();
    assert_eq!(
        gauge.on_liquidity_event(ctx(ALICE, START + 20), &pool_key(TOKEN_A), &[]),
        Err(GaugeError::NotAuthorized(addr(ALICE)))
    );
    assert_eq!(gauge.preview_pending(&addr(TOKEN_A), START + 20).unwrap(), OWED_A);
}

#[test]
fn test_pool_without_emission_token_rejected() {
    let mut gauge = staked_gauge();
    let key = PoolKey::new(addr(TOKEN_B), addr(TOKEN_A), DYNAMIC_FEE, 60, addr(HOOK));
    assert_eq!(
        gauge.on_liquidity_event(ctx(HOOK, START + 20), &key, &[]),
        Err(GaugeError::NotEligible(addr(TOKEN_A)))
    );
}

#[test]
fn test_pool_failure_rolls_back_checkpoint() {
    let mut gauge = staked_gauge();
    gauge.pool_mut().fail_donate = true;
    let snapshot = gauge.state().clone();

    let result = gauge.on_liquidity_event(ctx(HOOK, START + 20), &pool_key(TOKEN_A), &[]);
    assert!(matches!(result, Err(GaugeError::ExternalCall(ExternalCallError::Rejected(_)))));
    assert_eq!(gauge.state(), &snapshot);
    assert!(gauge.take_events().is_empty());

    gauge.pool_mut().fail_donate = false;
    let report = settle_a(&mut gauge, &[]);
    assert_eq!(report.owed, OWED_A);
}

#[test]
fn test_total_owed_matches_emission() {
    let mut gauge = staked_gauge();
    gauge.pool_mut().set_liquidity(pool_key(TOKEN_B), 0);

    let a = settle_a(&mut gauge, &[]);
    let b = match gauge
        .on_liquidity_event(ctx(HOOK, START + 20), &pool_key(TOKEN_B), &[])
        .unwrap()
    {
        SettlementOutcome::Settled(report) => report,
        SettlementOutcome::NothingOwed => panic!("expected a settlement"),
    };
    assert_eq!(b.owed, 800 * E - 400);
    assert_eq!(b.developer_share, b.owed);

    // Rounding dust stays unminted; nothing is minted beyond the emission
    let minted: u128 = gauge.token().mints.iter().map(|(_, amount)| amount).sum();
    assert_eq!(minted, a.owed + b.owed);
    assert!(minted <= 2_000 * E);
}

proptest! {
    #[test]
    fn prop_split_conserves(owed in any::<u128>()) {
        let (developer, community) = split_owed(owed);
        prop_assert_eq!(developer + community, owed);
        prop_assert!(community >= developer);
        prop_assert!(community - developer <= 1);
    }
}

#[test]
fn test_native_pool_never_settles_genesis_bucket() {
    let mut gauge = setup(0);
    gauge.set_mint_rate(ctx(ADMIN, START), E).unwrap();
    gauge.take_events();

    let native = PoolKey::new(Address::ZERO, addr(EMISSION), DYNAMIC_FEE, 60, addr(HOOK));
    assert_eq!(native.other_currency(&addr(EMISSION)), Some(Address::ZERO));
    gauge.pool_mut().set_liquidity(native, 1_000_000);
    let genesis_before = gauge.bucket(&Address::ZERO).unwrap().clone();

    // Thirty idle days where the genesis stake holds all of the index
    let now = START + 30 * DAY;
    assert_eq!(gauge.preview_pending(&Address::ZERO, now).unwrap(), 0);
    let outcome = gauge.on_liquidity_event(ctx(HOOK, now), &native, b"lp-add").unwrap();

    assert_eq!(outcome, SettlementOutcome::NothingOwed);
    assert!(gauge.token().mints.is_empty());
    assert!(gauge.pool().synced.is_empty());
    assert!(gauge.pool().donations.is_empty());
    assert!(gauge.pool().settled.is_empty());
    assert_eq!(gauge.bucket(&Address::ZERO), Some(&genesis_before));
    assert!(gauge.take_events().is_empty());

    // Real buckets keep accruing and settling normally afterwards
    gauge.stake(ctx(ALICE, now), addr(TOKEN_A), 100 * E).unwrap();
    let later = gauge
        .on_liquidity_event(ctx(HOOK, now + 10), &pool_key(TOKEN_A), &[])
        .unwrap();
    assert!(matches!(later, SettlementOutcome::Settled(report) if report.owed == 10 * E - 100));
}
