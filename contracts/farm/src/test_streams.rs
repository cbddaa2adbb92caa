extern crate std;

use soroban_sdk::{
    testutils::{storage::Instance as _, Address as _, Ledger as _},
    Address,
};

use crate::test::{
    balance, mint, new_token, new_vault, setup, staker, streams, token_pool, TaxedVault,
    TaxedVaultClient,
};
use crate::storage::DAY_IN_LEDGERS;
use crate::{AssetKind, ContractError, MAX_REWARD_STREAMS, MAX_START_DELAY};

// ── Adding streams ───────────────────────────────────────────────────────────

#[test]
fn test_added_stream_earns_only_from_addition() {
    let f = setup();
    let first = new_token(&f.env);
    let second = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&first, 10)]);
    f.client.start_now(&f.admin);
    let alice = staker(&f, &asset, 1_000);
    f.client.deposit(&pool_id, &alice, &1_000, &0);

    f.env.ledger().set_timestamp(10);
    f.client.add_reward_stream(&f.admin, &pool_id, &second, &20);
    assert_eq!(f.client.get_pool(&pool_id).reward_streams.len(), 2);
    assert_eq!(f.client.get_pool(&pool_id).last_accrual_time, 10);

    f.env.ledger().set_timestamp(15);
    assert_eq!(f.client.pending_reward(&pool_id, &alice, &first), 150);
    assert_eq!(f.client.pending_reward(&pool_id, &alice, &second), 100);
    assert!(f.client.is_reward_token(&second));
}

#[test]
fn test_duplicate_stream_fails() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, _) = token_pool(&f, 100, &[(&reward, 10)]);

    match f.client.try_add_reward_stream(&f.admin, &pool_id, &reward, &5) {
        Err(Ok(e)) => assert_eq!(e, ContractError::DuplicateRewardToken),
        _ => unreachable!("Expected DuplicateRewardToken error"),
    }
}

#[test]
fn test_stream_count_is_bounded() {
    let f = setup();
    let mut rewards = std::vec::Vec::new();
    for _ in 0..MAX_REWARD_STREAMS {
        rewards.push(new_token(&f.env));
    }
    let configs: std::vec::Vec<(&Address, i128)> = rewards.iter().map(|t| (t, 1)).collect();
    let (pool_id, _) = token_pool(&f, 100, &configs);

    let extra = new_token(&f.env);
    match f.client.try_add_reward_stream(&f.admin, &pool_id, &extra, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::TooManyRewardStreams),
        _ => unreachable!("Expected TooManyRewardStreams error"),
    }
}

#[test]
fn test_negative_emission_rate_fails() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, _) = token_pool(&f, 100, &[(&reward, 10)]);

    match f.client.try_set_emission_rate(&f.admin, &pool_id, &reward, &-1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidEmissionRate),
        _ => unreachable!("Expected InvalidEmissionRate error"),
    }
    let other = new_token(&f.env);
    match f.client.try_set_emission_rate(&f.admin, &pool_id, &other, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardStreamNotFound),
        _ => unreachable!("Expected RewardStreamNotFound error"),
    }
}

#[test]
fn test_emission_rate_change_is_not_retroactive() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    f.client.start_now(&f.admin);
    let alice = staker(&f, &asset, 1_000);
    f.client.deposit(&pool_id, &alice, &1_000, &0);

    f.env.ledger().set_timestamp(10);
    f.client.set_emission_rate(&f.admin, &pool_id, &reward, &30);

    f.env.ledger().set_timestamp(20);
    assert_eq!(f.client.pending_reward(&pool_id, &alice, &reward), 400);
}

// ── Removing streams ─────────────────────────────────────────────────────────

#[test]
fn test_remove_stream_settles_every_member() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    f.client.start_now(&f.admin);
    mint(&f.env, &reward, &f.client.address, 1_000_000);
    let alice = staker(&f, &asset, 1_000);
    let bob = staker(&f, &asset, 1_000);
    f.client.deposit(&pool_id, &alice, &1_000, &0);
    f.client.deposit(&pool_id, &bob, &1_000, &0);

    f.env.ledger().set_timestamp(10);
    let settled = f.client.remove_reward_stream(&f.admin, &pool_id, &reward);

    assert_eq!(settled, 100);
    assert_eq!(balance(&f.env, &reward, &alice), 50);
    assert_eq!(balance(&f.env, &reward, &bob), 50);
    assert_eq!(f.client.total_distributed(&reward), 100);
    assert_eq!(f.client.get_pool(&pool_id).reward_streams.len(), 0);
    assert!(!f.client.is_reward_token(&reward));
    assert!(f.client.get_position(&pool_id, &alice).debt.get(reward.clone()).is_none());

    match f.client.try_pending_reward(&pool_id, &alice, &reward) {
        Err(Ok(e)) => assert_eq!(e, ContractError::RewardStreamNotFound),
        _ => unreachable!("Expected RewardStreamNotFound error"),
    }
}

#[test]
fn test_remove_keeps_token_registered_while_other_pools_stream_it() {
    let f = setup();
    let reward = new_token(&f.env);
    let (first, _) = token_pool(&f, 100, &[(&reward, 10)]);
    token_pool(&f, 100, &[(&reward, 10)]);

    f.client.remove_reward_stream(&f.admin, &first, &reward);
    assert!(f.client.is_reward_token(&reward));

    f.client.remove_reward_stream(&f.admin, &1, &reward);
    assert!(!f.client.is_reward_token(&reward));
}

#[test]
fn test_readded_token_starts_from_zero() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    f.client.start_now(&f.admin);
    mint(&f.env, &reward, &f.client.address, 1_000_000);
    let alice = staker(&f, &asset, 1_000);
    f.client.deposit(&pool_id, &alice, &1_000, &0);

    f.env.ledger().set_timestamp(10);
    f.client.remove_reward_stream(&f.admin, &pool_id, &reward);
    assert_eq!(balance(&f.env, &reward, &alice), 100);

    f.env.ledger().set_timestamp(20);
    f.client.add_reward_stream(&f.admin, &pool_id, &reward, &10);
    let stream = f.client.get_pool(&pool_id).reward_streams.get(0).unwrap();
    assert_eq!(stream.accumulator, 0);

    // Only the 10 s since the stream came back count.
    f.env.ledger().set_timestamp(30);
    assert_eq!(f.client.pending_reward(&pool_id, &alice, &reward), 100);
    f.client.harvest(&pool_id, &alice);
    assert_eq!(balance(&f.env, &reward, &alice), 200);
}

/// Settlement pays through the same best-effort path as a harvest: once the
/// farm's balance runs out, later members receive what is left.
#[test]
fn test_remove_settlement_is_capped_by_balance() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    f.client.start_now(&f.admin);
    mint(&f.env, &reward, &f.client.address, 40);
    let alice = staker(&f, &asset, 1_000);
    let bob = staker(&f, &asset, 1_000);
    f.client.deposit(&pool_id, &alice, &1_000, &0);
    f.client.deposit(&pool_id, &bob, &1_000, &0);

    f.env.ledger().set_timestamp(10);
    let settled = f.client.remove_reward_stream(&f.admin, &pool_id, &reward);

    assert_eq!(settled, 40);
    assert_eq!(balance(&f.env, &reward, &alice), 40);
    assert_eq!(balance(&f.env, &reward, &bob), 0);
    assert_eq!(f.client.total_distributed(&reward), 40);
}

// ── Start time ───────────────────────────────────────────────────────────────

#[test]
fn test_start_time_bounds() {
    let f = setup();
    f.env.ledger().set_timestamp(1_000);

    match f.client.try_set_start_time(&f.admin, &1_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidStartTime),
        _ => unreachable!("Expected InvalidStartTime error"),
    }
    match f.client.try_set_start_time(&f.admin, &(1_000 + MAX_START_DELAY + 1)) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidStartTime),
        _ => unreachable!("Expected InvalidStartTime error"),
    }

    f.client.set_start_time(&f.admin, &(1_000 + MAX_START_DELAY));
    assert_eq!(f.client.start_time(), Some(1_000 + MAX_START_DELAY));

    match f.client.try_set_start_time(&f.admin, &2_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::StartAlreadySet),
        _ => unreachable!("Expected StartAlreadySet error"),
    }
    match f.client.try_start_now(&f.admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::StartAlreadySet),
        _ => unreachable!("Expected StartAlreadySet error"),
    }
}

#[test]
fn test_scheduled_start_gates_and_aligns_accrual() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    f.client.set_start_time(&f.admin, &100);
    assert_eq!(f.client.get_pool(&pool_id).last_accrual_time, 100);

    // A pool created after scheduling also starts its clock at the start time.
    let late_reward = new_token(&f.env);
    let (late_pool, _) = token_pool(&f, 100, &[(&late_reward, 10)]);
    assert_eq!(f.client.get_pool(&late_pool).last_accrual_time, 100);

    let alice = staker(&f, &asset, 1_000);
    f.env.ledger().set_timestamp(50);
    assert!(!f.client.is_active());
    match f.client.try_deposit(&pool_id, &alice, &1_000, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::FarmNotStarted),
        _ => unreachable!("Expected FarmNotStarted error"),
    }

    f.env.ledger().set_timestamp(100);
    assert!(f.client.is_active());
    f.client.deposit(&pool_id, &alice, &1_000, &0);

    // Two pools of equal weight: half of 10/s.
    f.env.ledger().set_timestamp(110);
    assert_eq!(f.client.pending_reward(&pool_id, &alice, &reward), 50);
}

// ── Pool administration ──────────────────────────────────────────────────────

#[test]
fn test_non_admin_cannot_manage_pools() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, _) = token_pool(&f, 100, &[(&reward, 10)]);
    let intruder = Address::generate(&f.env);

    let asset = new_token(&f.env);
    let vault = new_vault(&f, &asset);
    let result = f.client.try_create_pool(
        &intruder,
        &asset,
        &AssetKind::Token,
        &100,
        &vault,
        &streams(&f.env, &[(&reward, 10)]),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match f.client.try_set_pool_weight(&intruder, &pool_id, &1) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match f.client.try_remove_reward_stream(&intruder, &pool_id, &reward) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match f.client.try_start_now(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_duplicate_pool_asset_fails() {
    let f = setup();
    let reward = new_token(&f.env);
    let (_, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    let vault = new_vault(&f, &asset);

    let result = f.client.try_create_pool(
        &f.admin,
        &asset,
        &AssetKind::Token,
        &50,
        &vault,
        &streams(&f.env, &[(&reward, 10)]),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::DuplicatePoolAsset),
        _ => unreachable!("Expected DuplicatePoolAsset error"),
    }
    assert_eq!(f.client.pool_count(), 1);
    assert_eq!(f.client.total_allocation_weight(), 100);
}

#[test]
fn test_asset_kind_must_match_native_asset() {
    let f = setup();
    let reward = new_token(&f.env);
    let native_vault = new_vault(&f, &f.native);

    let result = f.client.try_create_pool(
        &f.admin,
        &f.native,
        &AssetKind::Token,
        &100,
        &native_vault,
        &streams(&f.env, &[(&reward, 10)]),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NativeAssetMismatch),
        _ => unreachable!("Expected NativeAssetMismatch error"),
    }

    let asset = new_token(&f.env);
    let vault = new_vault(&f, &asset);
    let result = f.client.try_create_pool(
        &f.admin,
        &asset,
        &AssetKind::Native,
        &100,
        &vault,
        &streams(&f.env, &[(&reward, 10)]),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NativeAssetMismatch),
        _ => unreachable!("Expected NativeAssetMismatch error"),
    }
}

#[test]
fn test_duplicate_stream_in_new_pool_fails() {
    let f = setup();
    let reward = new_token(&f.env);
    let asset = new_token(&f.env);
    let vault = new_vault(&f, &asset);

    let result = f.client.try_create_pool(
        &f.admin,
        &asset,
        &AssetKind::Token,
        &100,
        &vault,
        &streams(&f.env, &[(&reward, 10), (&reward, 5)]),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::DuplicateRewardToken),
        _ => unreachable!("Expected DuplicateRewardToken error"),
    }
}

#[test]
fn test_replacing_vault_migrates_custody() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    f.client.start_now(&f.admin);
    let alice = staker(&f, &asset, 1_000);
    f.client.deposit(&pool_id, &alice, &1_000, &0);
    let old_vault = f.client.get_pool(&pool_id).vault;

    let new = new_vault(&f, &asset);
    let migrated = f.client.set_pool_vault(&f.admin, &pool_id, &new);

    assert_eq!(migrated, 1_000);
    assert_eq!(f.client.get_pool(&pool_id).vault, new);
    assert_eq!(balance(&f.env, &asset, &old_vault), 0);
    assert_eq!(f.client.pool_tvl(&pool_id), 1_000);

    assert_eq!(f.client.withdraw(&pool_id, &alice, &1_000), 1_000);
    assert_eq!(balance(&f.env, &asset, &alice), 1_000);
}

#[test]
fn test_vault_migration_returns_what_new_vault_credits() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, asset) = token_pool(&f, 100, &[(&reward, 10)]);
    f.client.start_now(&f.admin);
    let alice = staker(&f, &asset, 1_000);
    f.client.deposit(&pool_id, &alice, &1_000, &0);

    let taxed = f.env.register(TaxedVault, ());
    TaxedVaultClient::new(&f.env, &taxed).init(&asset);
    let credited = f.client.set_pool_vault(&f.admin, &pool_id, &taxed);

    assert_eq!(credited, 990);
    assert_eq!(balance(&f.env, &asset, &taxed), 1_000);
    assert_eq!(f.client.get_pool(&pool_id).vault, taxed);
}

#[test]
fn test_pool_admin_writes_extend_instance_ttl() {
    let f = setup();
    let reward = new_token(&f.env);
    let (pool_id, _) = token_pool(&f, 100, &[(&reward, 10)]);
    let farm = f.client.address.clone();

    // Let the instance TTL fall below the renewal threshold.
    let sequence = f.env.ledger().sequence();
    f.env.ledger().set_sequence_number(sequence + DAY_IN_LEDGERS + 1);
    f.client.set_pool_weight(&f.admin, &pool_id, &50);

    f.env.as_contract(&farm, || {
        let ttl = f.env.storage().instance().get_ttl();
        assert!(ttl >= f.env.storage().max_ttl() - DAY_IN_LEDGERS);
    });
}

// ── Admin transfer ───────────────────────────────────────────────────────────

#[test]
fn test_two_step_admin_transfer() {
    let f = setup();
    let successor = Address::generate(&f.env);

    f.client.propose_admin(&f.admin, &successor);
    assert_eq!(f.client.get_pending_admin(), Some(successor.clone()));
    f.client.accept_admin(&successor);

    assert_eq!(f.client.get_admin(), successor);
    assert_eq!(f.client.get_pending_admin(), None);
    match f.client.try_start_now(&f.admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    f.client.start_now(&successor);
}

#[test]
fn test_cancelled_admin_transfer_cannot_be_accepted() {
    let f = setup();
    let successor = Address::generate(&f.env);

    f.client.propose_admin(&f.admin, &successor);
    f.client.cancel_admin_transfer(&f.admin);

    match f.client.try_accept_admin(&successor) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoPendingAdmin),
        _ => unreachable!("Expected NoPendingAdmin error"),
    }
}
