#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub native_asset: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub asset: Address,
    pub vault: Address,
    pub allocation_weight: u64,
    pub total_allocation_weight: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pool_id: u32,
    pub allocation_weight: u64,
    pub total_allocation_weight: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultReplacedEvent {
    pub pool_id: u32,
    pub old_vault: Address,
    pub new_vault: Address,
    /// Released by the old vault.
    pub migrated: i128,
    /// Credited by the new vault.
    pub credited: i128,
    pub timestamp: u64,
}

/// Fired when a reward stream is added to a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardStreamAddedEvent {
    pub pool_id: u32,
    pub token: Address,
    pub emission_rate: i128,
    pub timestamp: u64,
}

/// Fired after a stream has been settled for every member and deleted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardStreamRemovedEvent {
    pub pool_id: u32,
    pub token: Address,
    pub settled: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmissionRateSetEvent {
    pub pool_id: u32,
    pub token: Address,
    pub emission_rate: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartTimeSetEvent {
    pub start_time: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub requested: i128,
    pub credited: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub released: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user leaves a pool forfeiting pending rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub released: i128,
    pub timestamp: u64,
}

/// Fired for every non-zero reward transfer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub pool_id: u32,
    pub user: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the farm could not cover a payout in full.
///
/// The difference between `owed` and `paid` is not carried forward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutShortfallEvent {
    pub token: Address,
    pub to: Address,
    pub owed: i128,
    pub paid: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, native_asset: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            native_asset,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(
    env: &Env,
    pool_id: u32,
    asset: Address,
    vault: Address,
    allocation_weight: u64,
    total_allocation_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolCreatedEvent {
            pool_id,
            asset,
            vault,
            allocation_weight,
            total_allocation_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_weight_set(
    env: &Env,
    pool_id: u32,
    allocation_weight: u64,
    total_allocation_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_WGT"), pool_id),
        PoolWeightSetEvent {
            pool_id,
            allocation_weight,
            total_allocation_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vault_replaced(
    env: &Env,
    pool_id: u32,
    old_vault: Address,
    new_vault: Address,
    migrated: i128,
    credited: i128,
) {
    env.events().publish(
        (symbol_short!("VAULT_SET"), pool_id),
        VaultReplacedEvent {
            pool_id,
            old_vault,
            new_vault,
            migrated,
            credited,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_stream_added(env: &Env, pool_id: u32, token: Address, emission_rate: i128) {
    env.events().publish(
        (symbol_short!("RWD_ADD"), pool_id, token.clone()),
        RewardStreamAddedEvent {
            pool_id,
            token,
            emission_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_stream_removed(env: &Env, pool_id: u32, token: Address, settled: i128) {
    env.events().publish(
        (symbol_short!("RWD_DEL"), pool_id, token.clone()),
        RewardStreamRemovedEvent {
            pool_id,
            token,
            settled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emission_rate_set(env: &Env, pool_id: u32, token: Address, emission_rate: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"), pool_id, token.clone()),
        EmissionRateSetEvent {
            pool_id,
            token,
            emission_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_start_time_set(env: &Env, start_time: u64) {
    env.events().publish(
        (symbol_short!("START"),),
        StartTimeSetEvent {
            start_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    pool_id: u32,
    user: Address,
    requested: i128,
    credited: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pool_id, user.clone()),
        DepositedEvent {
            pool_id,
            user,
            requested,
            credited,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    released: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), pool_id, user.clone()),
        WithdrawnEvent {
            pool_id,
            user,
            amount,
            released,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    released: i128,
) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), pool_id, user.clone()),
        EmergencyWithdrawnEvent {
            pool_id,
            user,
            amount,
            released,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, pool_id: u32, user: Address, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), user.clone(), token.clone()),
        RewardPaidEvent {
            pool_id,
            user,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_payout_shortfall(env: &Env, token: Address, to: Address, owed: i128, paid: i128) {
    env.events().publish(
        (symbol_short!("SHORTFALL"), token.clone()),
        PayoutShortfallEvent {
            token,
            to,
            owed,
            paid,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
