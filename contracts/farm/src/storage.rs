use soroban_sdk::{symbol_short, Address, Env, IntoVal, Map, Symbol, Val, Vec};

use crate::errors::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_ASSET: Symbol = symbol_short!("NATIVE");
const START_TIME: Symbol = symbol_short!("START");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WGT");
const REWARD_REGISTRY: Symbol = symbol_short!("RWD_REG");
const USER_COUNT: Symbol = symbol_short!("USER_CNT");

// Per-key persistent storage uses tuple keys: (prefix, …)
const USER_SEEN: Symbol = symbol_short!("SEEN");
const USERS: Symbol = symbol_short!("USERS");
const DISTRIBUTED: Symbol = symbol_short!("DISTRIB");

/// Largest page returned by the paged registry views.
pub const MAX_PAGE: u32 = 100;

/// Roughly one day of ledgers at five seconds per ledger.
pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;

// ── TTL ──────────────────────────────────────────────────────────────────────

pub fn extend_instance(env: &Env) {
    let max_ttl = env.storage().max_ttl();
    env.storage()
        .instance()
        .extend_ttl(max_ttl.saturating_sub(DAY_IN_LEDGERS), max_ttl);
}

pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    let max_ttl = env.storage().max_ttl();
    env.storage()
        .persistent()
        .extend_ttl(key, max_ttl.saturating_sub(DAY_IN_LEDGERS), max_ttl);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

pub fn native_asset(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&NATIVE_ASSET)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_native_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&NATIVE_ASSET, asset);
}

pub fn start_time(env: &Env) -> Option<u64> {
    env.storage().instance().get(&START_TIME)
}

pub fn set_start_time(env: &Env, start: u64) {
    env.storage().instance().set(&START_TIME, &start);
}

/// The farm is active once a start time is set and has been reached.
pub fn is_active(env: &Env, now: u64) -> bool {
    matches!(start_time(env), Some(start) if now >= start)
}

pub fn require_active(env: &Env, now: u64) -> Result<(), ContractError> {
    if !is_active(env, now) {
        return Err(ContractError::FarmNotStarted);
    }
    Ok(())
}

// ── Allocation weight ────────────────────────────────────────────────────────

pub fn total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn set_total_weight(env: &Env, weight: u64) {
    env.storage().instance().set(&TOTAL_WEIGHT, &weight);
}

// ── Reward-token registry ────────────────────────────────────────────────────
// Token -> number of pools currently streaming it.

fn registry(env: &Env) -> Map<Address, u32> {
    env.storage()
        .instance()
        .get(&REWARD_REGISTRY)
        .unwrap_or(Map::new(env))
}

pub fn register_reward_token(env: &Env, token: &Address) {
    let mut reg = registry(env);
    let count = reg.get(token.clone()).unwrap_or(0);
    reg.set(token.clone(), count.saturating_add(1));
    env.storage().instance().set(&REWARD_REGISTRY, &reg);
}

/// Drops one pool reference; the token leaves the registry with its last one.
pub fn release_reward_token(env: &Env, token: &Address) {
    let mut reg = registry(env);
    match reg.get(token.clone()).unwrap_or(0) {
        0 | 1 => {
            reg.remove(token.clone());
        }
        n => reg.set(token.clone(), n - 1),
    }
    env.storage().instance().set(&REWARD_REGISTRY, &reg);
}

pub fn reward_tokens(env: &Env) -> Vec<Address> {
    registry(env).keys()
}

pub fn is_reward_token(env: &Env, token: &Address) -> bool {
    registry(env).contains_key(token.clone())
}

// ── User registry ────────────────────────────────────────────────────────────

/// Record `user` in the farm-wide registry on first interaction. Each user
/// takes its own `(USERS, index)` entry.
pub fn track_user(env: &Env, user: &Address) {
    let seen_key = (USER_SEEN, user.clone());
    if env.storage().persistent().has(&seen_key) {
        return;
    }
    env.storage().persistent().set(&seen_key, &true);
    extend_persistent(env, &seen_key);

    let index = user_count(env);
    let slot_key = (USERS, index);
    env.storage().persistent().set(&slot_key, user);
    extend_persistent(env, &slot_key);
    env.storage().instance().set(&USER_COUNT, &(index + 1));
}

pub fn user_count(env: &Env) -> u32 {
    env.storage().instance().get(&USER_COUNT).unwrap_or(0)
}

/// Up to `limit` users starting at `start`, in order of first deposit.
pub fn users(env: &Env, start: u32, limit: u32) -> Vec<Address> {
    let limit = limit.min(MAX_PAGE);
    let end = user_count(env).min(start.saturating_add(limit));
    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(user) = env.storage().persistent().get(&(USERS, index)) {
            page.push_back(user);
        }
    }
    page
}

// ── Distribution totals ──────────────────────────────────────────────────────

pub fn total_distributed(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(DISTRIBUTED, token.clone()))
        .unwrap_or(0)
}

pub fn add_distributed(env: &Env, token: &Address, amount: i128) {
    let key = (DISTRIBUTED, token.clone());
    let total = total_distributed(env, token).saturating_add(amount);
    env.storage().persistent().set(&key, &total);
    extend_persistent(env, &key);
}
