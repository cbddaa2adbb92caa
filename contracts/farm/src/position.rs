use soroban_sdk::{contracttype, symbol_short, Address, Env, Map, Symbol, Vec};

use crate::{accumulator, errors::ContractError, pool::Pool, storage};

const POSITION: Symbol = symbol_short!("POS");
const MEMBER: Symbol = symbol_short!("MEMBER");
const MEMBERS: Symbol = symbol_short!("MEMBERS");
const MEMBER_COUNT: Symbol = symbol_short!("MEM_CNT");

/// A user's stake in one pool.
///
/// `debt[token]` is the part of `amount × accumulator / SCALE` already
/// accounted for, rounded up so the difference never overstates what is
/// still owed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub amount: i128,
    pub debt: Map<Address, i128>,
}

/// Reward token paired with an amount (pending, paid or settled).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAmount {
    pub token: Address,
    pub amount: i128,
}

impl UserPosition {
    pub fn new(env: &Env) -> Self {
        Self {
            amount: 0,
            debt: Map::new(env),
        }
    }

    pub fn debt_of(&self, token: &Address) -> i128 {
        self.debt.get(token.clone()).unwrap_or(0)
    }

    /// Pending reward for every stream in `pool`, in stream order.
    pub fn pending(&self, env: &Env, pool: &Pool) -> Result<Vec<RewardAmount>, ContractError> {
        let mut out = Vec::new(env);
        for stream in pool.reward_streams.iter() {
            let amount = accumulator::pending(
                env,
                self.amount,
                stream.accumulator,
                self.debt_of(&stream.token),
            )?;
            out.push_back(RewardAmount {
                token: stream.token,
                amount,
            });
        }
        Ok(out)
    }

    /// Snapshot debt for every stream against the current amount.
    pub fn resync_debt(&mut self, env: &Env, pool: &Pool) -> Result<(), ContractError> {
        for stream in pool.reward_streams.iter() {
            let snapshot = accumulator::debt_snapshot(env, self.amount, stream.accumulator)?;
            self.debt.set(stream.token, snapshot);
        }
        Ok(())
    }

    pub fn increase(&mut self, amount: i128) -> Result<(), ContractError> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        Ok(())
    }

    pub fn decrease(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount > self.amount {
            return Err(ContractError::InsufficientStake);
        }
        self.amount -= amount;
        Ok(())
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn position_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, user.clone())
}

/// Positions are created lazily; an unknown user reads as an empty one.
pub fn load(env: &Env, pool_id: u32, user: &Address) -> UserPosition {
    env.storage()
        .persistent()
        .get(&position_key(pool_id, user))
        .unwrap_or_else(|| UserPosition::new(env))
}

pub fn save(env: &Env, pool_id: u32, user: &Address, position: &UserPosition) {
    let key = position_key(pool_id, user);
    env.storage().persistent().set(&key, position);
    storage::extend_persistent(env, &key);
}

// ── Pool membership ──────────────────────────────────────────────────────────

pub fn is_member(env: &Env, pool_id: u32, user: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&(MEMBER, pool_id, user.clone()))
}

/// Add `user` to the pool's membership set; repeated calls are no-ops.
///
/// Members are stored one per `(MEMBERS, pool_id, index)` entry so the set
/// can grow without rewriting a single ever-larger ledger entry.
pub fn add_member(env: &Env, pool_id: u32, user: &Address) {
    if is_member(env, pool_id, user) {
        return;
    }
    let flag_key = (MEMBER, pool_id, user.clone());
    env.storage().persistent().set(&flag_key, &true);
    storage::extend_persistent(env, &flag_key);

    let index = member_count(env, pool_id);
    let slot_key = (MEMBERS, pool_id, index);
    env.storage().persistent().set(&slot_key, user);
    storage::extend_persistent(env, &slot_key);

    let count_key = (MEMBER_COUNT, pool_id);
    env.storage().persistent().set(&count_key, &(index + 1));
    storage::extend_persistent(env, &count_key);
}

pub fn member_count(env: &Env, pool_id: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&(MEMBER_COUNT, pool_id))
        .unwrap_or(0)
}

pub fn member_at(env: &Env, pool_id: u32, index: u32) -> Option<Address> {
    env.storage().persistent().get(&(MEMBERS, pool_id, index))
}

/// Up to `limit` members starting at `start`, in joining order.
pub fn members(env: &Env, pool_id: u32, start: u32, limit: u32) -> Vec<Address> {
    let limit = limit.min(storage::MAX_PAGE);
    let end = member_count(env, pool_id).min(start.saturating_add(limit));
    let mut page = Vec::new(env);
    for index in start..end {
        if let Some(member) = member_at(env, pool_id, index) {
            page.push_back(member);
        }
    }
    page
}
