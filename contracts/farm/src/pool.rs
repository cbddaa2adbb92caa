use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{accumulator, errors::ContractError, storage};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const ASSET_POOL: Symbol = symbol_short!("ASSET_PL");

/// Upper bound on streams per pool; every settlement loops over them.
pub const MAX_REWARD_STREAMS: u32 = 8;

// ── Types ────────────────────────────────────────────────────────────────────

/// How a pool's staked asset enters custody, fixed at pool creation.
///
/// - `Native` – the ledger's native asset; the attached native amount is
///   credited as-is.
/// - `Token`  – any other token contract; the vault's observed balance delta
///   is credited, so transfer-taxed tokens are credited what actually arrived.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AssetKind {
    Native = 0,
    Token = 1,
}

/// Emission configuration supplied when creating a pool or adding a stream.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamConfig {
    pub token: Address,
    pub emission_rate: i128,
}

/// One reward token's emission and running accumulator within a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardStream {
    pub token: Address,
    /// Reward units per second before the pool's weight share is applied.
    pub emission_rate: i128,
    /// Cumulative reward per staked unit, scaled by `accumulator::SCALE`.
    pub accumulator: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub asset: Address,
    pub kind: AssetKind,
    pub allocation_weight: u64,
    pub total_staked: i128,
    pub last_accrual_time: u64,
    pub reward_streams: Vec<RewardStream>,
    pub vault: Address,
}

impl Pool {
    /// Bring every stream's accumulator up to `now`.
    ///
    /// Time during which nothing is staked is skipped rather than banked.
    /// Repeating the call with the same `now` changes nothing.
    pub fn accrue(&mut self, env: &Env, now: u64, total_weight: u64) -> Result<(), ContractError> {
        if now <= self.last_accrual_time {
            return Ok(());
        }
        if self.total_staked == 0 {
            self.last_accrual_time = now;
            return Ok(());
        }

        let elapsed = now - self.last_accrual_time;
        let mut streams = Vec::new(env);
        for mut stream in self.reward_streams.iter() {
            let reward = accumulator::stream_reward(
                env,
                elapsed,
                stream.emission_rate,
                self.allocation_weight,
                total_weight,
            )?;
            let delta = accumulator::accumulator_delta(env, reward, self.total_staked)?;
            stream.accumulator = stream
                .accumulator
                .checked_add(delta)
                .ok_or(ContractError::MathOverflow)?;
            streams.push_back(stream);
        }
        self.reward_streams = streams;
        self.last_accrual_time = now;
        Ok(())
    }

    /// Copy of the pool accrued to `now`, leaving `self` untouched.
    pub fn projected(&self, env: &Env, now: u64, total_weight: u64) -> Result<Pool, ContractError> {
        let mut pool = self.clone();
        pool.accrue(env, now, total_weight)?;
        Ok(pool)
    }

    pub fn stream_index(&self, token: &Address) -> Option<u32> {
        self.reward_streams
            .iter()
            .position(|s| s.token == *token)
            .map(|i| i as u32)
    }

    pub fn stream(&self, token: &Address) -> Option<RewardStream> {
        self.stream_index(token)
            .and_then(|i| self.reward_streams.get(i))
    }

    /// Delete a stream by moving the last one into its slot.
    pub fn swap_remove_stream(&mut self, index: u32) -> Option<RewardStream> {
        let removed = self.reward_streams.get(index)?;
        let last = self.reward_streams.len() - 1;
        if index != last {
            let tail = self.reward_streams.get(last)?;
            self.reward_streams.set(index, tail);
        }
        self.reward_streams.pop_back();
        Some(removed)
    }

    pub fn increase_stake(&mut self, amount: i128) -> Result<(), ContractError> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        Ok(())
    }

    pub fn decrease_stake(&mut self, amount: i128) -> Result<(), ContractError> {
        if amount > self.total_staked {
            return Err(ContractError::InsufficientStake);
        }
        self.total_staked -= amount;
        Ok(())
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn load(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    let key = pool_key(pool_id);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    storage::extend_persistent(env, &key);
    Ok(pool)
}

pub fn save(env: &Env, pool_id: u32, pool: &Pool) {
    let key = pool_key(pool_id);
    env.storage().persistent().set(&key, pool);
    storage::extend_persistent(env, &key);
}

/// Append a pool; its id is its position in the list.
pub fn append(env: &Env, pool: &Pool) -> u32 {
    let pool_id = pool_count(env);
    save(env, pool_id, pool);
    let asset_key = (ASSET_POOL, pool.asset.clone());
    env.storage().persistent().set(&asset_key, &pool_id);
    storage::extend_persistent(env, &asset_key);
    env.storage().instance().set(&POOL_COUNT, &(pool_id + 1));
    pool_id
}

pub fn pool_for_asset(env: &Env, asset: &Address) -> Option<u32> {
    env.storage().persistent().get(&(ASSET_POOL, asset.clone()))
}
