#![no_std]

pub mod access;
pub mod accumulator;
pub mod errors;
pub mod events;
mod guard;
mod payout;
pub mod pool;
pub mod position;
mod storage;
pub mod vault_port;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

pub use errors::ContractError;
pub use pool::{AssetKind, Pool, RewardStream, StreamConfig, MAX_REWARD_STREAMS};
pub use position::{RewardAmount, UserPosition};

use access::AdminCap;
use vault_port::VaultClient;

/// Furthest a scheduled start may lie in the future.
pub const MAX_START_DELAY: u64 = 30 * 24 * 60 * 60;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmContract;

#[contractimpl]
impl FarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `admin`        – address allowed to manage pools and streams.
    /// * `native_asset` – SAC address of the ledger's native asset; pools of
    ///   kind [`AssetKind::Native`] must stake it.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_asset: Address,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        access::set_admin(&env, &admin);
        storage::set_native_asset(&env, &native_asset);
        storage::set_initialized(&env);
        storage::extend_instance(&env);

        events::publish_initialized(&env, admin, native_asset);

        Ok(())
    }

    // ── Pool administration ─────────────────────────────────────────────────

    /// Append a pool and return its id.
    ///
    /// Every existing pool is accrued first so time already elapsed is
    /// credited at the weight shares that were in force.
    pub fn create_pool(
        env: Env,
        caller: Address,
        asset: Address,
        kind: AssetKind,
        allocation_weight: u64,
        vault: Address,
        streams: Vec<StreamConfig>,
    ) -> Result<u32, ContractError> {
        storage::require_initialized(&env)?;
        let cap = access::authorize(&env, &caller)?;
        let farm = env.current_contract_address();

        if asset == farm || vault == farm {
            return Err(ContractError::InvalidAddress);
        }
        let is_native = asset == storage::native_asset(&env)?;
        if is_native != (kind == AssetKind::Native) {
            return Err(ContractError::NativeAssetMismatch);
        }
        if pool::pool_for_asset(&env, &asset).is_some() {
            return Err(ContractError::DuplicatePoolAsset);
        }
        if streams.len() > MAX_REWARD_STREAMS {
            return Err(ContractError::TooManyRewardStreams);
        }

        let mut reward_streams = Vec::new(&env);
        for config in streams.iter() {
            Self::validate_stream(&env, &config.token, config.emission_rate)?;
            if reward_streams
                .iter()
                .any(|s: RewardStream| s.token == config.token)
            {
                return Err(ContractError::DuplicateRewardToken);
            }
            reward_streams.push_back(RewardStream {
                token: config.token,
                emission_rate: config.emission_rate,
                accumulator: 0,
            });
        }

        let now = env.ledger().timestamp();
        Self::accrue_all(&env, now)?;

        let total_weight = storage::total_weight(&env)
            .checked_add(allocation_weight)
            .ok_or(ContractError::MathOverflow)?;
        let last_accrual_time = storage::start_time(&env).map_or(now, |start| start.max(now));

        for stream in reward_streams.iter() {
            storage::register_reward_token(&env, &stream.token);
        }

        let new_pool = Pool {
            asset: asset.clone(),
            kind,
            allocation_weight,
            total_staked: 0,
            last_accrual_time,
            reward_streams,
            vault: vault.clone(),
        };
        let pool_id = Self::append_pool(&env, &cap, &new_pool);
        storage::set_total_weight(&env, total_weight);
        storage::extend_instance(&env);

        events::publish_pool_created(&env, pool_id, asset, vault, allocation_weight, total_weight);

        Ok(pool_id)
    }

    /// Change a pool's share of farm-wide emission.
    pub fn set_pool_weight(
        env: Env,
        caller: Address,
        pool_id: u32,
        allocation_weight: u64,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        access::authorize(&env, &caller)?;
        pool::load(&env, pool_id)?;

        let now = env.ledger().timestamp();
        Self::accrue_all(&env, now)?;

        let mut target = pool::load(&env, pool_id)?;
        let total_weight = storage::total_weight(&env)
            .saturating_sub(target.allocation_weight)
            .checked_add(allocation_weight)
            .ok_or(ContractError::MathOverflow)?;
        target.allocation_weight = allocation_weight;

        pool::save(&env, pool_id, &target);
        storage::set_total_weight(&env, total_weight);
        storage::extend_instance(&env);

        events::publish_pool_weight_set(&env, pool_id, allocation_weight, total_weight);

        Ok(())
    }

    /// Change one stream's emission rate. The pool is accrued at the old
    /// rate first, so the change never applies retroactively.
    pub fn set_emission_rate(
        env: Env,
        caller: Address,
        pool_id: u32,
        token: Address,
        emission_rate: i128,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        access::authorize(&env, &caller)?;
        if emission_rate < 0 {
            return Err(ContractError::InvalidEmissionRate);
        }

        let now = env.ledger().timestamp();
        let mut target = pool::load(&env, pool_id)?;
        let index = target
            .stream_index(&token)
            .ok_or(ContractError::RewardStreamNotFound)?;
        target.accrue(&env, now, storage::total_weight(&env))?;

        let mut stream = target
            .reward_streams
            .get(index)
            .ok_or(ContractError::RewardStreamNotFound)?;
        stream.emission_rate = emission_rate;
        target.reward_streams.set(index, stream);
        pool::save(&env, pool_id, &target);

        events::publish_emission_rate_set(&env, pool_id, token, emission_rate);

        Ok(())
    }

    /// Start streaming `token` in a pool.
    ///
    /// The pool is accrued first and the new stream starts from a zero
    /// accumulator at that point, so it earns nothing for earlier time.
    pub fn add_reward_stream(
        env: Env,
        caller: Address,
        pool_id: u32,
        token: Address,
        emission_rate: i128,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        access::authorize(&env, &caller)?;
        Self::validate_stream(&env, &token, emission_rate)?;

        let now = env.ledger().timestamp();
        let mut target = pool::load(&env, pool_id)?;
        if target.stream_index(&token).is_some() {
            return Err(ContractError::DuplicateRewardToken);
        }
        if target.reward_streams.len() >= MAX_REWARD_STREAMS {
            return Err(ContractError::TooManyRewardStreams);
        }
        target.accrue(&env, now, storage::total_weight(&env))?;

        target.reward_streams.push_back(RewardStream {
            token: token.clone(),
            emission_rate,
            accumulator: 0,
        });
        pool::save(&env, pool_id, &target);
        storage::register_reward_token(&env, &token);
        storage::extend_instance(&env);

        events::publish_reward_stream_added(&env, pool_id, token, emission_rate);

        Ok(())
    }

    /// Settle `token` for every member of the pool, then delete the stream.
    ///
    /// Each member is paid what the stream owes them (best effort, capped by
    /// the farm's balance like any harvest) and their debt entry for the
    /// token is dropped, so a later stream for the same token starts clean.
    /// Returns the total amount paid out.
    pub fn remove_reward_stream(
        env: Env,
        caller: Address,
        pool_id: u32,
        token: Address,
    ) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        access::authorize(&env, &caller)?;

        let now = env.ledger().timestamp();
        let mut target = pool::load(&env, pool_id)?;
        let index = target
            .stream_index(&token)
            .ok_or(ContractError::RewardStreamNotFound)?;
        target.accrue(&env, now, storage::total_weight(&env))?;
        let stream = target
            .reward_streams
            .get(index)
            .ok_or(ContractError::RewardStreamNotFound)?;

        let mut settled: i128 = 0;
        for slot in 0..position::member_count(&env, pool_id) {
            let Some(member) = position::member_at(&env, pool_id, slot) else {
                continue;
            };
            let mut holder = position::load(&env, pool_id, &member);
            let owed = accumulator::pending(
                &env,
                holder.amount,
                stream.accumulator,
                holder.debt_of(&token),
            )?;
            let paid = payout::pay_reward(&env, pool_id, &token, &member, owed);
            settled = settled.saturating_add(paid);
            holder.debt.remove(token.clone());
            position::save(&env, pool_id, &member, &holder);
        }

        target.swap_remove_stream(index);
        pool::save(&env, pool_id, &target);
        storage::release_reward_token(&env, &token);
        storage::extend_instance(&env);

        events::publish_reward_stream_removed(&env, pool_id, token, settled);

        Ok(settled)
    }

    /// Move a pool's custody to `new_vault`.
    ///
    /// The old vault's full balance is released to the farm and deposited
    /// into the new vault. Returns what the new vault credited, which may be
    /// less than what the old one released.
    pub fn set_pool_vault(
        env: Env,
        caller: Address,
        pool_id: u32,
        new_vault: Address,
    ) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        access::authorize(&env, &caller)?;

        let farm = env.current_contract_address();
        let mut target = pool::load(&env, pool_id)?;
        if new_vault == farm || new_vault == target.vault {
            return Err(ContractError::InvalidAddress);
        }

        let old_vault = VaultClient::new(&env, &target.vault);
        let held = old_vault.balance();
        let migrated = if held > 0 {
            old_vault.withdraw(&farm, &held)
        } else {
            0
        };
        let credited = if migrated > 0 {
            token::Client::new(&env, &target.asset).transfer(&farm, &new_vault, &migrated);
            VaultClient::new(&env, &new_vault).deposit(&farm, &migrated)
        } else {
            0
        };

        let old = target.vault.clone();
        target.vault = new_vault.clone();
        pool::save(&env, pool_id, &target);

        events::publish_vault_replaced(&env, pool_id, old, new_vault, migrated, credited);

        Ok(credited)
    }

    // ── Farm lifecycle ──────────────────────────────────────────────────────

    /// Schedule the start of farming. Settable once, strictly in the future
    /// and at most `MAX_START_DELAY` seconds ahead.
    pub fn set_start_time(env: Env, caller: Address, start_time: u64) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        access::authorize(&env, &caller)?;
        if storage::start_time(&env).is_some() {
            return Err(ContractError::StartAlreadySet);
        }

        let now = env.ledger().timestamp();
        if start_time <= now || start_time - now > MAX_START_DELAY {
            return Err(ContractError::InvalidStartTime);
        }

        Self::begin(&env, start_time);
        Ok(())
    }

    /// Start farming immediately, unless a start time was already set.
    pub fn start_now(env: Env, caller: Address) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        access::authorize(&env, &caller)?;
        if storage::start_time(&env).is_some() {
            return Err(ContractError::StartAlreadySet);
        }

        Self::begin(&env, env.ledger().timestamp());
        Ok(())
    }

    // ── User transactions ───────────────────────────────────────────────────

    /// Stake into a pool and return the amount credited.
    ///
    /// Pending rewards on an existing position are paid out first. Token
    /// pools credit what the vault actually received; native pools credit
    /// `attached_native`, which must equal `amount`.
    pub fn deposit(
        env: Env,
        pool_id: u32,
        user: Address,
        amount: i128,
        attached_native: i128,
    ) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        Self::validate_user(&env, &user)?;
        user.require_auth();
        let now = env.ledger().timestamp();
        storage::require_active(&env, now)?;
        if amount < 0 || attached_native < 0 {
            return Err(ContractError::InvalidAmount);
        }

        guard::enter(&env, &user)?;

        let mut target = pool::load(&env, pool_id)?;
        target.accrue(&env, now, storage::total_weight(&env))?;

        let mut holder = position::load(&env, pool_id, &user);
        if holder.amount > 0 {
            Self::settle(&env, pool_id, &target, &mut holder, &user)?;
        }

        let credited = match target.kind {
            AssetKind::Native => {
                if amount != attached_native {
                    return Err(ContractError::InvalidAmount);
                }
                Self::forward_to_vault(&env, &target, &user, attached_native);
                attached_native
            }
            AssetKind::Token => {
                if attached_native != 0 {
                    return Err(ContractError::NativeNotAccepted);
                }
                Self::forward_to_vault(&env, &target, &user, amount)
            }
        };

        holder.increase(credited)?;
        target.increase_stake(credited)?;
        holder.resync_debt(&env, &target)?;

        pool::save(&env, pool_id, &target);
        position::save(&env, pool_id, &user, &holder);
        position::add_member(&env, pool_id, &user);
        storage::track_user(&env, &user);
        storage::extend_instance(&env);

        guard::exit(&env, &user);

        events::publish_deposited(&env, pool_id, user, amount, credited, target.total_staked);

        Ok(credited)
    }

    /// Unstake `amount` from a pool after paying all pending rewards.
    /// Returns what the vault released.
    pub fn withdraw(
        env: Env,
        pool_id: u32,
        user: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();
        let now = env.ledger().timestamp();
        storage::require_active(&env, now)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        guard::enter(&env, &user)?;

        let mut target = pool::load(&env, pool_id)?;
        let mut holder = position::load(&env, pool_id, &user);
        if amount > holder.amount {
            return Err(ContractError::InsufficientStake);
        }

        target.accrue(&env, now, storage::total_weight(&env))?;
        Self::settle(&env, pool_id, &target, &mut holder, &user)?;

        holder.decrease(amount)?;
        target.decrease_stake(amount)?;
        holder.resync_debt(&env, &target)?;

        pool::save(&env, pool_id, &target);
        if position::is_member(&env, pool_id, &user) {
            position::save(&env, pool_id, &user, &holder);
        }

        let released = if amount > 0 {
            VaultClient::new(&env, &target.vault).withdraw(&user, &amount)
        } else {
            0
        };

        guard::exit(&env, &user);

        events::publish_withdrawn(&env, pool_id, user, amount, released, target.total_staked);

        Ok(released)
    }

    /// Pay every pending reward of `user` in one pool.
    pub fn harvest(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<Vec<RewardAmount>, ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();
        let now = env.ledger().timestamp();
        storage::require_active(&env, now)?;

        guard::enter(&env, &user)?;
        let paid = Self::harvest_pool(&env, now, pool_id, &user)?;
        guard::exit(&env, &user);

        Ok(paid)
    }

    /// Harvest every pool `user` has ever staked in. Paid amounts are
    /// summed per token.
    pub fn harvest_all(env: Env, user: Address) -> Result<Vec<RewardAmount>, ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();
        let now = env.ledger().timestamp();
        storage::require_active(&env, now)?;

        guard::enter(&env, &user)?;

        let mut totals: Vec<RewardAmount> = Vec::new(&env);
        for pool_id in 0..pool::pool_count(&env) {
            if !position::is_member(&env, pool_id, &user) {
                continue;
            }
            for paid in Self::harvest_pool(&env, now, pool_id, &user)?.iter() {
                match totals.iter().position(|t| t.token == paid.token) {
                    Some(i) => {
                        let mut entry = totals.get(i as u32).ok_or(ContractError::MathOverflow)?;
                        entry.amount = entry.amount.saturating_add(paid.amount);
                        totals.set(i as u32, entry);
                    }
                    None => totals.push_back(paid),
                }
            }
        }

        guard::exit(&env, &user);

        Ok(totals)
    }

    /// Leave a pool immediately, forfeiting pending rewards.
    pub fn emergency_withdraw(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<i128, ContractError> {
        storage::require_initialized(&env)?;
        user.require_auth();
        let now = env.ledger().timestamp();

        guard::enter(&env, &user)?;

        let mut target = pool::load(&env, pool_id)?;
        target.accrue(&env, now, storage::total_weight(&env))?;

        let mut holder = position::load(&env, pool_id, &user);
        let amount = holder.amount;
        holder.decrease(amount)?;
        target.decrease_stake(amount)?;
        holder.resync_debt(&env, &target)?;

        pool::save(&env, pool_id, &target);
        if position::is_member(&env, pool_id, &user) {
            position::save(&env, pool_id, &user, &holder);
        }

        let released = if amount > 0 {
            VaultClient::new(&env, &target.vault).withdraw(&user, &amount)
        } else {
            0
        };

        guard::exit(&env, &user);

        events::publish_emergency_withdrawn(&env, pool_id, user, amount, released);

        Ok(released)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_position(env: Env, pool_id: u32, user: Address) -> UserPosition {
        position::load(&env, pool_id, &user)
    }

    /// Pending reward per stream as of the current ledger time, without
    /// mutating state. Equals what `harvest` would pay in the same instant
    /// when the farm is fully funded.
    pub fn pending_rewards(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<Vec<RewardAmount>, ContractError> {
        let projected = Self::current_pool(env.clone(), pool_id)?;
        position::load(&env, pool_id, &user).pending(&env, &projected)
    }

    pub fn pending_reward(
        env: Env,
        pool_id: u32,
        user: Address,
        token: Address,
    ) -> Result<i128, ContractError> {
        let projected = Self::current_pool(env.clone(), pool_id)?;
        let stream = projected
            .stream(&token)
            .ok_or(ContractError::RewardStreamNotFound)?;
        let holder = position::load(&env, pool_id, &user);
        accumulator::pending(&env, holder.amount, stream.accumulator, holder.debt_of(&token))
    }

    /// The pool as last written.
    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    /// The pool with accumulators projected to the current ledger time.
    pub fn current_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        let stored = pool::load(&env, pool_id)?;
        stored.projected(&env, env.ledger().timestamp(), storage::total_weight(&env))
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::pool_count(&env)
    }

    pub fn total_allocation_weight(env: Env) -> u64 {
        storage::total_weight(&env)
    }

    /// Value held by a pool's vault, strategy funds included.
    pub fn pool_tvl(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        let target = pool::load(&env, pool_id)?;
        Ok(VaultClient::new(&env, &target.vault).balance())
    }

    pub fn total_tvl(env: Env) -> Result<i128, ContractError> {
        let mut total: i128 = 0;
        for pool_id in 0..pool::pool_count(&env) {
            total = total
                .checked_add(Self::pool_tvl(env.clone(), pool_id)?)
                .ok_or(ContractError::MathOverflow)?;
        }
        Ok(total)
    }

    /// Reward actually paid out for `token` since deployment.
    pub fn total_distributed(env: Env, token: Address) -> i128 {
        storage::total_distributed(&env, &token)
    }

    /// Addresses that ever deposited into the pool, `limit` at a time
    /// (capped at 100) from `start`, in joining order.
    pub fn pool_members(env: Env, pool_id: u32, start: u32, limit: u32) -> Vec<Address> {
        position::members(&env, pool_id, start, limit)
    }

    pub fn pool_member_count(env: Env, pool_id: u32) -> u32 {
        position::member_count(&env, pool_id)
    }

    /// Every address that ever deposited anywhere, paged like `pool_members`.
    pub fn users(env: Env, start: u32, limit: u32) -> Vec<Address> {
        storage::users(&env, start, limit)
    }

    pub fn user_count(env: Env) -> u32 {
        storage::user_count(&env)
    }

    pub fn reward_tokens(env: Env) -> Vec<Address> {
        storage::reward_tokens(&env)
    }

    pub fn is_reward_token(env: Env, token: Address) -> bool {
        storage::is_reward_token(&env, &token)
    }

    pub fn start_time(env: Env) -> Option<u64> {
        storage::start_time(&env)
    }

    pub fn is_active(env: Env) -> bool {
        storage::is_active(&env, env.ledger().timestamp())
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        access::admin(&env)
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        access::pending_admin(&env)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin; the transfer completes when they call
    /// `accept_admin`.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        let cap = access::authorize(&env, &current_admin)?;
        access::propose(&env, &cap, &new_admin);
        storage::extend_instance(&env);

        events::publish_admin_transfer_proposed(&env, cap.admin().clone(), new_admin);

        Ok(())
    }

    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        let old_admin = access::accept(&env, &new_admin)?;
        storage::extend_instance(&env);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        storage::require_initialized(&env)?;
        let cap = access::authorize(&env, &current_admin)?;
        let cancelled = access::cancel(&env, &cap)?;
        storage::extend_instance(&env);

        events::publish_admin_transfer_cancelled(&env, current_admin, cancelled);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn validate_user(env: &Env, user: &Address) -> Result<(), ContractError> {
        if *user == env.current_contract_address() {
            return Err(ContractError::InvalidAddress);
        }
        Ok(())
    }

    fn validate_stream(
        env: &Env,
        token: &Address,
        emission_rate: i128,
    ) -> Result<(), ContractError> {
        if *token == env.current_contract_address() {
            return Err(ContractError::InvalidRewardToken);
        }
        if emission_rate < 0 {
            return Err(ContractError::InvalidEmissionRate);
        }
        Ok(())
    }

    fn append_pool(env: &Env, _cap: &AdminCap, new_pool: &Pool) -> u32 {
        pool::append(env, new_pool)
    }

    /// Accrue every pool to `now`.
    fn accrue_all(env: &Env, now: u64) -> Result<(), ContractError> {
        let total_weight = storage::total_weight(env);
        for pool_id in 0..pool::pool_count(env) {
            let mut p = pool::load(env, pool_id)?;
            p.accrue(env, now, total_weight)?;
            pool::save(env, pool_id, &p);
        }
        Ok(())
    }

    /// Fix the start time and align every pool's accrual clock to it.
    fn begin(env: &Env, start_time: u64) {
        storage::set_start_time(env, start_time);
        for pool_id in 0..pool::pool_count(env) {
            if let Ok(mut p) = pool::load(env, pool_id) {
                p.last_accrual_time = start_time;
                pool::save(env, pool_id, &p);
            }
        }
        storage::extend_instance(env);

        events::publish_start_time_set(env, start_time);
    }

    /// Pay everything `holder` is owed by `target`'s streams and move each
    /// debt snapshot up to the current accumulator. Returns what was paid.
    fn settle(
        env: &Env,
        pool_id: u32,
        target: &Pool,
        holder: &mut UserPosition,
        user: &Address,
    ) -> Result<Vec<RewardAmount>, ContractError> {
        let mut paid_out = Vec::new(env);
        for stream in target.reward_streams.iter() {
            let owed = accumulator::pending(
                env,
                holder.amount,
                stream.accumulator,
                holder.debt_of(&stream.token),
            )?;
            let paid = payout::pay_reward(env, pool_id, &stream.token, user, owed);
            holder.debt.set(
                stream.token.clone(),
                accumulator::debt_snapshot(env, holder.amount, stream.accumulator)?,
            );
            paid_out.push_back(RewardAmount {
                token: stream.token,
                amount: paid,
            });
        }
        Ok(paid_out)
    }

    fn harvest_pool(
        env: &Env,
        now: u64,
        pool_id: u32,
        user: &Address,
    ) -> Result<Vec<RewardAmount>, ContractError> {
        let mut target = pool::load(env, pool_id)?;
        target.accrue(env, now, storage::total_weight(env))?;

        let mut holder = position::load(env, pool_id, user);
        let paid = Self::settle(env, pool_id, &target, &mut holder, user)?;

        pool::save(env, pool_id, &target);
        if position::is_member(env, pool_id, user) {
            position::save(env, pool_id, user, &holder);
        }
        Ok(paid)
    }

    /// Move `amount` of the pool asset from `user` into the pool's vault and
    /// return what the vault credited.
    fn forward_to_vault(env: &Env, target: &Pool, user: &Address, amount: i128) -> i128 {
        if amount == 0 {
            return 0;
        }
        token::Client::new(env, &target.asset).transfer(user, &target.vault, &amount);
        VaultClient::new(env, &target.vault).deposit(user, &amount)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_streams;
