use soroban_sdk::{Env, I256};

use crate::errors::ContractError;

/// Fixed-point scale of every reward-per-staked-unit accumulator.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

// ── Core reward engine ──────────────────────────────────────────────────────

/// `a × b / denominator`, truncating toward zero.
///
/// The product is formed in `i128` when it fits and in the host's 256-bit
/// integer otherwise, so only a quotient that cannot be represented in `i128`
/// is reported as [`ContractError::MathOverflow`].
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, ContractError> {
    if denominator <= 0 {
        return Err(ContractError::MathOverflow);
    }
    match a.checked_mul(b) {
        Some(product) => Ok(product / denominator),
        None => I256::from_i128(env, a)
            .mul(&I256::from_i128(env, b))
            .div(&I256::from_i128(env, denominator))
            .to_i128()
            .ok_or(ContractError::MathOverflow),
    }
}

/// `a × b / denominator`, rounding a positive remainder up.
pub fn mul_div_ceil(
    env: &Env,
    a: i128,
    b: i128,
    denominator: i128,
) -> Result<i128, ContractError> {
    if denominator <= 0 {
        return Err(ContractError::MathOverflow);
    }
    match a.checked_mul(b) {
        Some(product) => {
            let quotient = product / denominator;
            if product % denominator > 0 {
                quotient.checked_add(1).ok_or(ContractError::MathOverflow)
            } else {
                Ok(quotient)
            }
        }
        None => {
            let denominator = I256::from_i128(env, denominator);
            let product = I256::from_i128(env, a).mul(&I256::from_i128(env, b));
            let mut quotient = product.div(&denominator);
            if quotient.mul(&denominator) < product {
                quotient = quotient.add(&I256::from_i128(env, 1));
            }
            quotient.to_i128().ok_or(ContractError::MathOverflow)
        }
    }
}

/// Reward emitted to one pool by one stream over `elapsed` seconds.
///
/// ```text
/// reward = elapsed × emission_rate × allocation_weight / total_allocation_weight
/// ```
///
/// A farm with no allocation weight emits nothing.
pub fn stream_reward(
    env: &Env,
    elapsed: u64,
    emission_rate: i128,
    allocation_weight: u64,
    total_allocation_weight: u64,
) -> Result<i128, ContractError> {
    if total_allocation_weight == 0 || elapsed == 0 || emission_rate == 0 {
        return Ok(0);
    }
    let gross = i128::from(elapsed)
        .checked_mul(emission_rate)
        .ok_or(ContractError::MathOverflow)?;
    mul_div(
        env,
        gross,
        i128::from(allocation_weight),
        i128::from(total_allocation_weight),
    )
}

/// Increase of the scaled accumulator when `reward` is spread over
/// `total_staked` units. Zero stake spreads nothing.
pub fn accumulator_delta(
    env: &Env,
    reward: i128,
    total_staked: i128,
) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Ok(0);
    }
    mul_div(env, reward, SCALE, total_staked)
}

/// Rewards a position of `amount` has accrued at accumulator `acc`,
/// rounded down.
pub fn accrued(env: &Env, amount: i128, acc: i128) -> Result<i128, ContractError> {
    mul_div(env, amount, acc, SCALE)
}

/// Debt snapshot stored after every settlement: `amount × acc / SCALE`
/// rounded up.
///
/// With the snapshot rounded up and [`accrued`] rounded down, a later
/// `pending` never exceeds `amount × (acc₂ − acc₁) / SCALE`, so positions
/// whose amount changes cannot collect more than the pool emitted.
pub fn debt_snapshot(env: &Env, amount: i128, acc: i128) -> Result<i128, ContractError> {
    mul_div_ceil(env, amount, acc, SCALE)
}

/// Unclaimed reward of a position, clamped at zero.
///
/// ```text
/// pending = amount × acc / SCALE − debt
/// ```
pub fn pending(env: &Env, amount: i128, acc: i128, debt: i128) -> Result<i128, ContractError> {
    let owed = accrued(env, amount, acc)?;
    Ok(owed.saturating_sub(debt).max(0))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
