use soroban_sdk::{token, Address, Env};

use crate::{events, storage};

/// Best-effort transfer of `amount` of `token` from the farm to `to`.
///
/// Pays at most the farm's own balance and returns what was actually sent.
/// The unpaid remainder is forgiven: it is published as a shortfall event
/// but is not carried forward as debt.
pub fn safe_transfer(env: &Env, token: &Address, to: &Address, amount: i128) -> i128 {
    if amount <= 0 {
        return 0;
    }
    let farm = env.current_contract_address();
    let client = token::Client::new(env, token);
    let paid = amount.min(client.balance(&farm).max(0));
    if paid > 0 {
        client.transfer(&farm, to, &paid);
    }
    if paid < amount {
        events::publish_payout_shortfall(env, token.clone(), to.clone(), amount, paid);
    }
    paid
}

/// Pay a settled reward and count what left the farm towards the
/// per-token distribution total.
pub fn pay_reward(env: &Env, pool_id: u32, token: &Address, to: &Address, owed: i128) -> i128 {
    let paid = safe_transfer(env, token, to, owed);
    if paid > 0 {
        storage::add_distributed(env, token, paid);
        events::publish_reward_paid(env, pool_id, to.clone(), token.clone(), paid);
    }
    paid
}
