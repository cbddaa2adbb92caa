use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const LOCK: Symbol = symbol_short!("LOCK");

/// Mark a user transaction as in flight for `user`.
///
/// A second deposit/withdraw/harvest for the same user before [`exit`] fails
/// with `Reentrant`. An aborted transaction rolls the flag back with the rest
/// of its writes.
pub fn enter(env: &Env, user: &Address) -> Result<(), ContractError> {
    let key = (LOCK, user.clone());
    if env.storage().temporary().has(&key) {
        return Err(ContractError::Reentrant);
    }
    env.storage().temporary().set(&key, &true);
    Ok(())
}

pub fn exit(env: &Env, user: &Address) {
    env.storage().temporary().remove(&(LOCK, user.clone()));
}
