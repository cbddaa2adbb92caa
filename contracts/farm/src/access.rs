use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");

/// Proof that the current invocation was authorised by the farm admin.
///
/// Only [`authorize`] constructs it, so admin-only helpers that take an
/// `&AdminCap` cannot be reached from an unchecked path.
pub struct AdminCap {
    admin: Address,
}

impl AdminCap {
    pub fn admin(&self) -> &Address {
        &self.admin
    }
}

/// Require `caller`'s signature and check it against the stored admin.
pub fn authorize(env: &Env, caller: &Address) -> Result<AdminCap, ContractError> {
    caller.require_auth();
    let admin = admin(env)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(AdminCap { admin })
}

pub fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

// ── Two-step transfer ────────────────────────────────────────────────────────

pub fn pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn propose(env: &Env, _cap: &AdminCap, new_admin: &Address) {
    env.storage().instance().set(&PENDING_ADMIN, new_admin);
}

/// Complete a proposed transfer; returns the outgoing admin.
pub fn accept(env: &Env, new_admin: &Address) -> Result<Address, ContractError> {
    new_admin.require_auth();
    let pending = pending_admin(env).ok_or(ContractError::NoPendingAdmin)?;
    if *new_admin != pending {
        return Err(ContractError::Unauthorized);
    }
    let old_admin = admin(env)?;
    set_admin(env, new_admin);
    env.storage().instance().remove(&PENDING_ADMIN);
    Ok(old_admin)
}

/// Drop a proposed transfer; returns the address that was proposed.
pub fn cancel(env: &Env, _cap: &AdminCap) -> Result<Address, ContractError> {
    let pending = pending_admin(env).ok_or(ContractError::NoPendingAdmin)?;
    env.storage().instance().remove(&PENDING_ADMIN);
    Ok(pending)
}
