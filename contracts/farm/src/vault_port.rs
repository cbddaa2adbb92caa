//! Contract boundary of the custody layer.
//!
//! The farm only ever talks to a vault through this interface; whether the
//! vault forwards funds to a yield strategy is invisible here.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    /// Credit funds already transferred to the vault on behalf of `user`.
    /// Returns the vault's observed balance delta.
    fn deposit(env: Env, user: Address, amount: i128) -> i128;

    /// Release up to `amount` to `user`; returns what was released.
    fn withdraw(env: Env, user: Address, amount: i128) -> i128;

    /// Everything held, including funds placed with a strategy.
    fn balance(env: Env) -> i128;
}
