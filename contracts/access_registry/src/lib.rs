//! # Access Registry
//!
//! Role directory for the pool protocol. Two roles exist:
//!
//! - **Governor** — a single address authorized to change structural
//!   parameters across the protocol (registries, caps, policy values).
//! - **Operator** — a set of addresses authorized to advance pool phases
//!   and manage ticket inventory.
//!
//! Every other contract in the workspace consults this one through the
//! generated client (`is_operator` / `is_governor`) at the top of its
//! gated entry points. Role mutation is Governor-gated and emits
//! `role_set` / `role_del` events for the off-chain indexer.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, Address, Env, Vec,
};

mod events;
mod storage;

#[cfg(test)]
mod test;

use events::{RoleGranted, RoleRevoked};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
}

#[contract]
pub struct AccessRegistry;

#[contractimpl]
impl AccessRegistry {
    /// Set the Governor and the initial Operator set.
    ///
    /// Must be called exactly once after deployment; subsequent calls
    /// panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, governor: Address, operators: Vec<Address>) {
        if storage::has_governor(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        governor.require_auth();
        storage::set_governor(&env, &governor);
        for operator in operators.iter() {
            storage::set_operator(&env, &operator, true);
        }
    }

    /// Grant the Operator role to `operator`. Governor-gated.
    pub fn add_operator(env: Env, governor: Address, operator: Address) {
        governor.require_auth();
        require_governor(&env, &governor);
        storage::set_operator(&env, &operator, true);
        env.events().publish(
            (symbol_short!("role_set"), operator.clone()),
            RoleGranted {
                by: governor,
                target: operator,
            },
        );
    }

    /// Revoke the Operator role from `operator`. Governor-gated.
    pub fn remove_operator(env: Env, governor: Address, operator: Address) {
        governor.require_auth();
        require_governor(&env, &governor);
        storage::set_operator(&env, &operator, false);
        env.events().publish(
            (symbol_short!("role_del"), operator.clone()),
            RoleRevoked {
                by: governor,
                target: operator,
            },
        );
    }

    /// Hand the Governor role to `new_governor`.
    ///
    /// The current Governor must authorize; it loses the role immediately.
    pub fn transfer_governor(env: Env, current: Address, new_governor: Address) {
        current.require_auth();
        require_governor(&env, &current);
        storage::set_governor(&env, &new_governor);
        env.events().publish(
            (symbol_short!("role_set"), new_governor.clone()),
            RoleGranted {
                by: current,
                target: new_governor,
            },
        );
    }

    pub fn is_operator(env: Env, address: Address) -> bool {
        storage::is_operator(&env, &address)
    }

    pub fn is_governor(env: Env, address: Address) -> bool {
        storage::governor(&env) == Some(address)
    }

    /// Return the current Governor. Panics if `init` was never called.
    pub fn governor(env: Env) -> Address {
        match storage::governor(&env) {
            Some(governor) => governor,
            None => panic_with_error!(&env, Error::NotInitialized),
        }
    }
}

fn require_governor(env: &Env, caller: &Address) {
    if storage::governor(env).as_ref() != Some(caller) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}
