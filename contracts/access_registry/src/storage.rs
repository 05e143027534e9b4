//! Instance-storage helpers for the role directory.
//!
//! Role data is tiny and lives for the lifetime of the contract, so every
//! key sits in instance storage and the whole instance TTL is extended
//! together (7-day bump below a 1-day threshold, as everywhere else in
//! the workspace).

use soroban_sdk::{contracttype, Address, Env};

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// The single Governor address.
    Governor,
    /// Operator flag per address.
    Operator(Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_governor(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Governor)
}

pub fn governor(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Governor)
}

pub fn set_governor(env: &Env, governor: &Address) {
    env.storage().instance().set(&DataKey::Governor, governor);
    bump_instance(env);
}

pub fn is_operator(env: &Env, address: &Address) -> bool {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Operator(address.clone()))
        .unwrap_or(false)
}

pub fn set_operator(env: &Env, address: &Address, enabled: bool) {
    if enabled {
        env.storage()
            .instance()
            .set(&DataKey::Operator(address.clone()), &true);
    } else {
        env.storage()
            .instance()
            .remove(&DataKey::Operator(address.clone()));
    }
    bump_instance(env);
}
