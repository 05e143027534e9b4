//! Typed storage helpers for the staking ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key               | Type      | Description                            |
//! |-------------------|-----------|----------------------------------------|
//! | `Registry`        | `Address` | Role directory consulted for gating    |
//! | `Token`           | `Address` | Fungible credential locked by stakers  |
//! | `Inventory`       | `Address` | Ticket inventory this ledger escrows   |
//! | `MinLockDuration` | `u64`     | Seconds a stake stays locked           |
//! | `StakePerTicket`  | `i128`    | Credential required per ticket         |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type               | Description                |
//! |----------------------|--------------------|----------------------------|
//! | `Stakes(staker, id)` | `Vec<StakeRecord>` | Append-only stake history  |

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::StakeRecord;

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Registry,
    Token,
    Inventory,
    MinLockDuration,
    StakePerTicket,
    Stakes(Address, u64),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ── Instance entries ─────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Token)
}

pub fn set_registry(env: &Env, registry: &Address) {
    env.storage().instance().set(&DataKey::Registry, registry);
    bump_instance(env);
}

pub fn registry(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Registry)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

pub fn token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Token)
}

pub fn set_inventory(env: &Env, inventory: &Address) {
    env.storage().instance().set(&DataKey::Inventory, inventory);
    bump_instance(env);
}

pub fn inventory(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Inventory)
}

pub fn set_min_lock_duration(env: &Env, seconds: u64) {
    env.storage()
        .instance()
        .set(&DataKey::MinLockDuration, &seconds);
    bump_instance(env);
}

pub fn min_lock_duration(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MinLockDuration)
        .unwrap_or(0)
}

pub fn set_stake_per_ticket(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::StakePerTicket, &amount);
    bump_instance(env);
}

pub fn stake_per_ticket(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::StakePerTicket)
        .unwrap_or(0)
}

// ── Persistent entries ───────────────────────────────────────────────

pub fn stakes(env: &Env, staker: &Address, ticket_id: u64) -> Vec<StakeRecord> {
    let key = DataKey::Stakes(staker.clone(), ticket_id);
    match env.storage().persistent().get(&key) {
        Some(records) => {
            bump_persistent(env, &key);
            records
        }
        None => Vec::new(env),
    }
}

pub fn save_stakes(env: &Env, staker: &Address, ticket_id: u64, records: &Vec<StakeRecord>) {
    let key = DataKey::Stakes(staker.clone(), ticket_id);
    env.storage().persistent().set(&key, records);
    bump_persistent(env, &key);
}
