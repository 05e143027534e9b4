//! Typed storage helpers for the pool token.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type      | Description                             |
//! |----------------|-----------|-----------------------------------------|
//! | `Manager`      | `Address` | Pool directory queried for deposits     |
//! | `PoolId`       | `u64`     | Pool this token rewards                 |
//! | `Name`         | `String`  | Token name                              |
//! | `Symbol`       | `String`  | Token symbol                            |
//! | `TotalSupply`  | `i128`    | Current supply (only `burn` lowers it)  |
//! | `DepositTotal` | `i128`    | Frozen follower-deposit denominator     |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                         | Type           | Description           |
//! |-----------------------------|----------------|-----------------------|
//! | `Balance(owner)`            | `i128`         | Token balance         |
//! | `Allowance(owner, spender)` | `i128`         | Spending allowance    |
//! | `Claimed(follower)`         | `bool`         | One-shot claim flag   |
//! | `Holders`                   | `Vec<Address>` | Followers who claimed |

use soroban_sdk::{contracttype, Address, Env, String, Vec};

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Manager,
    PoolId,
    Name,
    Symbol,
    TotalSupply,
    DepositTotal,
    Balance(Address),
    Allowance(Address, Address),
    Claimed(Address),
    Holders,
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

pub fn is_minted(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::TotalSupply)
}

pub fn set_manager(env: &Env, manager: &Address) {
    env.storage().instance().set(&DataKey::Manager, manager);
    bump_instance(env);
}

pub fn manager(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Manager)
}

pub fn set_pool_id(env: &Env, pool_id: u64) {
    env.storage().instance().set(&DataKey::PoolId, &pool_id);
    bump_instance(env);
}

pub fn pool_id(env: &Env) -> u64 {
    bump_instance(env);
    env.storage().instance().get(&DataKey::PoolId).unwrap_or(0)
}

pub fn set_name(env: &Env, name: &String) {
    env.storage().instance().set(&DataKey::Name, name);
    bump_instance(env);
}

pub fn name(env: &Env) -> Option<String> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Name)
}

pub fn set_symbol(env: &Env, symbol: &String) {
    env.storage().instance().set(&DataKey::Symbol, symbol);
    bump_instance(env);
}

pub fn symbol(env: &Env) -> Option<String> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Symbol)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    bump_instance(env);
}

pub fn total_supply(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_deposit_total(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::DepositTotal, &total);
    bump_instance(env);
}

pub fn deposit_total(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::DepositTotal)
        .unwrap_or(0)
}

// ── Persistent entries ───────────────────────────────────────────────

pub fn balance(env: &Env, owner: &Address) -> i128 {
    let key = DataKey::Balance(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, owner: &Address, amount: i128) {
    let key = DataKey::Balance(owner.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn has_claimed(env: &Env, follower: &Address) -> bool {
    let key = DataKey::Claimed(follower.clone());
    match env.storage().persistent().get(&key) {
        Some(claimed) => {
            bump_persistent(env, &key);
            claimed
        }
        None => false,
    }
}

pub fn set_claimed(env: &Env, follower: &Address) {
    let key = DataKey::Claimed(follower.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

pub fn holders(env: &Env) -> Vec<Address> {
    let key = DataKey::Holders;
    match env.storage().persistent().get(&key) {
        Some(holders) => {
            bump_persistent(env, &key);
            holders
        }
        None => Vec::new(env),
    }
}

pub fn save_holders(env: &Env, holders: &Vec<Address>) {
    let key = DataKey::Holders;
    env.storage().persistent().set(&key, holders);
    bump_persistent(env, &key);
}
