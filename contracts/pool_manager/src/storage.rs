//! Typed storage helpers for the pool manager.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key         | Type      | Description                               |
//! |-------------|-----------|-------------------------------------------|
//! | `Registry`  | `Address` | Role directory consulted for gating       |
//! | `Config`    | `Address` | Numeric policy store                      |
//! | `Inventory` | `Address` | Ticket inventory                          |
//! | `Token`     | `Address` | Fungible credential pools are funded with |
//! | `Treasury`  | `Address` | Destination of activation fees            |
//! | `PriceFeed` | `Address` | USD price oracle                          |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                       | Type           | Description              |
//! |---------------------------|----------------|--------------------------|
//! | `Pool(id)`                | `Pool`         | Pool record              |
//! | `Subscription(id, user)`  | `Subscription` | Follower position        |
//! | `Subscribers(id)`         | `Vec<Address>` | Followers in join order  |
//! | `UsedTickets(id)`         | `u32`          | Tickets consumed in pool |
//! | `UserPools(user)`         | `Vec<u64>`     | Pools joined as follower |
//! | `ChampionPools(champion)` | `Vec<u64>`     | Pools created            |

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Pool, Subscription};

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
    Config,
    Inventory,
    Token,
    Treasury,
    PriceFeed,
    Pool(u64),
    Subscription(u64, Address),
    Subscribers(u64),
    UsedTickets(u64),
    UserPools(Address),
    ChampionPools(Address),
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

pub fn set_config(env: &Env, config: &Address) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn config(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_inventory(env: &Env, inventory: &Address) {
    env.storage().instance().set(&DataKey::Inventory, inventory);
    bump_instance(env);
}

pub fn inventory(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Inventory)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

pub fn token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Token)
}

pub fn set_treasury(env: &Env, treasury: &Address) {
    env.storage().instance().set(&DataKey::Treasury, treasury);
    bump_instance(env);
}

pub fn treasury(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Treasury)
}

pub fn set_price_feed(env: &Env, feed: &Address) {
    env.storage().instance().set(&DataKey::PriceFeed, feed);
    bump_instance(env);
}

pub fn price_feed(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::PriceFeed)
}

// ── Persistent entries ───────────────────────────────────────────────

pub fn pool(env: &Env, pool_id: u64) -> Option<Pool> {
    let key = DataKey::Pool(pool_id);
    let pool: Option<Pool> = env.storage().persistent().get(&key);
    if pool.is_some() {
        bump_persistent(env, &key);
    }
    pool
}

pub fn save_pool(env: &Env, pool_id: u64, pool: &Pool) {
    let key = DataKey::Pool(pool_id);
    env.storage().persistent().set(&key, pool);
    bump_persistent(env, &key);
}

pub fn subscription(env: &Env, pool_id: u64, user: &Address) -> Option<Subscription> {
    let key = DataKey::Subscription(pool_id, user.clone());
    let sub: Option<Subscription> = env.storage().persistent().get(&key);
    if sub.is_some() {
        bump_persistent(env, &key);
    }
    sub
}

pub fn save_subscription(env: &Env, pool_id: u64, user: &Address, sub: &Subscription) {
    let key = DataKey::Subscription(pool_id, user.clone());
    env.storage().persistent().set(&key, sub);
    bump_persistent(env, &key);
}

pub fn subscribers(env: &Env, pool_id: u64) -> Vec<Address> {
    let key = DataKey::Subscribers(pool_id);
    match env.storage().persistent().get(&key) {
        Some(list) => {
            bump_persistent(env, &key);
            list
        }
        None => Vec::new(env),
    }
}

pub fn save_subscribers(env: &Env, pool_id: u64, list: &Vec<Address>) {
    let key = DataKey::Subscribers(pool_id);
    env.storage().persistent().set(&key, list);
    bump_persistent(env, &key);
}

pub fn used_tickets(env: &Env, pool_id: u64) -> u32 {
    let key = DataKey::UsedTickets(pool_id);
    match env.storage().persistent().get(&key) {
        Some(count) => {
            bump_persistent(env, &key);
            count
        }
        None => 0,
    }
}

pub fn set_used_tickets(env: &Env, pool_id: u64, count: u32) {
    let key = DataKey::UsedTickets(pool_id);
    env.storage().persistent().set(&key, &count);
    bump_persistent(env, &key);
}

pub fn user_pools(env: &Env, user: &Address) -> Vec<u64> {
    let key = DataKey::UserPools(user.clone());
    match env.storage().persistent().get(&key) {
        Some(list) => {
            bump_persistent(env, &key);
            list
        }
        None => Vec::new(env),
    }
}

pub fn save_user_pools(env: &Env, user: &Address, list: &Vec<u64>) {
    let key = DataKey::UserPools(user.clone());
    env.storage().persistent().set(&key, list);
    bump_persistent(env, &key);
}

pub fn champion_pools(env: &Env, champion: &Address) -> Vec<u64> {
    let key = DataKey::ChampionPools(champion.clone());
    match env.storage().persistent().get(&key) {
        Some(list) => {
            bump_persistent(env, &key);
            list
        }
        None => Vec::new(env),
    }
}

pub fn save_champion_pools(env: &Env, champion: &Address, list: &Vec<u64>) {
    let key = DataKey::ChampionPools(champion.clone());
    env.storage().persistent().set(&key, list);
    bump_persistent(env, &key);
}
