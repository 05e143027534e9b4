//! Typed storage helpers for the ticket inventory.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type      | Description                              |
//! |----------------|-----------|------------------------------------------|
//! | `Registry`     | `Address` | Role directory consulted for gating      |
//! | `Escrow`       | `Address` | Staking ledger receiving minted supply   |
//! | `MaxSupply`    | `u32`     | Global per-ticket-id supply cap          |
//! | `LastMintedId` | `u64`     | Highest ticket id issued so far          |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type           | Description               |
//! |--------------------------|----------------|---------------------------|
//! | `Ticket(id)`             | `TicketRecord` | Supply/cap/champion       |
//! | `Balance(owner, id)`     | `u32`          | Tickets held by `owner`   |
//! | `ChampionTickets(champ)` | `Vec<u64>`     | Ids minted for a champion |

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::TicketRecord;

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
    Escrow,
    MaxSupply,
    LastMintedId,
    Ticket(u64),
    Balance(Address, u64),
    ChampionTickets(u64),
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
    env.storage().instance().has(&DataKey::Escrow)
}

pub fn set_registry(env: &Env, registry: &Address) {
    env.storage().instance().set(&DataKey::Registry, registry);
    bump_instance(env);
}

pub fn registry(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Registry)
}

pub fn set_escrow(env: &Env, escrow: &Address) {
    env.storage().instance().set(&DataKey::Escrow, escrow);
    bump_instance(env);
}

pub fn escrow(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Escrow)
}

pub fn set_max_supply(env: &Env, cap: u32) {
    env.storage().instance().set(&DataKey::MaxSupply, &cap);
    bump_instance(env);
}

pub fn max_supply(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MaxSupply)
        .unwrap_or(0)
}

pub fn last_minted_id(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::LastMintedId)
        .unwrap_or(0)
}

pub fn set_last_minted_id(env: &Env, id: u64) {
    env.storage().instance().set(&DataKey::LastMintedId, &id);
    bump_instance(env);
}

// ── Persistent entries ───────────────────────────────────────────────

pub fn ticket(env: &Env, id: u64) -> Option<TicketRecord> {
    let key = DataKey::Ticket(id);
    let record: Option<TicketRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        bump_persistent(env, &key);
    }
    record
}

pub fn save_ticket(env: &Env, id: u64, record: &TicketRecord) {
    let key = DataKey::Ticket(id);
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn balance(env: &Env, owner: &Address, id: u64) -> u32 {
    let key = DataKey::Balance(owner.clone(), id);
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, owner: &Address, id: u64, amount: u32) {
    let key = DataKey::Balance(owner.clone(), id);
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn champion_tickets(env: &Env, champion_id: u64) -> Vec<u64> {
    let key = DataKey::ChampionTickets(champion_id);
    match env.storage().persistent().get(&key) {
        Some(ids) => {
            bump_persistent(env, &key);
            ids
        }
        None => Vec::new(env),
    }
}

pub fn save_champion_tickets(env: &Env, champion_id: u64, ids: &Vec<u64>) {
    let key = DataKey::ChampionTickets(champion_id);
    env.storage().persistent().set(&key, ids);
    bump_persistent(env, &key);
}
