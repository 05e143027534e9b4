//! # Ticket Inventory
//!
//! Owns the scarce ticket identifiers that gate private pool
//! subscription. Ticket ids are issued strictly sequentially (no gaps,
//! no reuse) by Operators, and every freshly minted ticket lands in the
//! staking ledger's escrow balance — no user ever receives supply
//! directly from a mint. Supply growth is bounded twice: by the global
//! per-id cap and by the per-id cap an Operator may tighten.
//!
//! Balances are flat `(owner, ticket id) → u32` entries; `transfer`
//! moves them with the owner's authorization. The staking ledger and the
//! pool manager move tickets through this entry point as part of their
//! own invocations.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, Address, Env, Vec,
};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test;

use access_registry::AccessRegistryClient;
use events::TicketMinted;
pub use types::TicketRecord;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    NotFound = 4,
    InvalidSequence = 5,
    SupplyExceeded = 6,
    InsufficientBalance = 7,
    InvalidArgument = 8,
}

#[contract]
pub struct TicketInventory;

#[contractimpl]
impl TicketInventory {
    /// Wire up the role directory, the escrow (staking ledger) address
    /// and the global per-id supply cap. Callable exactly once.
    pub fn init(env: Env, registry: Address, escrow: Address, max_supply_per_ticket: u32) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if max_supply_per_ticket == 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        storage::set_registry(&env, &registry);
        storage::set_escrow(&env, &escrow);
        storage::set_max_supply(&env, max_supply_per_ticket);
    }

    /// Issue a new ticket id for `champion_id`.
    ///
    /// - `operator` must hold the Operator role.
    /// - `ticket_id` must be exactly `last_minted_id() + 1`.
    /// - `initial_supply` must be positive and within the global cap.
    ///
    /// The whole supply is credited to the staking ledger's escrow
    /// balance; tickets reach users only through staking.
    pub fn mint(env: Env, operator: Address, ticket_id: u64, initial_supply: u32, champion_id: u64) {
        operator.require_auth();
        require_operator(&env, &operator);

        if ticket_id != storage::last_minted_id(&env) + 1 {
            panic_with_error!(&env, Error::InvalidSequence);
        }
        let cap = storage::max_supply(&env);
        if initial_supply == 0 || initial_supply > cap {
            panic_with_error!(&env, Error::SupplyExceeded);
        }

        let escrow = escrow(&env);
        storage::set_last_minted_id(&env, ticket_id);
        storage::save_ticket(
            &env,
            ticket_id,
            &TicketRecord {
                champion_id,
                supply: initial_supply,
                cap,
            },
        );
        storage::set_balance(&env, &escrow, ticket_id, initial_supply);

        let mut ids = storage::champion_tickets(&env, champion_id);
        ids.push_back(ticket_id);
        storage::save_champion_tickets(&env, champion_id, &ids);

        env.events().publish(
            (symbol_short!("nft_mint"), ticket_id),
            TicketMinted {
                ticket_id,
                champion_id,
                initial_supply,
            },
        );
    }

    /// Grow the supply of an already-minted ticket id, within its cap.
    /// The extra supply is credited to escrow.
    pub fn add_supply(env: Env, operator: Address, ticket_id: u64, extra: u32) {
        operator.require_auth();
        require_operator(&env, &operator);

        let mut record = match storage::ticket(&env, ticket_id) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::NotFound),
        };
        let new_supply = record.supply.checked_add(extra);
        match new_supply {
            Some(total) if total <= record.cap => record.supply = total,
            _ => panic_with_error!(&env, Error::SupplyExceeded),
        }
        storage::save_ticket(&env, ticket_id, &record);

        let escrow = escrow(&env);
        let escrow_balance = storage::balance(&env, &escrow, ticket_id);
        storage::set_balance(&env, &escrow, ticket_id, escrow_balance + extra);
    }

    /// Tighten or relax the per-id cap. The cap can never be set below
    /// the already-minted supply.
    pub fn set_ticket_cap(env: Env, operator: Address, ticket_id: u64, cap: u32) {
        operator.require_auth();
        require_operator(&env, &operator);

        let mut record = match storage::ticket(&env, ticket_id) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::NotFound),
        };
        if cap < record.supply {
            panic_with_error!(&env, Error::SupplyExceeded);
        }
        record.cap = cap;
        storage::save_ticket(&env, ticket_id, &record);
    }

    /// Change the global per-id cap applied to future mints.
    /// Governor-gated.
    pub fn set_max_supply_per_ticket(env: Env, governor: Address, cap: u32) {
        governor.require_auth();
        let registry = registry(&env);
        if !AccessRegistryClient::new(&env, &registry).is_governor(&governor) {
            panic_with_error!(&env, Error::NotAuthorized);
        }
        if cap == 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        storage::set_max_supply(&env, cap);
    }

    /// Move `amount` tickets of `ticket_id` from `from` to `to`.
    pub fn transfer(env: Env, from: Address, to: Address, ticket_id: u64, amount: u32) {
        from.require_auth();
        if amount == 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        if storage::ticket(&env, ticket_id).is_none() {
            panic_with_error!(&env, Error::NotFound);
        }
        let from_balance = storage::balance(&env, &from, ticket_id);
        if from_balance < amount {
            panic_with_error!(&env, Error::InsufficientBalance);
        }
        storage::set_balance(&env, &from, ticket_id, from_balance - amount);
        let to_balance = storage::balance(&env, &to, ticket_id);
        storage::set_balance(&env, &to, ticket_id, to_balance + amount);
    }

    // ─────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────

    /// Total minted supply for `ticket_id`. Fails for unknown ids.
    pub fn supply(env: Env, ticket_id: u64) -> u32 {
        Self::ticket(env, ticket_id).supply
    }

    /// The full record for `ticket_id`. Fails for unknown ids.
    pub fn ticket(env: Env, ticket_id: u64) -> TicketRecord {
        match storage::ticket(&env, ticket_id) {
            Some(record) => record,
            None => panic_with_error!(&env, Error::NotFound),
        }
    }

    pub fn ticket_cap(env: Env, ticket_id: u64) -> u32 {
        Self::ticket(env, ticket_id).cap
    }

    /// Tickets of `ticket_id` held by `owner` (0 for unknown pairs).
    pub fn balance(env: Env, owner: Address, ticket_id: u64) -> u32 {
        storage::balance(&env, &owner, ticket_id)
    }

    pub fn last_minted_id(env: Env) -> u64 {
        storage::last_minted_id(&env)
    }

    pub fn champion_ticket_ids(env: Env, champion_id: u64) -> Vec<u64> {
        storage::champion_tickets(&env, champion_id)
    }

    pub fn max_supply_per_ticket(env: Env) -> u32 {
        storage::max_supply(&env)
    }
}

fn registry(env: &Env) -> Address {
    match storage::registry(env) {
        Some(registry) => registry,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn escrow(env: &Env) -> Address {
    match storage::escrow(env) {
        Some(escrow) => escrow,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn require_operator(env: &Env, caller: &Address) {
    let registry = registry(env);
    if !AccessRegistryClient::new(env, &registry).is_operator(caller) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}
