//! # Staking Ledger
//!
//! Exchanges a locked fungible credential for pool tickets. A staker
//! locks `stake_per_ticket × n` credential, receives `n` tickets from
//! the inventory escrow, and gets the credential back only after the
//! minimum lock duration passes — the tickets themselves are kept.
//!
//! Stake history is an append-only list per `(staker, ticket id)` pair;
//! `claim` walks an index range over that list and refunds every matured,
//! not-yet-withdrawn record in one transfer. Claiming a range with
//! nothing matured is a silent no-op so callers can poll without
//! special-casing.
//!
//! This contract is the inventory's escrow address: freshly minted
//! ticket supply is credited to it, and it pays tickets out from its own
//! balance when stakes come in.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, token, Address, Env,
    Vec,
};

mod events;
mod storage;
mod types;


use access_registry::AccessRegistryClient;
use events::{TicketsSettled, TokensStaked};
use ticket_inventory::TicketInventoryClient;
pub use types::StakeRecord;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidArgument = 4,
    InsufficientInventory = 5,
}

#[contract]
pub struct StakingLedger;

#[contractimpl]
impl StakingLedger {
    /// Wire up the role directory, the credential token, the ticket
    /// inventory, and the stake terms. Callable exactly once.
    pub fn init(
        env: Env,
        registry: Address,
        token: Address,
        inventory: Address,
        min_lock_duration: u64,
        stake_per_ticket: i128,
    ) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if stake_per_ticket <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        storage::set_registry(&env, &registry);
        storage::set_token(&env, &token);
        storage::set_inventory(&env, &inventory);
        storage::set_min_lock_duration(&env, min_lock_duration);
        storage::set_stake_per_ticket(&env, stake_per_ticket);
    }

    /// Lock `stake_per_ticket × num_tickets` credential and receive
    /// `num_tickets` tickets of `ticket_id` from escrow.
    ///
    /// State is written before the outbound ticket transfer.
    pub fn stake_and_reserve(env: Env, staker: Address, ticket_id: u64, num_tickets: u32) {
        staker.require_auth();
        if num_tickets == 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }

        let inventory = inventory_client(&env);
        let own = env.current_contract_address();
        if inventory.balance(&own, &ticket_id) < num_tickets {
            panic_with_error!(&env, Error::InsufficientInventory);
        }

        let amount = storage::stake_per_ticket(&env) * i128::from(num_tickets);
        let unlock = env.ledger().timestamp() + storage::min_lock_duration(&env);

        let mut records = storage::stakes(&env, &staker, ticket_id);
        records.push_back(StakeRecord {
            amount,
            tickets: num_tickets,
            unlock,
            withdrawn: false,
        });
        storage::save_stakes(&env, &staker, ticket_id, &records);

        token::Client::new(&env, &token_address(&env)).transfer(&staker, &own, &amount);
        inventory.transfer(&own, &staker, &ticket_id, &num_tickets);

        env.events().publish(
            (symbol_short!("staked"), staker.clone()),
            TokensStaked {
                staker: staker.clone(),
                ticket_id,
                amount,
                tickets: num_tickets,
            },
        );
        env.events().publish(
            (symbol_short!("nft_claim"), staker.clone()),
            TicketsSettled {
                staker,
                ticket_id,
                tokens_returned: 0,
                tickets: num_tickets,
            },
        );
    }

    /// Refund every matured, not-yet-withdrawn stake in the half-open
    /// record range `[start, end)` for `(staker, ticket_id)`.
    ///
    /// `end` is clamped to the record count; a range with nothing to
    /// refund returns without transferring or publishing anything.
    pub fn claim(env: Env, staker: Address, ticket_id: u64, start: u32, end: u32) {
        staker.require_auth();

        let mut records = storage::stakes(&env, &staker, ticket_id);
        let end = end.min(records.len());
        if start >= end {
            return;
        }

        let now = env.ledger().timestamp();
        let mut refund: i128 = 0;
        for i in start..end {
            let mut record = records.get_unchecked(i);
            if record.withdrawn || record.unlock > now {
                continue;
            }
            record.withdrawn = true;
            refund += record.amount;
            records.set(i, record);
        }
        if refund == 0 {
            return;
        }
        storage::save_stakes(&env, &staker, ticket_id, &records);

        let own = env.current_contract_address();
        token::Client::new(&env, &token_address(&env)).transfer(&own, &staker, &refund);

        env.events().publish(
            (symbol_short!("nft_claim"), staker.clone()),
            TicketsSettled {
                staker,
                ticket_id,
                tokens_returned: refund,
                tickets: 0,
            },
        );
    }

    /// Governor-gated stake-term updates.
    pub fn set_min_lock_duration(env: Env, governor: Address, seconds: u64) {
        require_governor(&env, &governor);
        storage::set_min_lock_duration(&env, seconds);
    }

    pub fn set_stake_per_ticket(env: Env, governor: Address, amount: i128) {
        require_governor(&env, &governor);
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        storage::set_stake_per_ticket(&env, amount);
    }

    // ─────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────

    pub fn stakes(env: Env, staker: Address, ticket_id: u64) -> Vec<StakeRecord> {
        storage::stakes(&env, &staker, ticket_id)
    }

    pub fn stake_count(env: Env, staker: Address, ticket_id: u64) -> u32 {
        storage::stakes(&env, &staker, ticket_id).len()
    }

    /// Credential still locked by `staker` for `ticket_id`.
    pub fn active_stake(env: Env, staker: Address, ticket_id: u64) -> i128 {
        let mut total: i128 = 0;
        for record in storage::stakes(&env, &staker, ticket_id).iter() {
            if !record.withdrawn {
                total += record.amount;
            }
        }
        total
    }

    /// Tickets of `ticket_id` already handed out to stakers, i.e. the
    /// minted supply minus what is still sitting in escrow.
    pub fn reserved_tickets(env: Env, ticket_id: u64) -> u32 {
        let inventory = inventory_client(&env);
        let own = env.current_contract_address();
        inventory.supply(&ticket_id) - inventory.balance(&own, &ticket_id)
    }

    pub fn min_lock_duration(env: Env) -> u64 {
        storage::min_lock_duration(&env)
    }

    pub fn stake_per_ticket(env: Env) -> i128 {
        storage::stake_per_ticket(&env)
    }
}

fn token_address(env: &Env) -> Address {
    match storage::token(env) {
        Some(token) => token,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn inventory_client(env: &Env) -> TicketInventoryClient {
    match storage::inventory(env) {
        Some(inventory) => TicketInventoryClient::new(env, &inventory),
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn require_governor(env: &Env, caller: &Address) {
    caller.require_auth();
    let registry = match storage::registry(env) {
        Some(registry) => registry,
        None => panic_with_error!(env, Error::NotInitialized),
    };
    if !AccessRegistryClient::new(env, &registry).is_governor(caller) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}
