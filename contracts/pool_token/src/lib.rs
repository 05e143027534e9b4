//! # Pool Token
//!
//! Per-pool reward token, minted once when a pool activates. The entire
//! supply sits on the contract's own balance until followers claim their
//! deposit-proportional share; after that it behaves as a plain fungible
//! token (transfer / approve / transfer_from / burn), 18 decimals.
//!
//! The claim allocation is
//! `total_supply × (deposit × 10^10 / deposit_total) / 10^10` with
//! integer truncation — rounding dust stays on the contract balance and
//! is never redistributed. The follower's recorded deposit is read from
//! the pool manager through the [`PoolDirectory`] boundary trait, so
//! this crate does not depend on the manager crate.

#![no_std]

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, panic_with_error, symbol_short,
    Address, Env, String, Vec,
};

mod events;
mod storage;

#[cfg(test)]
mod test;

use events::{Approval, Burned, TokensClaimed, TokensMinted, Transfer};

/// Scale of the intermediate claim ratio (10 decimal digits).
pub const CLAIM_RATIO_SCALE: i128 = 10_000_000_000;

const DECIMALS: u32 = 18;

/// Read surface the pool manager exposes to reward tokens.
#[contractclient(name = "PoolDirectoryClient")]
pub trait PoolDirectory {
    /// Total credential deposited by `user` into pool `pool_id`
    /// (0 when the user never subscribed).
    fn subscription_amount(env: Env, pool_id: u64, user: Address) -> i128;
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyMinted = 1,
    NotInitialized = 2,
    NoDeposit = 3,
    AlreadyClaimed = 4,
    InvalidArgument = 5,
    InsufficientBalance = 6,
    InsufficientAllowance = 7,
}

#[contract]
pub struct PoolToken;

#[contractimpl]
impl PoolToken {
    /// One-time supply mint, invoked by the pool manager when the pool
    /// activates. The full supply is credited to this contract's own
    /// balance and the follower-deposit denominator is frozen here.
    pub fn init_token(
        env: Env,
        manager: Address,
        pool_id: u64,
        name: String,
        symbol: String,
        total_supply: i128,
        follower_deposit_total: i128,
    ) {
        if storage::is_minted(&env) {
            panic_with_error!(&env, Error::AlreadyMinted);
        }
        if total_supply <= 0 || follower_deposit_total <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        storage::set_manager(&env, &manager);
        storage::set_pool_id(&env, pool_id);
        storage::set_name(&env, &name);
        storage::set_symbol(&env, &symbol);
        storage::set_total_supply(&env, total_supply);
        storage::set_deposit_total(&env, follower_deposit_total);
        storage::set_balance(&env, &env.current_contract_address(), total_supply);

        env.events().publish(
            (symbol_short!("mint"), pool_id),
            TokensMinted {
                pool_id,
                amount: total_supply,
            },
        );
    }

    /// Pay out the follower's deposit-proportional share of the supply.
    /// One-shot per follower.
    pub fn claim(env: Env, follower: Address) {
        follower.require_auth();
        if !storage::is_minted(&env) {
            panic_with_error!(&env, Error::NotInitialized);
        }
        let deposit = recorded_deposit(&env, &follower);
        if deposit <= 0 {
            panic_with_error!(&env, Error::NoDeposit);
        }
        if storage::has_claimed(&env, &follower) {
            panic_with_error!(&env, Error::AlreadyClaimed);
        }

        let amount = allocation(&env, deposit);
        storage::set_claimed(&env, &follower);
        let mut holders = storage::holders(&env);
        holders.push_back(follower.clone());
        storage::save_holders(&env, &holders);

        let own = env.current_contract_address();
        move_balance(&env, &own, &follower, amount);

        env.events().publish(
            (symbol_short!("transfer"), own, follower.clone()),
            Transfer {
                from: env.current_contract_address(),
                to: follower.clone(),
                amount,
            },
        );
        env.events().publish(
            (symbol_short!("claimed"), follower.clone()),
            TokensClaimed { follower, amount },
        );
    }

    /// The share `follower` would receive from `claim`; 0 once claimed
    /// or when no deposit is recorded.
    pub fn claimable(env: Env, follower: Address) -> i128 {
        if !storage::is_minted(&env) || storage::has_claimed(&env, &follower) {
            return 0;
        }
        let deposit = recorded_deposit(&env, &follower);
        if deposit <= 0 {
            return 0;
        }
        allocation(&env, deposit)
    }

    // ─────────────────────────────────────────────────────────
    // Fungible surface
    // ─────────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        if amount < 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        move_balance(&env, &from, &to, amount);
        env.events().publish(
            (symbol_short!("transfer"), from.clone(), to.clone()),
            Transfer { from, to, amount },
        );
    }

    pub fn approve(env: Env, owner: Address, spender: Address, amount: i128) {
        owner.require_auth();
        if amount < 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        storage::set_allowance(&env, &owner, &spender, amount);
        env.events().publish(
            (symbol_short!("approval"), owner.clone(), spender.clone()),
            Approval {
                owner,
                spender,
                amount,
            },
        );
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        if amount < 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        let allowed = storage::allowance(&env, &from, &spender);
        if allowed < amount {
            panic_with_error!(&env, Error::InsufficientAllowance);
        }
        storage::set_allowance(&env, &from, &spender, allowed - amount);
        move_balance(&env, &from, &to, amount);
        env.events().publish(
            (symbol_short!("transfer"), from.clone(), to.clone()),
            Transfer { from, to, amount },
        );
    }

    /// Destroy `amount` from `from`, shrinking the total supply.
    pub fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        if amount < 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        let balance = storage::balance(&env, &from);
        if balance < amount {
            panic_with_error!(&env, Error::InsufficientBalance);
        }
        storage::set_balance(&env, &from, balance - amount);
        storage::set_total_supply(&env, storage::total_supply(&env) - amount);
        env.events().publish(
            (symbol_short!("burn"), from.clone()),
            Burned { from, amount },
        );
    }

    pub fn balance(env: Env, owner: Address) -> i128 {
        storage::balance(&env, &owner)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        storage::allowance(&env, &owner, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::total_supply(&env)
    }

    pub fn name(env: Env) -> String {
        match storage::name(&env) {
            Some(name) => name,
            None => panic_with_error!(&env, Error::NotInitialized),
        }
    }

    pub fn symbol(env: Env) -> String {
        match storage::symbol(&env) {
            Some(symbol) => symbol,
            None => panic_with_error!(&env, Error::NotInitialized),
        }
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    /// Followers who have claimed, in claim order.
    pub fn holders(env: Env) -> Vec<Address> {
        storage::holders(&env)
    }
}

fn recorded_deposit(env: &Env, follower: &Address) -> i128 {
    let manager = match storage::manager(env) {
        Some(manager) => manager,
        None => panic_with_error!(env, Error::NotInitialized),
    };
    PoolDirectoryClient::new(env, &manager)
        .subscription_amount(&storage::pool_id(env), follower)
}

fn allocation(env: &Env, deposit: i128) -> i128 {
    let ratio = deposit * CLAIM_RATIO_SCALE / storage::deposit_total(env);
    storage::total_supply(env) * ratio / CLAIM_RATIO_SCALE
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) {
    let from_balance = storage::balance(env, from);
    if from_balance < amount {
        panic_with_error!(env, Error::InsufficientBalance);
    }
    storage::set_balance(env, from, from_balance - amount);
    storage::set_balance(env, to, storage::balance(env, to) + amount);
}
