//! # Protocol Configuration
//!
//! Read-mostly store for every numeric policy value the pool protocol
//! consults: the champion stake minimum, phase window lengths, the
//! per-ticket stake price, utilization ratios, the reward-token supply
//! and the shared percent precision.
//!
//! The core contracts only ever *read* from here. Mutation happens
//! out-of-band through the Governor-gated setters; no core operation
//! writes policy.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, panic_with_error, Address, Env};

mod storage;
mod types;

#[cfg(test)]
mod test;

use access_registry::AccessRegistryClient;
pub use types::ProtocolParams;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    InvalidArgument = 4,
}

#[contract]
pub struct ProtocolConfig;

#[contractimpl]
impl ProtocolConfig {
    /// Store the role-directory address and the initial parameter bundle.
    /// Callable exactly once.
    pub fn init(env: Env, registry: Address, params: ProtocolParams) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        if params.percent_precision <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        storage::set_registry(&env, &registry);
        storage::set_params(&env, &params);
    }

    /// The full parameter bundle.
    pub fn params(env: Env) -> ProtocolParams {
        load(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Individual getters
    // ─────────────────────────────────────────────────────────

    pub fn min_champion_stake(env: Env) -> i128 {
        load(&env).min_champion_stake
    }

    pub fn max_warmup_period(env: Env) -> u64 {
        load(&env).max_warmup_period
    }

    pub fn max_follower_onboard_period(env: Env) -> u64 {
        load(&env).max_follower_onboard_period
    }

    pub fn min_follower_deposit(env: Env) -> i128 {
        load(&env).min_follower_deposit
    }

    pub fn max_follower_deposit(env: Env) -> i128 {
        load(&env).max_follower_deposit
    }

    pub fn stake_per_ticket(env: Env) -> i128 {
        load(&env).stake_per_ticket
    }

    pub fn asset_utilization_ratio(env: Env) -> i128 {
        load(&env).asset_utilization_ratio
    }

    pub fn gas_utilization_ratio(env: Env) -> i128 {
        load(&env).gas_utilization_ratio
    }

    pub fn platform_stake_ratio(env: Env) -> i128 {
        load(&env).platform_stake_ratio
    }

    pub fn max_usd_allocation_per_ticket(env: Env) -> i128 {
        load(&env).max_usd_allocation_per_ticket
    }

    pub fn reward_token_supply(env: Env) -> i128 {
        load(&env).reward_token_supply
    }

    pub fn percent_precision(env: Env) -> i128 {
        load(&env).percent_precision
    }

    // ─────────────────────────────────────────────────────────
    // Governor-gated setters
    // ─────────────────────────────────────────────────────────

    pub fn set_min_champion_stake(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.min_champion_stake = value;
        storage::set_params(&env, &params);
    }

    pub fn set_max_warmup_period(env: Env, governor: Address, value: u64) {
        let mut params = gated(&env, &governor);
        params.max_warmup_period = value;
        storage::set_params(&env, &params);
    }

    pub fn set_max_follower_onboard_period(env: Env, governor: Address, value: u64) {
        let mut params = gated(&env, &governor);
        params.max_follower_onboard_period = value;
        storage::set_params(&env, &params);
    }

    pub fn set_min_follower_deposit(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.min_follower_deposit = value;
        storage::set_params(&env, &params);
    }

    pub fn set_max_follower_deposit(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.max_follower_deposit = value;
        storage::set_params(&env, &params);
    }

    pub fn set_stake_per_ticket(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.stake_per_ticket = value;
        storage::set_params(&env, &params);
    }

    pub fn set_asset_utilization_ratio(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.asset_utilization_ratio = value;
        storage::set_params(&env, &params);
    }

    pub fn set_gas_utilization_ratio(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.gas_utilization_ratio = value;
        storage::set_params(&env, &params);
    }

    pub fn set_platform_stake_ratio(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.platform_stake_ratio = value;
        storage::set_params(&env, &params);
    }

    pub fn set_max_usd_alloc_per_ticket(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.max_usd_allocation_per_ticket = value;
        storage::set_params(&env, &params);
    }

    pub fn set_reward_token_supply(env: Env, governor: Address, value: i128) {
        let mut params = gated(&env, &governor);
        params.reward_token_supply = value;
        storage::set_params(&env, &params);
    }

    pub fn set_percent_precision(env: Env, governor: Address, value: i128) {
        if value <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        let mut params = gated(&env, &governor);
        params.percent_precision = value;
        storage::set_params(&env, &params);
    }
}

fn load(env: &Env) -> ProtocolParams {
    match storage::params(env) {
        Some(params) => params,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

/// Authorize `governor` against the role directory and return the current
/// parameters for mutation.
fn gated(env: &Env, governor: &Address) -> ProtocolParams {
    governor.require_auth();
    let registry = match storage::registry(env) {
        Some(registry) => registry,
        None => panic_with_error!(env, Error::NotInitialized),
    };
    if !AccessRegistryClient::new(env, &registry).is_governor(governor) {
        panic_with_error!(env, Error::NotAuthorized);
    }
    load(env)
}
