//! # Pool Manager
//!
//! Orchestrates the capital-pool lifecycle from a champion's request to
//! activation or failure:
//!
//! ```text
//! Requested → Validated → PrivateSubscription → PublicSubscription
//!                  → { Active | FailedBelowThreshold | FailedAboveThreshold }
//! ```
//!
//! Transitions only move forward and the terminal states are mutually
//! exclusive. Operators drive every transition after the initial
//! request; followers interact through the two subscribe entry points
//! and, for failed pools, the two withdraw entry points.
//!
//! During the private phase a follower's deposit is capped by the pool
//! tickets they hold, valued through the USD price feed; the public
//! phase is uncapped. Activation (`end_subscription`) checks the
//! follower total against the utilization threshold, pays the treasury
//! fee, forwards the remaining capital to the reward token and performs
//! its one-time mint. All pool bookkeeping is written before any
//! outbound transfer.
//!
//! This contract publishes a single event (`requested`); every later
//! phase is observable through reads and the collaborators' own events.

#![no_std]

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, panic_with_error, symbol_short, token,
    Address, Env, String, Vec,
};

mod events;
mod storage;
mod types;


use access_registry::AccessRegistryClient;
use events::PoolRequested;
use protocol_config::ProtocolConfigClient;
use ticket_inventory::TicketInventoryClient;
pub use types::{Pool, PoolState, PriceData, Subscription};

/// Scale of feed prices (8 decimals).
const PRICE_SCALE: i128 = 100_000_000;

/// Decimal digits of the reward token's claim-ratio scale.
const CLAIM_PRECISION: u32 = 10;

/// Price oracle consulted for the private-phase per-ticket cap.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_price(env: Env) -> PriceData;
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    PoolNotFound = 4,
    PoolAlreadyExists = 5,
    DepositTooSmall = 6,
    InvalidTicket = 7,
    TicketNotFound = 8,
    AlreadyValidated = 9,
    WrongPhase = 10,
    ZeroDeposit = 11,
    AlreadySubscribed = 12,
    CapExceeded = 13,
    BelowThreshold = 14,
    AboveThreshold = 15,
    AlreadyWithdrawn = 16,
    NotParticipant = 17,
    InvalidPrice = 18,
}

#[contract]
pub struct PoolManager;

#[contractimpl]
impl PoolManager {
    /// Wire up the collaborating contracts. Callable exactly once.
    pub fn init(
        env: Env,
        registry: Address,
        config: Address,
        inventory: Address,
        token: Address,
        treasury: Address,
        price_feed: Address,
    ) {
        if storage::is_initialized(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        storage::set_registry(&env, &registry);
        storage::set_config(&env, &config);
        storage::set_inventory(&env, &inventory);
        storage::set_token(&env, &token);
        storage::set_treasury(&env, &treasury);
        storage::set_price_feed(&env, &price_feed);
    }

    /// Open a new pool under a caller-chosen id, locking the champion's
    /// deposit. The deposit must meet the configured minimum.
    pub fn create_pool(env: Env, champion: Address, pool_id: u64, deposit: i128) {
        champion.require_auth();

        if deposit < config_client(&env).min_champion_stake() {
            panic_with_error!(&env, Error::DepositTooSmall);
        }
        if storage::pool(&env, pool_id).is_some() {
            panic_with_error!(&env, Error::PoolAlreadyExists);
        }

        let pool = Pool {
            champion: champion.clone(),
            champion_deposit: deposit,
            follower_deposit: 0,
            ticket_id: 0,
            is_validated: false,
            treasury_fee_paid: 0,
            reward_token: None,
            end_ticket_sale: env.ledger().timestamp() + config_client(&env).max_warmup_period(),
            end_private_subscription: 0,
            end_public_subscription: 0,
            state: PoolState::Requested,
        };
        storage::save_pool(&env, pool_id, &pool);

        let mut pools = storage::champion_pools(&env, &champion);
        pools.push_back(pool_id);
        storage::save_champion_pools(&env, &champion, &pools);

        token::Client::new(&env, &token_address(&env)).transfer(
            &champion,
            &env.current_contract_address(),
            &deposit,
        );

        env.events().publish(
            (symbol_short!("requested"), pool_id),
            PoolRequested {
                champion,
                pool_id,
                deposit,
            },
        );
    }

    /// Attach a minted ticket id to a Requested pool and mark it
    /// Validated. One-shot per pool.
    pub fn validate(env: Env, operator: Address, pool_id: u64, ticket_id: u64) {
        require_operator(&env, &operator);

        let mut pool = load_pool(&env, pool_id);
        if pool.is_validated {
            panic_with_error!(&env, Error::AlreadyValidated);
        }
        if pool.state != PoolState::Requested {
            panic_with_error!(&env, Error::WrongPhase);
        }
        if ticket_id == 0 {
            panic_with_error!(&env, Error::InvalidTicket);
        }
        // Ids are strictly sequential, so minted means within range.
        if ticket_id > inventory_client(&env).last_minted_id() {
            panic_with_error!(&env, Error::TicketNotFound);
        }

        pool.ticket_id = ticket_id;
        pool.is_validated = true;
        pool.state = PoolState::Validated;
        storage::save_pool(&env, pool_id, &pool);
    }

    /// Validated → PrivateSubscription.
    pub fn start_private_subscription(env: Env, operator: Address, pool_id: u64) {
        require_operator(&env, &operator);

        let mut pool = load_pool(&env, pool_id);
        if pool.state != PoolState::Validated {
            panic_with_error!(&env, Error::WrongPhase);
        }
        pool.state = PoolState::PrivateSubscription;
        pool.end_private_subscription =
            env.ledger().timestamp() + config_client(&env).max_follower_onboard_period();
        storage::save_pool(&env, pool_id, &pool);
    }

    /// Subscribe during the private phase. The deposit is capped by the
    /// follower's ticket holdings and consumes tickets proportionally.
    pub fn private_subscribe(env: Env, follower: Address, pool_id: u64, amount: i128) {
        follower.require_auth();

        let mut pool = load_pool(&env, pool_id);
        if pool.state != PoolState::PrivateSubscription {
            panic_with_error!(&env, Error::WrongPhase);
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::ZeroDeposit);
        }
        if storage::subscription(&env, pool_id, &follower).is_some() {
            panic_with_error!(&env, Error::AlreadySubscribed);
        }

        let per_ticket = Self::max_subscription_per_ticket(env.clone());
        let inventory = inventory_client(&env);
        let tickets_held = i128::from(inventory.balance(&follower, &pool.ticket_id));
        if amount > tickets_held * per_ticket {
            panic_with_error!(&env, Error::CapExceeded);
        }
        let tickets_to_use = ((amount + per_ticket - 1) / per_ticket) as u32;

        record_subscription(&env, &mut pool, pool_id, &follower, amount, tickets_to_use);

        token::Client::new(&env, &token_address(&env)).transfer(
            &follower,
            &env.current_contract_address(),
            &amount,
        );
        inventory.transfer(
            &follower,
            &env.current_contract_address(),
            &pool.ticket_id,
            &tickets_to_use,
        );
    }

    /// PrivateSubscription → PublicSubscription.
    pub fn start_public_subscription(env: Env, operator: Address, pool_id: u64) {
        require_operator(&env, &operator);

        let mut pool = load_pool(&env, pool_id);
        if pool.state != PoolState::PrivateSubscription {
            panic_with_error!(&env, Error::WrongPhase);
        }
        pool.state = PoolState::PublicSubscription;
        pool.end_public_subscription =
            env.ledger().timestamp() + config_client(&env).max_follower_onboard_period();
        storage::save_pool(&env, pool_id, &pool);
    }

    /// Subscribe during the public phase; no ticket cap, same one-shot
    /// rule as the private phase.
    pub fn public_subscribe(env: Env, follower: Address, pool_id: u64, amount: i128) {
        follower.require_auth();

        let mut pool = load_pool(&env, pool_id);
        if pool.state != PoolState::PublicSubscription {
            panic_with_error!(&env, Error::WrongPhase);
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::ZeroDeposit);
        }
        if storage::subscription(&env, pool_id, &follower).is_some() {
            panic_with_error!(&env, Error::AlreadySubscribed);
        }

        record_subscription(&env, &mut pool, pool_id, &follower, amount, 0);

        token::Client::new(&env, &token_address(&env)).transfer(
            &follower,
            &env.current_contract_address(),
            &amount,
        );
    }

    /// Activate the pool: check the threshold, record the treasury fee,
    /// freeze totals, then pay the fee, forward the follower capital to
    /// the reward token and perform its one-time mint.
    pub fn end_subscription(
        env: Env,
        operator: Address,
        pool_id: u64,
        reward_token: Address,
        name: String,
        symbol: String,
    ) {
        require_operator(&env, &operator);

        let mut pool = load_pool(&env, pool_id);
        if pool.state != PoolState::PublicSubscription {
            panic_with_error!(&env, Error::WrongPhase);
        }
        if pool.follower_deposit < threshold(&env, &pool) {
            panic_with_error!(&env, Error::BelowThreshold);
        }

        let config = config_client(&env);
        let fee = pool.follower_deposit * config.gas_utilization_ratio() / config.percent_precision();
        let forwarded = pool.follower_deposit - fee;

        pool.treasury_fee_paid = fee;
        pool.reward_token = Some(reward_token.clone());
        pool.state = PoolState::Active;
        storage::save_pool(&env, pool_id, &pool);

        let credential = token::Client::new(&env, &token_address(&env));
        let own = env.current_contract_address();
        if fee > 0 {
            credential.transfer(&own, &treasury_address(&env), &fee);
        }
        credential.transfer(&own, &reward_token, &forwarded);

        pool_token::PoolTokenClient::new(&env, &reward_token).init_token(
            &own,
            &pool_id,
            &name,
            &symbol,
            &config.reward_token_supply(),
            &pool.follower_deposit,
        );
    }

    /// Fail a public-phase pool that did not reach the threshold.
    pub fn terminate(env: Env, operator: Address, pool_id: u64) {
        require_operator(&env, &operator);

        let mut pool = load_pool(&env, pool_id);
        if pool.state != PoolState::PublicSubscription {
            panic_with_error!(&env, Error::WrongPhase);
        }
        if pool.follower_deposit >= threshold(&env, &pool) {
            panic_with_error!(&env, Error::AboveThreshold);
        }
        pool.state = PoolState::FailedAboveThreshold;
        storage::save_pool(&env, pool_id, &pool);
    }

    /// Refund a follower's deposit from a failed pool. One-shot; a
    /// follower with nothing deposited is a silent no-op.
    pub fn withdraw_deposit(env: Env, follower: Address, pool_id: u64) {
        follower.require_auth();

        let pool = load_pool(&env, pool_id);
        require_failed(&env, &pool);

        let mut sub = storage::subscription(&env, pool_id, &follower)
            .unwrap_or_else(Subscription::empty);
        if sub.deposit_withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }
        if sub.amount == 0 {
            return;
        }
        sub.deposit_withdrawn = true;
        storage::save_subscription(&env, pool_id, &follower, &sub);

        token::Client::new(&env, &token_address(&env)).transfer(
            &env.current_contract_address(),
            &follower,
            &sub.amount,
        );
    }

    /// Return the tickets a private-phase follower spent on a failed
    /// pool. One-shot; requires a private-phase participation.
    pub fn withdraw_tickets(env: Env, follower: Address, pool_id: u64) {
        follower.require_auth();

        let pool = load_pool(&env, pool_id);
        require_failed(&env, &pool);

        let mut sub = storage::subscription(&env, pool_id, &follower)
            .unwrap_or_else(Subscription::empty);
        if sub.tickets_used == 0 {
            panic_with_error!(&env, Error::NotParticipant);
        }
        if sub.tickets_withdrawn {
            panic_with_error!(&env, Error::AlreadyWithdrawn);
        }
        sub.tickets_withdrawn = true;
        storage::save_subscription(&env, pool_id, &follower, &sub);

        inventory_client(&env).transfer(
            &env.current_contract_address(),
            &follower,
            &pool.ticket_id,
            &sub.tickets_used,
        );
    }

    // ─────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────

    pub fn pool(env: Env, pool_id: u64) -> Pool {
        load_pool(&env, pool_id)
    }

    /// The follower's position, zeroed when they never subscribed.
    pub fn subscription(env: Env, pool_id: u64, user: Address) -> Subscription {
        storage::subscription(&env, pool_id, &user).unwrap_or_else(Subscription::empty)
    }

    /// Deposit total for `(pool_id, user)`; the reward token's claim
    /// arithmetic reads through this.
    pub fn subscription_amount(env: Env, pool_id: u64, user: Address) -> i128 {
        storage::subscription(&env, pool_id, &user)
            .map(|sub| sub.amount)
            .unwrap_or(0)
    }

    /// Largest private-phase deposit `user` could place right now.
    pub fn max_subscription_for(env: Env, user: Address, pool_id: u64) -> i128 {
        let pool = load_pool(&env, pool_id);
        let held = i128::from(inventory_client(&env).balance(&user, &pool.ticket_id));
        held * Self::max_subscription_per_ticket(env)
    }

    /// The configured USD allocation per ticket converted into
    /// credential units through the price feed.
    pub fn max_subscription_per_ticket(env: Env) -> i128 {
        let usd_cap = config_client(&env).max_usd_allocation_per_ticket();
        let feed = match storage::price_feed(&env) {
            Some(feed) => feed,
            None => panic_with_error!(&env, Error::NotInitialized),
        };
        let quote = PriceFeedClient::new(&env, &feed).latest_price();
        if quote.price <= 0 {
            panic_with_error!(&env, Error::InvalidPrice);
        }
        usd_cap * PRICE_SCALE / quote.price
    }

    /// The follower-deposit total the pool must reach to activate.
    pub fn activation_threshold(env: Env, pool_id: u64) -> i128 {
        let pool = load_pool(&env, pool_id);
        threshold(&env, &pool)
    }

    pub fn user_pools(env: Env, user: Address) -> Vec<u64> {
        storage::user_pools(&env, &user)
    }

    pub fn champion_pools(env: Env, champion: Address) -> Vec<u64> {
        storage::champion_pools(&env, &champion)
    }

    pub fn subscribers(env: Env, pool_id: u64) -> Vec<Address> {
        storage::subscribers(&env, pool_id)
    }

    pub fn used_tickets(env: Env, pool_id: u64) -> u32 {
        storage::used_tickets(&env, pool_id)
    }

    /// Decimal digits of the reward token's claim-ratio scale.
    pub fn claim_precision(_env: Env) -> u32 {
        CLAIM_PRECISION
    }
}

fn record_subscription(
    env: &Env,
    pool: &mut Pool,
    pool_id: u64,
    follower: &Address,
    amount: i128,
    tickets_to_use: u32,
) {
    storage::save_subscription(
        env,
        pool_id,
        follower,
        &Subscription {
            amount,
            tickets_used: tickets_to_use,
            deposit_withdrawn: false,
            tickets_withdrawn: false,
        },
    );
    if tickets_to_use > 0 {
        let used = storage::used_tickets(env, pool_id);
        storage::set_used_tickets(env, pool_id, used + tickets_to_use);
    }

    pool.follower_deposit += amount;
    storage::save_pool(env, pool_id, pool);

    let mut subscribers = storage::subscribers(env, pool_id);
    subscribers.push_back(follower.clone());
    storage::save_subscribers(env, pool_id, &subscribers);

    let mut pools = storage::user_pools(env, follower);
    pools.push_back(pool_id);
    storage::save_user_pools(env, follower, &pools);
}

fn threshold(env: &Env, pool: &Pool) -> i128 {
    let config = config_client(env);
    pool.champion_deposit * config.asset_utilization_ratio() / config.percent_precision()
}

fn load_pool(env: &Env, pool_id: u64) -> Pool {
    match storage::pool(env, pool_id) {
        Some(pool) => pool,
        None => panic_with_error!(env, Error::PoolNotFound),
    }
}

fn require_failed(env: &Env, pool: &Pool) {
    match pool.state {
        PoolState::FailedBelowThreshold | PoolState::FailedAboveThreshold => {}
        _ => panic_with_error!(env, Error::WrongPhase),
    }
}

fn config_client(env: &Env) -> ProtocolConfigClient {
    match storage::config(env) {
        Some(config) => ProtocolConfigClient::new(env, &config),
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn inventory_client(env: &Env) -> TicketInventoryClient {
    match storage::inventory(env) {
        Some(inventory) => TicketInventoryClient::new(env, &inventory),
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn token_address(env: &Env) -> Address {
    match storage::token(env) {
        Some(token) => token,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn treasury_address(env: &Env) -> Address {
    match storage::treasury(env) {
        Some(treasury) => treasury,
        None => panic_with_error!(env, Error::NotInitialized),
    }
}

fn require_operator(env: &Env, caller: &Address) {
    caller.require_auth();
    let registry = match storage::registry(env) {
        Some(registry) => registry,
        None => panic_with_error!(env, Error::NotInitialized),
    };
    if !AccessRegistryClient::new(env, &registry).is_operator(caller) {
        panic_with_error!(env, Error::NotAuthorized);
    }
}
