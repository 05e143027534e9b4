//! Shared data structures for the pool manager.

use soroban_sdk::{contracttype, Address};

/// Lifecycle phase of a pool. Transitions only move forward; the three
/// bottom variants are terminal and mutually exclusive.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolState {
    Requested = 0,
    Validated = 1,
    PrivateSubscription = 2,
    PublicSubscription = 3,
    Active = 4,
    FailedBelowThreshold = 5,
    FailedAboveThreshold = 6,
}

/// One capital pool.
///
/// `ticket_id == 0` means "not yet assigned"; once `validate` sets it
/// the field is immutable. The three deadline fields are informational
/// stamps set when the corresponding phase starts; no entry point
/// enforces them. `reward_token` stays `None` until activation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub champion: Address,
    pub champion_deposit: i128,
    pub follower_deposit: i128,
    pub ticket_id: u64,
    pub is_validated: bool,
    pub treasury_fee_paid: i128,
    pub reward_token: Option<Address>,
    pub end_ticket_sale: u64,
    pub end_private_subscription: u64,
    pub end_public_subscription: u64,
    pub state: PoolState,
}

/// One follower's position in one pool. `amount` accumulates across the
/// private and public phases; the two withdrawal flags are one-shot and
/// only relevant after the pool fails.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub amount: i128,
    pub tickets_used: u32,
    pub deposit_withdrawn: bool,
    pub tickets_withdrawn: bool,
}

impl Subscription {
    pub fn empty() -> Self {
        Subscription {
            amount: 0,
            tickets_used: 0,
            deposit_withdrawn: false,
            tickets_withdrawn: false,
        }
    }
}

/// A price observation from the feed, 8 decimals.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}
