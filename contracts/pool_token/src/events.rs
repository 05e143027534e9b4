//! Event payloads published by the pool token.

use soroban_sdk::{contracttype, Address};

/// Published under the `mint` topic by the one-time supply mint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensMinted {
    pub pool_id: u64,
    pub amount: i128,
}

/// Published under the `transfer` topic for every balance movement,
/// including the claim payout and `transfer_from`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

/// Published under the `approval` topic.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub amount: i128,
}

/// Published under the `burn` topic.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Burned {
    pub from: Address,
    pub amount: i128,
}

/// Published under the `claimed` topic after a follower's allocation
/// has been paid out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensClaimed {
    pub follower: Address,
    pub amount: i128,
}
