//! Event payloads published by the staking ledger.

use soroban_sdk::{contracttype, Address};

/// Published under the `staked` topic when credential is locked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensStaked {
    pub staker: Address,
    pub ticket_id: u64,
    pub amount: i128,
    pub tickets: u32,
}

/// Published under the `nft_claim` topic for both sides of the
/// stake/settle exchange: tickets handed out at stake time
/// (`tokens_returned == 0`) and credential refunded after the lock
/// expires (`tickets == 0`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketsSettled {
    pub staker: Address,
    pub ticket_id: u64,
    pub tokens_returned: i128,
    pub tickets: u32,
}
