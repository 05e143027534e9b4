//! Event payloads published by the ticket inventory.

use soroban_sdk::contracttype;

/// Published under the `nft_mint` topic when a new ticket id is issued.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketMinted {
    pub ticket_id: u64,
    pub champion_id: u64,
    pub initial_supply: u32,
}
