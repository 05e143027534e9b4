//! Shared data structures for the ticket inventory.

use soroban_sdk::contracttype;

/// One issued ticket identifier.
///
/// `supply` only ever grows (mint, `add_supply`) and is bounded by `cap`,
/// which itself can never be lowered below the issued amount. Ownership
/// is not recorded here — per-owner balances live in their own storage
/// entries so that transfers touch two small entries instead of this
/// record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketRecord {
    /// Champion this ticket series belongs to.
    pub champion_id: u64,
    /// Total minted supply across all owners.
    pub supply: u32,
    /// Per-ticket-id supply cap; defaults to the global cap at mint time.
    pub cap: u32,
}
