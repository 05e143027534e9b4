//! Shared data structures for the staking ledger.

use soroban_sdk::contracttype;

/// One stake-and-reserve action by a single staker for one ticket id.
///
/// Records append to the staker's per-ticket list and are never removed;
/// `withdrawn` flips once when the locked credential is returned.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    /// Credential amount locked by this stake.
    pub amount: i128,
    /// Tickets handed out in exchange.
    pub tickets: u32,
    /// Ledger timestamp at which the stake unlocks.
    pub unlock: u64,
    /// Whether the locked amount has been returned.
    pub withdrawn: bool,
}
