//! Event payloads published by the pool manager.

use soroban_sdk::{contracttype, Address};

/// Published under the `requested` topic when a champion opens a pool.
/// The only signal this contract emits; later phases are observable
/// through reads and the collaborating contracts' own events.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRequested {
    pub champion: Address,
    pub pool_id: u64,
    pub deposit: i128,
}
