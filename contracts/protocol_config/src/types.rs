//! Policy parameter bundle.

use soroban_sdk::contracttype;

/// Every numeric policy value the protocol consults, written as one
/// instance-storage entry. Ratios are expressed against
/// `percent_precision` (a ratio of `percent_precision` is 100%).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolParams {
    /// Minimum capital a champion must post to open a pool.
    pub min_champion_stake: i128,
    /// Ticket-sale window length, stamped on pool creation.
    pub max_warmup_period: u64,
    /// Subscription window length, stamped on each subscription phase.
    pub max_follower_onboard_period: u64,
    /// Lower bound policy for a single follower deposit.
    pub min_follower_deposit: i128,
    /// Upper bound policy for a single follower deposit.
    pub max_follower_deposit: i128,
    /// Credential locked per reserved ticket.
    pub stake_per_ticket: i128,
    /// Ratio applied to the champion deposit to derive the activation
    /// threshold.
    pub asset_utilization_ratio: i128,
    /// Ratio of the follower deposit paid to the treasury on activation.
    pub gas_utilization_ratio: i128,
    /// Platform-side stake ratio, kept for out-of-band policy use.
    pub platform_stake_ratio: i128,
    /// USD cap (8 decimals) on the subscription a single ticket allows.
    pub max_usd_allocation_per_ticket: i128,
    /// Fixed total supply minted for every pool's reward token.
    pub reward_token_supply: i128,
    /// Denominator for every ratio above.
    pub percent_precision: i128,
}
