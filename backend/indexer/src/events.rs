//! Canonical event types emitted by the pool protocol contracts.
//!
//! These mirror the Soroban contract events defined in each contract's
//! `src/events.rs` (pool manager, ticket inventory, staking ledger,
//! pool token, access registry).

use serde::{Deserialize, Serialize};

/// All recognised event kinds across the protocol contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A champion opened a pool (`requested` topic).
    PoolRequested,
    /// A new ticket id was issued (`nft_mint` topic).
    TicketMinted,
    /// Credential was locked for tickets (`staked` topic).
    TokensStaked,
    /// Tickets handed out or a stake refunded (`nft_claim` topic).
    TicketsSettled,
    /// A reward-token supply was minted (`mint` topic).
    RewardMinted,
    /// A follower claimed their reward allocation (`claimed` topic).
    RewardClaimed,
    /// A reward-token balance moved (`transfer` topic).
    Transfer,
    /// A spending allowance was set (`approval` topic).
    Approval,
    /// Reward tokens were burned (`burn` topic).
    Burn,
    /// A role was granted (`role_set` topic).
    RoleSet,
    /// A role was revoked (`role_del` topic).
    RoleDel,
    /// An event from a tracked contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "requested" => Self::PoolRequested,
            "nft_mint" => Self::TicketMinted,
            "staked" => Self::TokensStaked,
            "nft_claim" => Self::TicketsSettled,
            "mint" => Self::RewardMinted,
            "claimed" => Self::RewardClaimed,
            "transfer" => Self::Transfer,
            "approval" => Self::Approval,
            "burn" => Self::Burn,
            "role_set" => Self::RoleSet,
            "role_del" => Self::RoleDel,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PoolRequested => "pool_requested",
            Self::TicketMinted => "ticket_minted",
            Self::TokensStaked => "tokens_staked",
            Self::TicketsSettled => "tickets_settled",
            Self::RewardMinted => "reward_minted",
            Self::RewardClaimed => "reward_claimed",
            Self::Transfer => "transfer",
            Self::Approval => "approval",
            Self::Burn => "burn",
            Self::RoleSet => "role_set",
            Self::RoleDel => "role_del",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded protocol event, ready to be stored in the database.
///
/// `subject_id` carries the pool or ticket id the event is about, when
/// one can be extracted from the topics or payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolEvent {
    pub event_type: String,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
