//! Soroban RPC client — polls `getEvents` and decodes protocol events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, ProtocolEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(dead_code)]
pub struct RawEvent {
    /// XDR-encoded topic list
    pub topic: Vec<String>,
    /// XDR-encoded event value / data
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC, filtered to the tracked
/// protocol contracts.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_ids, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    // Code -32600 / -32601 are hard failures; everything else we retry
                    if err.code == -32600 || err.code == -32601 {
                        return Err(IndexerError::EventParse(format!(
                            "RPC hard error {}: {}",
                            err.code, err.message
                        )));
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or_else(|| {
                    IndexerError::EventParse("Empty result from getEvents".to_string())
                })?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
}

fn build_params(
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": contract_ids
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`ProtocolEvent`] structs.
pub fn decode_events(raw: &[RawEvent]) -> Vec<ProtocolEvent> {
    raw.iter().filter_map(decode_single).collect()
}

fn decode_single(raw: &RawEvent) -> Option<ProtocolEvent> {
    // Extract leading topic symbol to determine event type.
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    // Pool-id or ticket-id keyed topics carry the id in position 1;
    // address-keyed topics fall back to the payload's id field.
    let subject_id = raw
        .topic
        .get(1)
        .and_then(|t| extract_u64(t))
        .or_else(|| extract_field(&raw.value, &["pool_id", "ticket_id"]));

    let (actor, amount) = decode_data(&raw.value, &kind);

    Some(ProtocolEvent {
        event_type: kind.as_str().to_string(),
        subject_id,
        actor,
        amount,
        ledger,
        timestamp,
        contract_id: raw.contract_id.clone().unwrap_or_default(),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull apart the JSON `value` blob that Soroban returns for event data.
/// The XDR is decoded by the RPC into a `{"type":…, …}` JSON object.
fn decode_data(value: &Value, kind: &EventKind) -> (Option<String>, Option<String>) {
    match kind {
        EventKind::PoolRequested => (
            extract_field(value, &["champion"]),
            extract_field(value, &["deposit"]),
        ),
        EventKind::TicketMinted => (None, extract_field(value, &["initial_supply"])),
        EventKind::TokensStaked => (
            extract_field(value, &["staker"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::TicketsSettled => (
            extract_field(value, &["staker"]),
            extract_field(value, &["tokens_returned"]),
        ),
        EventKind::RewardMinted => (None, extract_field(value, &["amount"])),
        EventKind::RewardClaimed => (
            extract_field(value, &["follower"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::Transfer => (
            extract_field(value, &["from"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::Approval => (
            extract_field(value, &["owner"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::Burn => (
            extract_field(value, &["from"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::RoleSet | EventKind::RoleDel => (
            extract_field(value, &["target", "by", "address"]),
            None,
        ),
        EventKind::Unknown => (None, None),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(key) {
            let s = match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => v.as_str().map(String::from),
            };
            if s.is_some() {
                return s;
            }
        }
    }
    None
}

/// Extract a Soroban Symbol from the XDR-decoded topic string.
/// The RPC may return `{"type":"symbol","value":"staked"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    // Fallback: treat the raw string as the symbol
    raw.to_string()
}

/// Extract a numeric id from a topic entry that might be a JSON object
/// or a bare number/string.
fn extract_u64(raw: &str) -> Option<String> {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(n) = v.get("value").and_then(|x| x.as_u64()) {
            return Some(n.to_string());
        }
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            if s.chars().all(|c| c.is_ascii_digit()) {
                return Some(s.to_string());
            }
        }
        if let Some(n) = v.as_u64() {
            return Some(n.to_string());
        }
    }
    if raw.chars().all(|c| c.is_ascii_digit()) && !raw.is_empty() {
        return Some(raw.to_string());
    }
    None
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    use chrono::DateTime;
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_event(topics: Vec<String>, value: Value) -> RawEvent {
        RawEvent {
            topic: topics,
            value,
            contract_id: Some("CONTRACT1".to_string()),
            tx_hash: Some("TX1".to_string()),
            id: None,
            ledger: Some(1000),
            ledger_closed_at: Some("2024-01-01T00:00:00Z".to_string()),
            in_successful_contract_call: Some(true),
            paging_token: None,
        }
    }

    #[test]
    fn event_kind_from_topic() {
        assert_eq!(EventKind::from_topic("requested"), EventKind::PoolRequested);
        assert_eq!(EventKind::from_topic("nft_mint"), EventKind::TicketMinted);
        assert_eq!(EventKind::from_topic("staked"), EventKind::TokensStaked);
        assert_eq!(EventKind::from_topic("nft_claim"), EventKind::TicketsSettled);
        assert_eq!(EventKind::from_topic("mint"), EventKind::RewardMinted);
        assert_eq!(EventKind::from_topic("claimed"), EventKind::RewardClaimed);
        assert_eq!(EventKind::from_topic("transfer"), EventKind::Transfer);
        assert_eq!(EventKind::from_topic("approval"), EventKind::Approval);
        assert_eq!(EventKind::from_topic("burn"), EventKind::Burn);
        assert_eq!(EventKind::from_topic("role_set"), EventKind::RoleSet);
        assert_eq!(EventKind::from_topic("role_del"), EventKind::RoleDel);
        assert_eq!(EventKind::from_topic("something_else"), EventKind::Unknown);
    }

    #[test]
    fn event_kind_as_str() {
        assert_eq!(EventKind::PoolRequested.as_str(), "pool_requested");
        assert_eq!(EventKind::TicketMinted.as_str(), "ticket_minted");
        assert_eq!(EventKind::TokensStaked.as_str(), "tokens_staked");
        assert_eq!(EventKind::TicketsSettled.as_str(), "tickets_settled");
        assert_eq!(EventKind::RewardClaimed.as_str(), "reward_claimed");
        assert_eq!(EventKind::RoleSet.as_str(), "role_set");
    }

    #[test]
    fn extract_symbol_from_json() {
        let raw = r#"{"type":"symbol","value":"staked"}"#;
        assert_eq!(extract_symbol(raw), "staked");
    }

    #[test]
    fn extract_symbol_raw_fallback() {
        assert_eq!(extract_symbol("requested"), "requested");
    }

    #[test]
    fn decode_requested_event() {
        let raw = raw_event(
            vec![
                r#"{"type":"symbol","value":"requested"}"#.to_string(),
                r#"{"type":"u64","value":42}"#.to_string(),
            ],
            serde_json::json!({ "champion": "GCHAMP123", "pool_id": 42, "deposit": "5000" }),
        );

        let events = decode_events(&[raw]);
        assert_eq!(events.len(), 1);
        let ev = &events[0];
        assert_eq!(ev.event_type, "pool_requested");
        assert_eq!(ev.subject_id.as_deref(), Some("42"));
        assert_eq!(ev.actor.as_deref(), Some("GCHAMP123"));
        assert_eq!(ev.amount.as_deref(), Some("5000"));
        assert_eq!(ev.ledger, 1000);
    }

    #[test]
    fn decode_staked_event_takes_subject_from_payload() {
        // `staked` is keyed by the staker address, so the ticket id
        // comes out of the payload instead.
        let raw = raw_event(
            vec![
                r#"{"type":"symbol","value":"staked"}"#.to_string(),
                r#"{"type":"address","value":"GSTAKER"}"#.to_string(),
            ],
            serde_json::json!({
                "staker": "GSTAKER",
                "ticket_id": 7,
                "amount": "1500",
                "tickets": 3
            }),
        );

        let events = decode_events(&[raw]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "tokens_staked");
        assert_eq!(events[0].subject_id.as_deref(), Some("7"));
        assert_eq!(events[0].actor.as_deref(), Some("GSTAKER"));
        assert_eq!(events[0].amount.as_deref(), Some("1500"));
    }

    #[test]
    fn decode_role_set_event() {
        let raw = raw_event(
            vec![
                r#"{"type":"symbol","value":"role_set"}"#.to_string(),
                r#"{"type":"address","value":"GTARGET"}"#.to_string(),
            ],
            serde_json::json!({ "by": "GGOV", "target": "GTARGET" }),
        );

        let events = decode_events(&[raw]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "role_set");
        assert_eq!(events[0].actor.as_deref(), Some("GTARGET"));
        assert_eq!(events[0].subject_id, None);
    }

    #[test]
    fn parse_iso_timestamp() {
        let ts = parse_iso_to_unix("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(ts, 1_704_067_200);
    }
}
