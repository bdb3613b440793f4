//! Soroban RPC client: polls `getEvents` and decodes escrow and ledger events.
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
use crate::events::{EventKind, IndexedEvent};

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
pub struct RawEvent {
    /// Topic list as rendered by the RPC
    pub topic: Vec<String>,
    /// Event value / data
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
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events for `contract_ids` from the RPC.
///
/// * `start_ledger`: the ledger sequence to scan from (inclusive).
/// * `cursor`: optional opaque pagination cursor from a previous response.
/// * `limit`: maximum number of events to return.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventsPage> {
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

        let resp = match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => resp,
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            tokio::time::sleep(Duration::from_secs(backoff)).await;
            backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            // Invalid request / unknown method will not fix themselves.
            if err.code == -32600 || err.code == -32601 {
                return Err(IndexerError::Rpc(format!(
                    "hard error {}: {}",
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

        let result = body
            .result
            .ok_or_else(|| IndexerError::Rpc("Empty result from getEvents".to_string()))?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok(EventsPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

fn build_params(contract_ids: &[String], start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
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

/// Decode a list of raw RPC events into [`IndexedEvent`] structs.
///
/// Events from failed contract calls are dropped; their state changes were
/// rolled back.
pub fn decode_events(raw: &[RawEvent], default_contract_id: &str) -> Vec<IndexedEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call.unwrap_or(true))
        .filter_map(|e| decode_single(e, default_contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, default_contract_id: &str) -> Option<IndexedEvent> {
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_scalar(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let campaign_id = if kind.is_campaign_event() {
        raw.topic.get(1).map(|t| extract_scalar(t))
    } else {
        None
    };

    let (actor, amount, detail) = decode_data(raw, &kind);

    Some(IndexedEvent {
        event_id: raw.id.clone(),
        event_type: kind.as_str().to_string(),
        campaign_id,
        actor,
        amount,
        detail,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| default_contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull `(actor, amount, detail)` out of an event.
///
/// Escrow events carry a struct as data; ledger events carry the parties in
/// their topics and the bare amount as data.
fn decode_data(raw: &RawEvent, kind: &EventKind) -> (Option<String>, Option<String>, Option<String>) {
    let value = &raw.value;
    match kind {
        EventKind::CampaignCreated => (
            extract_field(value, &["owner"]),
            extract_field(value, &["amount_needed"]),
            None,
        ),
        EventKind::DonationReceived => (
            extract_field(value, &["donor"]),
            extract_field(value, &["amount"]),
            None,
        ),
        EventKind::MilestoneSet => (
            extract_field(value, &["owner"]),
            extract_field(value, &["amount"]),
            extract_field(value, &["index"]),
        ),
        EventKind::MilestoneApproved => (
            extract_field(value, &["owner"]),
            extract_field(value, &["amount"]),
            extract_field(value, &["description"]),
        ),
        EventKind::FundsWithdrawn => (
            extract_field(value, &["owner"]),
            extract_field(value, &["amount"]),
            None,
        ),
        EventKind::Transfer | EventKind::Approval => (
            raw.topic.get(1).map(|t| extract_scalar(t)),
            scalar_value(value),
            raw.topic.get(2).map(|t| extract_scalar(t)),
        ),
        EventKind::Issued => (
            raw.topic.get(1).map(|t| extract_scalar(t)),
            scalar_value(value),
            None,
        ),
        EventKind::Unknown => (None, None, None),
    }
}

fn scalar_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) => extract_field(value, &["value"]),
        _ => None,
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Extract a scalar from a topic entry.
/// The RPC may return `{"type":"symbol","value":"created"}` or just the raw string.
fn extract_scalar(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        match v.get("value") {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
