//! Converts raw order and access-log records into canonical events.
//!
//! Normalisation is total: a malformed row is logged and skipped, never
//! surfaced as an error, because upstream sources are known to be
//! inconsistent. Relative order of the surviving rows is preserved.

use access_history_shared::types::{
    AccessLog, Amount, CanonicalEvent, EventError, Outcome, RawAccessEvent, RawOrder,
};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a raw record was dropped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("missing or invalid timestamp")]
    Timestamp,
    #[error("missing actor id")]
    Actor,
    #[error("missing amount")]
    MissingAmount,
    #[error("{0}")]
    Event(#[from] EventError),
}

/// Normalises one asset's records.
///
/// Output order is denied access events, then granted access events, then
/// orders. Callers that need a different order can concatenate the results
/// of [`normalize_access_events`] and [`normalize_orders`] themselves.
#[instrument(skip_all, fields(orders = orders.len(), access_events = access_log.len()))]
pub fn normalize(orders: &[RawOrder], access_log: &AccessLog) -> Vec<CanonicalEvent> {
    let mut events = Vec::with_capacity(orders.len() + access_log.len());
    events.extend(normalize_access_events(&access_log.denied, Outcome::Denied));
    events.extend(normalize_access_events(&access_log.granted, Outcome::Granted));
    events.extend(normalize_orders(orders));
    events
}

/// Normalises on-chain orders. Each event keeps the order's transaction id
/// and amount text (trimmed of surrounding whitespace), with an
/// `Unspecified` outcome.
pub fn normalize_orders(orders: &[RawOrder]) -> Vec<CanonicalEvent> {
    collect_valid("order", orders.iter().map(order_event))
}

/// Normalises access-log rows, tagging each with `outcome`.
pub fn normalize_access_events(rows: &[RawAccessEvent], outcome: Outcome) -> Vec<CanonicalEvent> {
    collect_valid("access", rows.iter().map(|row| access_event(row, outcome)))
}

fn order_event(order: &RawOrder) -> Result<CanonicalEvent, SkipReason> {
    let timestamp = order
        .created_timestamp
        .as_ref()
        .and_then(|timestamp| timestamp.to_seconds())
        .ok_or(SkipReason::Timestamp)?;
    let actor_id = order.payer_id().ok_or(SkipReason::Actor)?;
    let amount = Amount::parse(order.amount.as_deref().ok_or(SkipReason::MissingAmount)?)?;

    Ok(CanonicalEvent::order(actor_id, timestamp, amount, order.tx.clone())?)
}

fn access_event(row: &RawAccessEvent, outcome: Outcome) -> Result<CanonicalEvent, SkipReason> {
    let timestamp = row
        .timestamp
        .as_ref()
        .and_then(|timestamp| timestamp.to_seconds())
        .ok_or(SkipReason::Timestamp)?;
    let actor_id = row.payer_id().ok_or(SkipReason::Actor)?;

    Ok(CanonicalEvent::access(actor_id, timestamp, outcome)?)
}

fn collect_valid<I>(source: &'static str, results: I) -> Vec<CanonicalEvent>
where
    I: Iterator<Item = Result<CanonicalEvent, SkipReason>>,
{
    let mut events = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in results.enumerate() {
        match result {
            Ok(event) => events.push(event),
            Err(reason) => {
                skipped += 1;
                debug!(source, index, reason = %reason, "Skipping malformed record");
            }
        }
    }

    if skipped > 0 {
        warn!(source, skipped, kept = events.len(), "Dropped malformed history records");
    }
    events
}
