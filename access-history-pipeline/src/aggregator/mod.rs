//! Ranks actors by how often they appear in an asset's history.
//!
//! Grouping is strictly by actor address, so an actor whose name resolved
//! for only some of its events is still counted once. The ranked key is the
//! first resolved name seen for the actor, falling back to the address.

use std::collections::HashMap;

use access_history_shared::types::{CanonicalEvent, Outcome, RankedActor};

/// Count events per actor, most frequent first.
///
/// Every event counts once regardless of its amount. Ties keep the order in
/// which actors were first encountered. The full table is returned; callers
/// slice it for display.
pub fn aggregate(events: &[CanonicalEvent]) -> Vec<RankedActor> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<RankedActor> = Vec::new();
    let mut named: Vec<bool> = Vec::new();

    for event in events {
        let name = event.actor_name().filter(|name| !name.is_empty());

        match positions.get(event.actor_id()) {
            Some(&position) => {
                let actor = &mut ranked[position];
                actor.count += 1;
                if let (false, Some(name)) = (named[position], name) {
                    actor.key = name.to_string();
                    named[position] = true;
                }
            }
            None => {
                positions.insert(event.actor_id(), ranked.len());
                ranked.push(RankedActor {
                    key: name.unwrap_or(event.actor_id()).to_string(),
                    wallet_address: event.actor_id().to_string(),
                    count: 1,
                });
                named.push(name.is_some());
            }
        }
    }

    // `sort_by` is stable, which preserves first-encounter order for ties.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// The most recent event that was not a denied access attempt.
pub fn latest_access(events: &[CanonicalEvent]) -> Option<&CanonicalEvent> {
    events
        .iter()
        .filter(|event| event.outcome() != Outcome::Denied)
        .max_by_key(|event| event.timestamp())
}
