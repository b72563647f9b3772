//! Property tests for the pure stages of the pipeline.

use std::collections::HashMap;

use access_history_pipeline::aggregator::aggregate;
use access_history_pipeline::normalizer::normalize_access_events;
use access_history_pipeline::projection::{timeline_chart, TemporalScale, TimelineConfig};
use access_history_pipeline::range_filter::filter_by_window;
use access_history_shared::types::{
    CanonicalEvent, Outcome, RawAccessEvent, RawAccount, RawTimestamp, TimeWindow,
};
use proptest::prelude::*;

const ACTORS: [&str; 5] = ["0xA", "0xB", "0xC", "0xD", "0xE"];

fn raw_row(timestamp: Option<u32>, actor: Option<usize>) -> RawAccessEvent {
    RawAccessEvent {
        timestamp: timestamp.map(|ts| RawTimestamp::Integer(ts as i64)),
        payer: Some(RawAccount {
            id: Some(actor.map(|index| ACTORS[index].to_string()).unwrap_or_default()),
            name: None,
        }),
    }
}

fn events_strategy() -> impl Strategy<Value = Vec<CanonicalEvent>> {
    prop::collection::vec((0usize..ACTORS.len(), 0u64..1_000), 0..60).prop_map(|rows| {
        rows.into_iter()
            .map(|(actor, ts)| CanonicalEvent::access(ACTORS[actor], ts, Outcome::Granted).unwrap())
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_normalization_keeps_exactly_well_formed_rows(
        rows in prop::collection::vec(
            (prop::option::of(0u32..10_000), prop::option::of(0usize..ACTORS.len())),
            0..60,
        )
    ) {
        let raw = rows.iter().map(|(ts, actor)| raw_row(*ts, *actor)).collect::<Vec<_>>();
        let expected = rows
            .iter()
            .filter_map(|(ts, actor)| Some((ACTORS[(*actor)?].to_string(), (*ts)? as u64)))
            .collect::<Vec<_>>();

        let events = normalize_access_events(&raw, Outcome::Granted);
        let actual = events
            .iter()
            .map(|event| (event.actor_id().to_string(), event.timestamp()))
            .collect::<Vec<_>>();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_aggregation_conserves_counts(events in events_strategy()) {
        let ranked = aggregate(&events);
        prop_assert_eq!(ranked.iter().map(|actor| actor.count).sum::<usize>(), events.len());
    }

    #[test]
    fn prop_aggregation_ranks_stably(events in events_strategy()) {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (index, event) in events.iter().enumerate() {
            first_seen.entry(event.actor_id()).or_insert(index);
        }

        let ranked = aggregate(&events);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                prop_assert!(
                    first_seen[pair[0].wallet_address.as_str()]
                        < first_seen[pair[1].wallet_address.as_str()]
                );
            }
        }
    }

    #[test]
    fn prop_filter_is_idempotent(events in events_strategy(), a in 0u64..1_000, b in 0u64..1_000) {
        let window = TimeWindow::new(a.min(b), a.max(b)).unwrap();

        let once = filter_by_window(&events, Some(&window)).into_owned();
        let twice = filter_by_window(&once, Some(&window)).into_owned();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_filter_excludes_boundaries(events in events_strategy(), a in 0u64..1_000, b in 0u64..1_000) {
        let window = TimeWindow::new(a.min(b), a.max(b)).unwrap();

        let filtered = filter_by_window(&events, Some(&window));
        prop_assert!(filtered
            .iter()
            .all(|event| window.start() < event.timestamp() && event.timestamp() < window.end()));
        let inside = events
            .iter()
            .filter(|event| window.start() < event.timestamp() && event.timestamp() < window.end())
            .count();
        prop_assert_eq!(filtered.len(), inside);
    }

    #[test]
    fn prop_identical_timestamps_project_finitely(timestamp in any::<u64>(), copies in 1usize..8, now in any::<u64>()) {
        let events = (0..copies)
            .map(|_| CanonicalEvent::access("0xA", timestamp, Outcome::Granted).unwrap())
            .collect::<Vec<_>>();

        let chart = timeline_chart(&events, &TimelineConfig::default(), now);
        for point in &chart.points {
            prop_assert!(point.x.is_finite());
            prop_assert!(point.y.is_finite());
        }

        let scale = TemporalScale::from_events(&events, (50.0, 1075.0));
        prop_assert!(scale.apply(timestamp).is_finite());
        prop_assert!(chart.brush_scale.apply(timestamp).is_finite());
    }
}
