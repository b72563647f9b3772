//! One asset's history view: runs a load from raw records to ranked actors
//! and projects the result for rendering.
//!
//! Name resolution is the only suspending step. Every load takes a new
//! generation number before it fans out; if another load started while it
//! was waiting, its results are discarded with [`ViewError::Superseded`]
//! rather than applied over the newer data set.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use access_history_resolver::IdentityResolver;
use access_history_shared::types::{CanonicalEvent, RankedActor, TimeWindow, TransactionHistory};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::aggregator::{aggregate, latest_access};
use crate::errors::ViewError;
use crate::normalizer::normalize;
use crate::projection::{
    bar_chart, timeline_chart, BarChart, ChartConfig, TemporalScale, TimelineChart, TimelineConfig,
};
use crate::range_filter::BrushSelection;

pub struct HistoryView {
    resolver: Arc<IdentityResolver>,
    generation: AtomicU64,
}

impl HistoryView {
    /// Views may share one resolver so its name cache outlives any single view.
    pub fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self {
            resolver,
            generation: AtomicU64::new(0),
        }
    }

    /// Generation of the most recently started load; 0 before any load.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Load `history`: normalise, resolve every actor's name, then rank.
    ///
    /// Names are attached to all events before aggregation so an actor is
    /// never split between its address and its name.
    #[instrument(skip_all, fields(asset_id = history.asset_id().unwrap_or_default()))]
    pub async fn load(&self, history: &TransactionHistory) -> Result<HistorySnapshot, ViewError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let events = normalize(history.orders(), &history.access_log);
        let names = self
            .resolver
            .resolve_all(events.iter().map(CanonicalEvent::actor_id))
            .await;

        let current = self.current_generation();
        if current != generation {
            info!(generation, current, "Discarding superseded history load");
            return Err(ViewError::Superseded { generation, current });
        }

        let events = events
            .into_iter()
            .map(|event| {
                let name = names.get(event.actor_id()).cloned().flatten();
                event.with_actor_name(name)
            })
            .collect::<Vec<_>>();
        let ranked = aggregate(&events);

        info!(
            generation,
            events = events.len(),
            actors = ranked.len(),
            resolved = names.values().filter(|name| name.is_some()).count(),
            "History loaded"
        );

        Ok(HistorySnapshot {
            asset_id: history.asset_id().map(str::to_string),
            generation,
            events,
            ranked,
        })
    }
}

/// The result of one completed load. Read-only; a new load produces a new
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub asset_id: Option<String>,
    pub generation: u64,
    pub events: Vec<CanonicalEvent>,
    pub ranked: Vec<RankedActor>,
}

impl HistorySnapshot {
    pub fn latest_access(&self) -> Option<&CanonicalEvent> {
        latest_access(&self.events)
    }

    /// Lay out the bar chart over all actors and the timeline over the events
    /// inside the brush window. The brush strip always spans the full
    /// history up to `now`.
    pub fn project(
        &self,
        brush: &BrushSelection,
        chart: &ChartConfig,
        timeline: &TimelineConfig,
        now: u64,
    ) -> ChartProjection {
        let visible = brush.apply(&self.events);

        let mut points = timeline_chart(&visible, timeline, now);
        points.brush_scale = TemporalScale::live(&self.events, now, timeline.brush_range());

        debug!(
            visible = visible.len(),
            total = self.events.len(),
            "History projected"
        );

        ChartProjection {
            bars: bar_chart(&self.ranked, chart),
            timeline: points,
            window: brush.window().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProjection {
    pub bars: BarChart,
    pub timeline: TimelineChart,
    pub window: Option<TimeWindow>,
}
