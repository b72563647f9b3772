//! The report printed by the binary: one history load and its projection.

use access_history_pipeline::projection::{BarChart, TimelineChart};
use access_history_pipeline::range_filter::BrushSelection;
use access_history_shared::types::{CanonicalEvent, RankedActor, TimeWindow};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{Dependencies, HistoryError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub asset_id: Option<String>,
    pub events: Vec<CanonicalEvent>,
    pub ranked: Vec<RankedActor>,
    /// Most recent event that was not a denied access.
    pub latest_access: Option<CanonicalEvent>,
    pub window: Option<TimeWindow>,
    pub bars: BarChart,
    pub timeline: TimelineChart,
}

/// Load the configured history and project it at time `now`.
#[instrument(skip_all, fields(history_path = %deps.settings.history_path.display()))]
pub async fn build_report(deps: &Dependencies, now: u64) -> Result<Report, HistoryError> {
    let history = deps.load_history()?;
    let snapshot = deps.view.load(&history).await?;

    let mut brush = BrushSelection::new();
    if let Some(window) = deps.settings.window {
        brush.select(window);
    }
    let projection = snapshot.project(&brush, &deps.settings.chart, &deps.settings.timeline, now);

    info!(
        events = snapshot.events.len(),
        actors = snapshot.ranked.len(),
        bars = projection.bars.bars.len(),
        points = projection.timeline.points.len(),
        "Report built"
    );

    Ok(Report {
        latest_access: snapshot.latest_access().cloned(),
        asset_id: snapshot.asset_id,
        events: snapshot.events,
        ranked: snapshot.ranked,
        window: projection.window,
        bars: projection.bars,
        timeline: projection.timeline,
    })
}
