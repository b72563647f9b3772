//! Chart geometry for the history page: the "most frequent accessors" bar
//! chart and the access timeline with its brush strip.

use access_history_shared::types::{CanonicalEvent, Outcome, RankedActor};
use serde::Serialize;
use tracing::debug;

use super::{BandConfig, BandScale, LinearScale, TemporalScale};

const CHART_SEPARATION: f64 = 30.0;
const BRUSH_MARGIN: Margin = Margin {
    top: 10.0,
    right: 20.0,
    bottom: 15.0,
    left: 50.0,
};
/// Inset of the brush strip's time axis from both brush edges.
const BRUSH_INSET: f64 = 50.0;

/// Geometry of the bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Space above and below the plot, taken off `height`.
    pub vertical_margin: f64,
    pub band_padding: f64,
    pub max_bars: usize,
    pub round: bool,
    pub axis_ticks: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1125.0,
            height: 400.0,
            margin_left: 20.0,
            margin_right: 30.0,
            vertical_margin: 120.0,
            band_padding: 0.4,
            max_bars: 10,
            round: true,
            axis_ticks: 5,
        }
    }
}

impl ChartConfig {
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.vertical_margin).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub key: String,
    pub label: String,
    pub wallet_address: String,
    pub count: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub bars: Vec<Bar>,
    pub x_scale: BandScale,
    pub y_scale: LinearScale,
    pub ticks: Vec<AxisTick>,
    pub plot_height: f64,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Lays out the top `max_bars` of `ranked` as vertical bars.
///
/// Bands are keyed by wallet address, which stays unique even when two
/// actors resolve to the same name. An empty table gives an empty chart.
pub fn bar_chart(ranked: &[RankedActor], config: &ChartConfig) -> BarChart {
    let top = &ranked[..ranked.len().min(config.max_bars)];
    let plot_height = config.plot_height();

    let x_scale = BandScale::new(
        top.iter().map(|actor| actor.wallet_address.clone()).collect(),
        (config.margin_left, config.width - config.margin_right),
        BandConfig::uniform(config.band_padding, config.round),
    );
    let mut y_scale = LinearScale::magnitudes(top.iter().map(|actor| actor.count as f64), plot_height);
    if config.round {
        y_scale = y_scale.rounded();
    }

    let bars = top
        .iter()
        .filter_map(|actor| {
            let x = x_scale.position(&actor.wallet_address)?;
            let y = y_scale.apply(actor.count as f64);
            Some(Bar {
                key: actor.key.clone(),
                label: actor.label(),
                wallet_address: actor.wallet_address.clone(),
                count: actor.count,
                x,
                y,
                width: x_scale.bandwidth(),
                height: plot_height - y,
            })
        })
        .collect::<Vec<_>>();

    let ticks = y_scale
        .ticks(config.axis_ticks)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: y_scale.apply(value),
        })
        .collect();

    debug!(bars = bars.len(), ranked = ranked.len(), "Bar chart laid out");

    BarChart {
        bars,
        x_scale,
        y_scale,
        ticks,
        plot_height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 50.0,
            bottom: 20.0,
            left: 50.0,
        }
    }
}

/// Geometry of the timeline and its brush strip.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Tighter spacing between the timeline and the brush strip.
    pub compact: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            width: 1125.0,
            height: 400.0,
            margin: Margin::default(),
            compact: false,
        }
    }
}

impl TimelineConfig {
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    fn top_chart_height(&self) -> f64 {
        let bottom_margin = if self.compact {
            CHART_SEPARATION / 2.0
        } else {
            CHART_SEPARATION + 10.0
        };
        0.8 * self.inner_height() - bottom_margin
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        self.top_chart_height().max(0.0)
    }

    pub fn brush_height(&self) -> f64 {
        let bottom_chart = self.inner_height() - self.top_chart_height() - CHART_SEPARATION;
        (bottom_chart - BRUSH_MARGIN.top - BRUSH_MARGIN.bottom).max(0.0)
    }

    /// Pixel span of the brush strip's time axis.
    pub fn brush_range(&self) -> (f64, f64) {
        let brush_width = (self.width - BRUSH_MARGIN.left - BRUSH_MARGIN.right).max(0.0);
        (BRUSH_INSET, brush_width - BRUSH_INSET)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub actor_id: String,
    pub label: String,
    pub timestamp: u64,
    pub outcome: Outcome,
    pub amount: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineChart {
    pub points: Vec<TimelinePoint>,
    pub time_scale: TemporalScale,
    pub amount_scale: LinearScale,
    /// Live scale of the brush strip, running up to `now`. Brush pixel
    /// extents are inverted through this scale.
    pub brush_scale: TemporalScale,
    pub plot_width: f64,
    pub plot_height: f64,
    pub brush_height: f64,
}

/// Projects `events` onto the timeline, oldest first.
pub fn timeline_chart(events: &[CanonicalEvent], config: &TimelineConfig, now: u64) -> TimelineChart {
    let mut sorted = events.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|event| event.timestamp());

    let x_range = (config.margin.left, config.width - config.margin.right);
    let time_scale = TemporalScale::from_events(events, x_range);
    let brush_scale = TemporalScale::live(events, now, config.brush_range());
    let plot_height = config.plot_height();
    let amount_scale = LinearScale::magnitudes(events.iter().map(|event| event.amount().value()), plot_height);

    let points = sorted
        .into_iter()
        .map(|event| {
            let amount = event.amount().value();
            TimelinePoint {
                actor_id: event.actor_id().to_string(),
                label: event.display_name(),
                timestamp: event.timestamp(),
                outcome: event.outcome(),
                amount,
                x: time_scale.apply(event.timestamp()),
                y: amount_scale.apply(amount),
            }
        })
        .collect();

    TimelineChart {
        points,
        time_scale,
        amount_scale,
        brush_scale,
        plot_width: config.plot_width(),
        plot_height,
        brush_height: config.brush_height(),
    }
}
