//! Pure mappings from domain values (identity, count, time) to plot
//! coordinates.
//!
//! Scales never fail: a degenerate domain (no data, or all values equal)
//! maps everything to the middle of the output range.

mod band;
mod layout;
mod linear;
mod temporal;

pub use band::{BandConfig, BandScale};
pub use layout::{
    bar_chart, timeline_chart, AxisTick, Bar, BarChart, ChartConfig, Margin, TimelineChart,
    TimelineConfig, TimelinePoint,
};
pub use linear::LinearScale;
pub use temporal::TemporalScale;
