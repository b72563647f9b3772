use access_history_shared::types::CanonicalEvent;
use serde::Serialize;

/// Linear-in-time mapping from epoch seconds onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemporalScale {
    domain: (u64, u64),
    range: (f64, f64),
}

impl TemporalScale {
    /// `domain` endpoints are reordered if given backwards.
    pub fn new(domain: (u64, u64), range: (f64, f64)) -> Self {
        let domain = (domain.0.min(domain.1), domain.0.max(domain.1));
        Self { domain, range }
    }

    /// Domain spanning the earliest to the latest event. With no events the
    /// domain collapses to a single instant at 0.
    pub fn from_events(events: &[CanonicalEvent], range: (f64, f64)) -> Self {
        let domain = time_extent(events).unwrap_or((0, 0));
        Self::new(domain, range)
    }

    /// Domain spanning the earliest event to `now`, for views whose upper
    /// bound follows the clock. Events later than `now` stretch the domain.
    pub fn live(events: &[CanonicalEvent], now: u64, range: (f64, f64)) -> Self {
        let domain = match time_extent(events) {
            Some((first, last)) => (first.min(now), last.max(now)),
            None => (now, now),
        };
        Self::new(domain, range)
    }

    pub fn domain(&self) -> (u64, u64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    pub fn apply(&self, timestamp: u64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if self.is_degenerate() {
            0.5
        } else {
            (timestamp as f64 - d0 as f64) / (d1 - d0) as f64
        };
        r0 + t * (r1 - r0)
    }

    /// Timestamp under pixel `position`, clamped to the domain.
    pub fn invert(&self, position: f64) -> u64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() || r0 == r1 || !position.is_finite() {
            return d0;
        }
        let t = ((position - r0) / (r1 - r0)).clamp(0.0, 1.0);
        let offset = (t * (d1 - d0) as f64).round() as u64;
        d0 + offset.min(d1 - d0)
    }
}

fn time_extent(events: &[CanonicalEvent]) -> Option<(u64, u64)> {
    events.iter().map(CanonicalEvent::timestamp).fold(None, |extent, ts| match extent {
        None => Some((ts, ts)),
        Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
    })
}
