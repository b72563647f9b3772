//! Time-window filtering driven by a brush selection.

use std::borrow::Cow;

use access_history_shared::types::{CanonicalEvent, TimeWindow};
use tracing::debug;

use crate::projection::TemporalScale;

/// Events strictly inside `window`.
///
/// With no window the input is returned borrowed and untouched. Boundary
/// events are excluded, so filtering is idempotent.
pub fn filter_by_window<'a>(
    events: &'a [CanonicalEvent],
    window: Option<&TimeWindow>,
) -> Cow<'a, [CanonicalEvent]> {
    match window {
        None => Cow::Borrowed(events),
        Some(window) => Cow::Owned(
            events
                .iter()
                .filter(|event| window.contains(event.timestamp()))
                .cloned()
                .collect(),
        ),
    }
}

/// The brush state of one history view.
///
/// Owned by the caller and passed along with each render; nothing is shared
/// between views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrushSelection {
    window: Option<TimeWindow>,
}

impl BrushSelection {
    /// A selection covering the full range.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self) -> Option<&TimeWindow> {
        self.window.as_ref()
    }

    pub fn select(&mut self, window: TimeWindow) {
        self.window = Some(window);
    }

    /// Select the time range under a brush dragged from `x0` to `x1` on a
    /// chart drawn with `scale`. Drag direction does not matter. A brush
    /// with no width (a click) clears the selection, as brush widgets do.
    pub fn select_extent(&mut self, scale: &TemporalScale, x0: f64, x1: f64) -> Option<TimeWindow> {
        if x0 == x1 || !x0.is_finite() || !x1.is_finite() {
            self.reset();
            return None;
        }

        let (a, b) = (scale.invert(x0), scale.invert(x1));
        let window = TimeWindow::new(a.min(b), a.max(b)).ok()?;
        debug!(start = window.start(), end = window.end(), "Brush window selected");
        self.window = Some(window);
        Some(window)
    }

    /// Back to the full range.
    pub fn reset(&mut self) {
        self.window = None;
    }

    pub fn apply<'a>(&self, events: &'a [CanonicalEvent]) -> Cow<'a, [CanonicalEvent]> {
        filter_by_window(events, self.window.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_history_shared::types::Outcome;

    fn example_events() -> Vec<CanonicalEvent> {
        vec![
            CanonicalEvent::access("0xA", 100, Outcome::Denied).unwrap(),
            CanonicalEvent::access("0xA", 200, Outcome::Granted).unwrap(),
            CanonicalEvent::access("0xB", 150, Outcome::Granted).unwrap(),
        ]
    }

    #[test]
    fn test_no_window_borrows_input() {
        let events = example_events();
        let filtered = filter_by_window(&events, None);
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_example_window_excludes_boundaries() {
        let events = example_events();
        let window = TimeWindow::new(100, 200).unwrap();

        let filtered = filter_by_window(&events, Some(&window));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].actor_id(), "0xB");
        assert_eq!(filtered[0].timestamp(), 150);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let events = example_events();
        let window = TimeWindow::new(120, 250).unwrap();

        let once = filter_by_window(&events, Some(&window)).into_owned();
        let twice = filter_by_window(&once, Some(&window)).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_window_and_empty_input() {
        let events = example_events();
        let window = TimeWindow::new(150, 150).unwrap();

        assert!(filter_by_window(&events, Some(&window)).is_empty());
        assert!(filter_by_window(&[], Some(&window)).is_empty());
    }

    #[test]
    fn test_brush_select_extent_and_reset() {
        let events = example_events();
        let scale = TemporalScale::new((100, 200), (0.0, 100.0));
        let mut brush = BrushSelection::new();

        // Dragged right to left.
        let window = brush.select_extent(&scale, 80.0, 20.0).unwrap();
        assert_eq!((window.start(), window.end()), (120, 180));
        assert_eq!(brush.apply(&events).len(), 1);

        brush.reset();
        assert!(brush.window().is_none());
        assert_eq!(brush.apply(&events).len(), 3);
    }

    #[test]
    fn test_brush_click_clears_selection() {
        let scale = TemporalScale::new((100, 200), (0.0, 100.0));
        let mut brush = BrushSelection::new();
        brush.select(TimeWindow::new(110, 190).unwrap());

        assert!(brush.select_extent(&scale, 40.0, 40.0).is_none());
        assert!(brush.window().is_none());
    }
}
