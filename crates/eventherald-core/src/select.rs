//! Event selection against an eligibility window.

use tracing::debug;

use crate::event::Event;
use crate::report::{CATEGORY_SELECTION, ReportSink};
use crate::time::TimeWindow;

/// The result of splitting fetched events by a [`TimeWindow`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Eligible events, ascending by start time, ties in input order.
    pub selected: Vec<&'a Event>,
    /// Rejected events, in input order.
    pub skipped: Vec<&'a Event>,
}

/// Splits `events` into selected and skipped.
///
/// Emits one `selection` breadcrumb per event considered.
pub fn partition<'a>(
    events: &'a [Event],
    window: &TimeWindow,
    sink: &dyn ReportSink,
) -> Selection<'a> {
    let mut selection = Selection::default();

    for event in events {
        if window.contains(event.start_time) {
            debug!(event_id = %event.id, name = %event.name, "selected event");
            sink.breadcrumb(
                CATEGORY_SELECTION,
                &format!("selected \"{}\" ({})", event.name, event.id),
            );
            selection.selected.push(event);
        } else {
            debug!(
                event_id = %event.id,
                name = %event.name,
                start = %event.start_time,
                "skipping event outside window"
            );
            sink.breadcrumb(
                CATEGORY_SELECTION,
                &format!(
                    "skipped \"{}\" ({}): starts {} which is not in window {}",
                    event.name,
                    event.id,
                    event.start_time.to_rfc3339(),
                    window
                ),
            );
            selection.skipped.push(event);
        }
    }

    // sort_by_key is stable, so equal start times keep their input order.
    selection.selected.sort_by_key(|event| event.start_time);
    selection
}

/// Returns the eligible events ordered by start time.
pub fn select<'a>(events: &'a [Event], window: &TimeWindow, sink: &dyn ReportSink) -> Vec<&'a Event> {
    partition(events, window, sink).selected
}
