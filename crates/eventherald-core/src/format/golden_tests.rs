//! Golden tests for announcement text.
//!
//! Inline insta snapshots cover every combination of time, location and
//! description presence for both description styles.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

use crate::event::Event;
use crate::format::{FormatOptions, MessageFormatter, MessageStyle, TimeFormat};
use crate::time::WindowStrategy;

/// The reference time for all golden tests: 2025-02-05 21:00:00 UTC.
fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 5, 21, 0, 0).unwrap()
}

fn event(location: Option<&str>, description: Option<&str>) -> Event {
    let mut event = Event::new(
        "evt-1",
        "Movie Night",
        reference_time() + Duration::hours(22),
    );
    event.location = location.map(String::from);
    event.description = description.map(String::from);
    event
}

fn formatter(show_time: bool, style: MessageStyle) -> MessageFormatter {
    MessageFormatter::new(
        FormatOptions::default()
            .with_show_time(show_time)
            .with_style(style),
    )
}

const DESCRIPTION: &str = "Popcorn provided.\nBring a blanket.";

// =============================================================================
// Time shown
// =============================================================================

#[test]
fn golden_time_only() {
    let text = formatter(true, MessageStyle::Quoted).format(&event(None, None));
    insta::assert_snapshot!(text, @r#""Movie Night" is coming up tomorrow at 19:00!"#);
}

#[test]
fn golden_time_and_location() {
    let text = formatter(true, MessageStyle::Quoted).format(&event(Some("Hall A"), None));
    insta::assert_snapshot!(text, @r#""Movie Night" is coming up tomorrow at 19:00 at Hall A!"#);
}

#[test]
fn golden_time_and_description() {
    let text = formatter(true, MessageStyle::Quoted).format(&event(None, Some(DESCRIPTION)));
    insta::assert_snapshot!(text, @r#"
    "Movie Night" is coming up tomorrow at 19:00!
    > Popcorn provided.
    > Bring a blanket.
    "#);
}

#[test]
fn golden_time_location_and_description() {
    let text = formatter(true, MessageStyle::Quoted)
        .format(&event(Some("Hall A"), Some(DESCRIPTION)));
    insta::assert_snapshot!(text, @r#"
    "Movie Night" is coming up tomorrow at 19:00 at Hall A!
    > Popcorn provided.
    > Bring a blanket.
    "#);
}

// =============================================================================
// Time hidden (calendar-day deployments)
// =============================================================================

#[test]
fn golden_name_only() {
    let text = formatter(false, MessageStyle::Plain).format(&event(None, None));
    insta::assert_snapshot!(text, @r#""Movie Night" is coming up tomorrow!"#);
}

#[test]
fn golden_location_without_time() {
    let text = formatter(false, MessageStyle::Plain).format(&event(Some("Hall A"), None));
    insta::assert_snapshot!(text, @r#""Movie Night" is coming up tomorrow at Hall A!"#);
}

#[test]
fn golden_plain_description_without_time() {
    let text = formatter(false, MessageStyle::Plain).format(&event(None, Some(DESCRIPTION)));
    insta::assert_snapshot!(text, @r#"
    "Movie Night" is coming up tomorrow!
    Popcorn provided.
    Bring a blanket.
    "#);
}

#[test]
fn golden_plain_everything_without_time() {
    let text = formatter(false, MessageStyle::Plain)
        .format(&event(Some("Hall A"), Some(DESCRIPTION)));
    insta::assert_snapshot!(text, @r#"
    "Movie Night" is coming up tomorrow at Hall A!
    Popcorn provided.
    Bring a blanket.
    "#);
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn golden_blank_fields_are_omitted() {
    let text = formatter(true, MessageStyle::Quoted).format(&event(Some("   "), Some("\n\n")));
    insta::assert_snapshot!(text, @r#""Movie Night" is coming up tomorrow at 19:00!"#);
}

#[test]
fn golden_twelve_hour_clock_in_target_timezone() {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let formatter = MessageFormatter::new(
        FormatOptions::for_strategy(WindowStrategy::RollingOffset)
            .with_timezone(tz)
            .with_time_format(TimeFormat::H12),
    );
    let text = formatter.format(&event(Some("Hall A"), None));
    insta::assert_snapshot!(text, @r#""Movie Night" is coming up tomorrow at 09:00 PM at Hall A!"#);
}

#[test]
fn golden_calendar_day_strategy_has_no_time() {
    let formatter = MessageFormatter::new(FormatOptions::for_strategy(WindowStrategy::CalendarDay));
    let text = formatter.format(&event(None, Some(DESCRIPTION)));
    insta::assert_snapshot!(text, @r#"
    "Movie Night" is coming up tomorrow!
    > Popcorn provided.
    > Bring a blanket.
    "#);
}

#[test]
fn every_combination_has_clauses_in_order() {
    for show_time in [false, true] {
        for location in [None, Some("Hall A")] {
            for description in [None, Some(DESCRIPTION)] {
                let text = formatter(show_time, MessageStyle::Quoted)
                    .format(&event(location, description));
                let first_line = text.lines().next().unwrap();

                assert!(first_line.starts_with("\"Movie Night\" is coming up tomorrow"));
                assert!(first_line.ends_with('!'), "{}", text);
                assert_eq!(first_line.matches('!').count(), 1);
                assert_eq!(first_line.contains(" at 19:00"), show_time);
                assert_eq!(first_line.ends_with(" at Hall A!"), location.is_some());
                assert_eq!(text.lines().count(), if description.is_some() { 3 } else { 1 });
            }
        }
    }
}
