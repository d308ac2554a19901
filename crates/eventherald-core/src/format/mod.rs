//! Announcement text for events.
//!
//! Every announcement is assembled from ordered clauses:
//!
//! 1. `"<name>" is coming up tomorrow`, followed by ` at <time>` when a
//!    display time is configured.
//! 2. ` at <location>!` when the event has a location, otherwise `!`.
//! 3. A newline and the description when the event has one, either raw
//!    ([`MessageStyle::Plain`]) or block-quoted line by line
//!    ([`MessageStyle::Quoted`]).
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use eventherald_core::format::{FormatOptions, MessageFormatter};
//! use eventherald_core::Event;
//!
//! let start = Utc.with_ymd_and_hms(2025, 2, 6, 18, 30, 0).unwrap();
//! let event = Event::new("1", "Game Night", start).with_location("Hall A");
//!
//! let formatter = MessageFormatter::new(FormatOptions::default());
//! assert_eq!(
//!     formatter.format(&event),
//!     "\"Game Night\" is coming up tomorrow at 18:30 at Hall A!"
//! );
//! ```

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::time::WindowStrategy;

#[cfg(test)]
mod golden_tests;

/// Prefix applied to each description line in [`MessageStyle::Quoted`].
pub const QUOTE_PREFIX: &str = "> ";

/// How the description clause is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStyle {
    /// Description passed through as-is.
    Plain,
    /// Every description line block-quoted.
    #[default]
    Quoted,
}

impl FromStr for MessageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "quoted" => Ok(Self::Quoted),
            other => Err(format!(
                "unknown message style '{}' (expected plain or quoted)",
                other
            )),
        }
    }
}

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    H24,
    /// 12-hour format with AM/PM (e.g., "02:30 PM").
    H12,
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h24" | "24h" | "24" => Ok(Self::H24),
            "h12" | "12h" | "12" => Ok(Self::H12),
            other => Err(format!("unknown time format '{}' (expected h24 or h12)", other)),
        }
    }
}

impl TimeFormat {
    fn pattern(&self) -> &'static str {
        match self {
            Self::H24 => "%H:%M",
            Self::H12 => "%I:%M %p",
        }
    }
}

/// Configuration options for announcement formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Description rendering.
    pub style: MessageStyle,
    /// Whether the base clause carries a time-of-day.
    pub show_time: bool,
    /// Timezone the time-of-day is rendered in.
    pub timezone: FixedOffset,
    /// 12h or 24h clock.
    pub time_format: TimeFormat,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            style: MessageStyle::Quoted,
            show_time: true,
            timezone: utc_offset(),
            time_format: TimeFormat::H24,
        }
    }
}

impl FormatOptions {
    /// Options matching a window strategy: a time-of-day is only shown
    /// when the strategy carries one.
    pub fn for_strategy(strategy: WindowStrategy) -> Self {
        Self {
            show_time: strategy.renders_time(),
            ..Default::default()
        }
    }

    /// Builder: set the description style.
    pub fn with_style(mut self, style: MessageStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: show or hide the time-of-day.
    pub fn with_show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    /// Builder: set the display timezone.
    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// Builder: set the clock format.
    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Renders events into announcement text.
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    options: FormatOptions,
}

impl MessageFormatter {
    /// Creates a formatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Returns the formatter options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats one event. Never fails; absent fields drop their clause.
    pub fn format(&self, event: &Event) -> String {
        MessageBuilder::announce(&event.name)
            .at_time(self.display_time(event.start_time).as_deref())
            .at_location(event.location_text())
            .with_description(event.description_text(), self.options.style)
            .build()
    }

    /// Returns the time-of-day for `start`, if configured to show one.
    pub fn display_time(&self, start: DateTime<Utc>) -> Option<String> {
        self.options.show_time.then(|| {
            start
                .with_timezone(&self.options.timezone)
                .format(self.options.time_format.pattern())
                .to_string()
        })
    }
}

/// Builds an announcement clause by clause.
///
/// Each method appends exactly one clause, so the presence rule of every
/// clause can be exercised on its own.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    text: String,
}

impl MessageBuilder {
    /// Starts with the base clause: `"<name>" is coming up tomorrow`.
    pub fn announce(name: &str) -> Self {
        Self {
            text: format!("\"{}\" is coming up tomorrow", name),
        }
    }

    /// Appends ` at <time>` when a time is given.
    pub fn at_time(mut self, time: Option<&str>) -> Self {
        if let Some(time) = time {
            self.text.push_str(" at ");
            self.text.push_str(time);
        }
        self
    }

    /// Appends ` at <location>!`, or just `!` without a location.
    ///
    /// This always terminates the sentence.
    pub fn at_location(mut self, location: Option<&str>) -> Self {
        if let Some(location) = location.filter(|l| !l.is_empty()) {
            self.text.push_str(" at ");
            self.text.push_str(location);
        }
        self.text.push('!');
        self
    }

    /// Appends a newline and the description when one is given.
    pub fn with_description(mut self, description: Option<&str>, style: MessageStyle) -> Self {
        let Some(description) = description.filter(|d| !d.is_empty()) else {
            return self;
        };

        self.text.push('\n');
        match style {
            MessageStyle::Plain => self.text.push_str(description),
            MessageStyle::Quoted => self.text.push_str(&block_quote(description)),
        }
        self
    }

    /// Finishes the message.
    pub fn build(self) -> String {
        self.text
    }
}

/// Prefixes every line of `text` with [`QUOTE_PREFIX`].
pub fn block_quote(text: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", QUOTE_PREFIX, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 6, 18, 30, 0).unwrap()
    }

    #[test]
    fn parse_style_and_time_format() {
        assert_eq!("Quoted".parse::<MessageStyle>(), Ok(MessageStyle::Quoted));
        assert_eq!(" plain ".parse::<MessageStyle>(), Ok(MessageStyle::Plain));
        assert!("bold".parse::<MessageStyle>().is_err());

        assert_eq!("h12".parse::<TimeFormat>(), Ok(TimeFormat::H12));
        assert_eq!("24h".parse::<TimeFormat>(), Ok(TimeFormat::H24));
        assert!("36h".parse::<TimeFormat>().is_err());
    }

    #[test]
    fn base_clause_only() {
        let text = MessageBuilder::announce("Raid")
            .at_time(None)
            .at_location(None)
            .with_description(None, MessageStyle::Quoted)
            .build();
        assert_eq!(text, "\"Raid\" is coming up tomorrow!");
    }

    #[test]
    fn time_clause() {
        let text = MessageBuilder::announce("Raid").at_time(Some("18:30")).build();
        assert_eq!(text, "\"Raid\" is coming up tomorrow at 18:30");
    }

    #[test]
    fn location_clause_terminates() {
        let with = MessageBuilder::announce("Raid").at_location(Some("Hall A")).build();
        assert_eq!(with, "\"Raid\" is coming up tomorrow at Hall A!");

        let without = MessageBuilder::announce("Raid").at_location(Some("")).build();
        assert_eq!(without, "\"Raid\" is coming up tomorrow!");
    }

    #[test]
    fn description_styles() {
        let plain = MessageBuilder::announce("Raid")
            .at_location(None)
            .with_description(Some("one\ntwo"), MessageStyle::Plain)
            .build();
        assert_eq!(plain, "\"Raid\" is coming up tomorrow!\none\ntwo");

        let quoted = MessageBuilder::announce("Raid")
            .at_location(None)
            .with_description(Some("one\ntwo"), MessageStyle::Quoted)
            .build();
        assert_eq!(quoted, "\"Raid\" is coming up tomorrow!\n> one\n> two");
    }

    #[test]
    fn block_quote_handles_crlf() {
        assert_eq!(block_quote("a\r\nb"), "> a\n> b");
    }

    #[test]
    fn display_time_formats() {
        let h24 = MessageFormatter::new(FormatOptions::default());
        assert_eq!(h24.display_time(start()).as_deref(), Some("18:30"));

        let h12 = MessageFormatter::new(FormatOptions::default().with_time_format(TimeFormat::H12));
        assert_eq!(h12.display_time(start()).as_deref(), Some("06:30 PM"));

        let hidden = MessageFormatter::new(FormatOptions::default().with_show_time(false));
        assert_eq!(hidden.display_time(start()), None);
    }

    #[test]
    fn display_time_uses_target_timezone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let formatter = MessageFormatter::new(FormatOptions::default().with_timezone(tz));
        assert_eq!(formatter.display_time(start()).as_deref(), Some("13:30"));
    }

    #[test]
    fn options_follow_strategy() {
        assert!(FormatOptions::for_strategy(WindowStrategy::RollingOffset).show_time);
        assert!(!FormatOptions::for_strategy(WindowStrategy::CalendarDay).show_time);
    }

    #[test]
    fn style_serde_names() {
        let style: MessageStyle = serde_json::from_str("\"plain\"").unwrap();
        assert_eq!(style, MessageStyle::Plain);
        let format: TimeFormat = serde_json::from_str("\"h12\"").unwrap();
        assert_eq!(format, TimeFormat::H12);
    }
}
