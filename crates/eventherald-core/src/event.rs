//! The event type announced by a run.
//!
//! [`Event`] is the provider-agnostic shape of a scheduled occurrence after it
//! has been fetched from an event source. The core only reads and projects
//! events; it never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled occurrence from an event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique identifier from the source.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form, possibly multi-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where the event happens, if the source knows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// When the event starts. This is the only temporal field consulted.
    pub start_time: DateTime<Utc>,
}

impl Event {
    /// Creates an event with no description or location.
    pub fn new(id: impl Into<String>, name: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            location: None,
            start_time,
        }
    }

    /// Builder: set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the description if it has visible content.
    pub fn description_text(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// Returns the location if it has visible content.
    pub fn location_text(&self) -> Option<&str> {
        non_blank(self.location.as_deref()).map(str::trim)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 6, 18, 0, 0).unwrap()
    }

    #[test]
    fn builder() {
        let event = Event::new("1", "Game Night", start())
            .with_description("Bring snacks")
            .with_location("Hall A");

        assert_eq!(event.id, "1");
        assert_eq!(event.name, "Game Night");
        assert_eq!(event.description_text(), Some("Bring snacks"));
        assert_eq!(event.location_text(), Some("Hall A"));
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let event = Event::new("1", "Game Night", start())
            .with_description("  \n ")
            .with_location("");

        assert_eq!(event.description_text(), None);
        assert_eq!(event.location_text(), None);
    }

    #[test]
    fn location_is_trimmed() {
        let event = Event::new("1", "Game Night", start()).with_location("  Hall A \n");
        assert_eq!(event.location_text(), Some("Hall A"));
    }

    #[test]
    fn start_time_is_offset_independent() {
        let a: Event = serde_json::from_str(
            r#"{"id":"1","name":"x","start_time":"2025-02-06T18:00:00Z"}"#,
        )
        .unwrap();
        let b: Event = serde_json::from_str(
            r#"{"id":"1","name":"x","start_time":"2025-02-06T20:00:00+02:00"}"#,
        )
        .unwrap();

        assert_eq!(a.start_time, b.start_time);
        assert_eq!(a, b);
    }
}
