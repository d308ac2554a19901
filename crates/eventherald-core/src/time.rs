//! Eligibility windows for announcements.
//!
//! A run decides which events are "coming up tomorrow" by building a
//! [`TimeWindow`] from the current instant. Two strategies exist and a
//! deployment picks exactly one of them through [`WindowStrategy`]:
//!
//! - **Calendar day**: the whole calendar day after `now` in a fixed
//!   reference timezone, matched by date equality.
//! - **Rolling offset**: `[now + 3h, now + 27h)`, a 24 hour span shifted to
//!   absorb a scheduler that fires a few hours before midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hours between `now` and the start of a rolling window.
pub const ROLLING_LEAD_HOURS: i64 = 3;

/// Length of a rolling window in hours.
pub const ROLLING_SPAN_HOURS: i64 = 24;

/// How the eligibility window is derived from the current instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStrategy {
    /// Tomorrow's calendar date in the reference timezone.
    CalendarDay,
    /// `[now + 3h, now + 27h)`.
    #[default]
    RollingOffset,
}

impl WindowStrategy {
    /// Computes the window for `now`.
    ///
    /// `tz` is only consulted by [`WindowStrategy::CalendarDay`].
    pub fn window(&self, now: DateTime<Utc>, tz: FixedOffset) -> TimeWindow {
        match self {
            Self::CalendarDay => TimeWindow::tomorrow(now, tz),
            Self::RollingOffset => TimeWindow::rolling(now),
        }
    }

    /// Returns true when announcements built under this strategy carry a
    /// time-of-day.
    ///
    /// A calendar-day window only knows the date, so its messages stay
    /// date-level.
    pub fn renders_time(&self) -> bool {
        matches!(self, Self::RollingOffset)
    }

    /// Returns the configuration name of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalendarDay => "calendar_day",
            Self::RollingOffset => "rolling_offset",
        }
    }
}

impl fmt::Display for WindowStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "calendar_day" => Ok(Self::CalendarDay),
            "rolling_offset" => Ok(Self::RollingOffset),
            other => Err(format!(
                "unknown window strategy '{}' (expected calendar_day or rolling_offset)",
                other
            )),
        }
    }
}

/// What a [`TimeWindow`] was built from, which decides its membership test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBasis {
    /// Membership is `start <= t < end`.
    Rolling,
    /// Membership is date equality in `offset`.
    CalendarDay {
        /// The target date.
        date: NaiveDate,
        /// The reference timezone.
        offset: FixedOffset,
    },
}

/// The eligibility interval of a single run.
///
/// `start` is inclusive and `end` exclusive for both bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
    basis: WindowBasis,
}

impl TimeWindow {
    /// Creates the rolling `[now + 3h, now + 27h)` window.
    ///
    /// Bounds saturate at the edges of the representable range.
    pub fn rolling(now: DateTime<Utc>) -> Self {
        let start = saturating_add(now, Duration::hours(ROLLING_LEAD_HOURS));
        Self {
            start,
            end: saturating_add(start, Duration::hours(ROLLING_SPAN_HOURS)),
            basis: WindowBasis::Rolling,
        }
    }

    /// Creates a window covering one calendar day in `tz`.
    pub fn for_date(date: NaiveDate, tz: FixedOffset) -> Self {
        let next = date.succ_opt().unwrap_or(date);
        Self {
            start: local_midnight_utc(date, tz),
            end: local_midnight_utc(next, tz),
            basis: WindowBasis::CalendarDay { date, offset: tz },
        }
    }

    /// Creates the window for the day after `now` in `tz`.
    pub fn tomorrow(now: DateTime<Utc>, tz: FixedOffset) -> Self {
        let today = now.with_timezone(&tz).date_naive();
        Self::for_date(today.succ_opt().unwrap_or(today), tz)
    }

    /// Returns how this window was built.
    pub fn basis(&self) -> WindowBasis {
        self.basis
    }

    /// Returns the target date for calendar-day windows.
    pub fn date(&self) -> Option<NaiveDate> {
        match self.basis {
            WindowBasis::CalendarDay { date, .. } => Some(date),
            WindowBasis::Rolling => None,
        }
    }

    /// Returns the duration of this window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks whether `dt` is eligible.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        match self.basis {
            WindowBasis::Rolling => self.start <= dt && dt < self.end,
            WindowBasis::CalendarDay { date, offset } => {
                dt.with_timezone(&offset).date_naive() == date
            }
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.basis {
            WindowBasis::Rolling => write!(
                f,
                "[{}, {})",
                self.start.to_rfc3339(),
                self.end.to_rfc3339()
            ),
            WindowBasis::CalendarDay { date, offset } => write!(f, "{} ({})", date, offset),
        }
    }
}

fn local_midnight_utc(date: NaiveDate, tz: FixedOffset) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    saturating_add(midnight, -Duration::seconds(tz.local_minus_utc().into()))
}

fn saturating_add(t: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    t.checked_add_signed(delta).unwrap_or(if delta < Duration::zero() {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Error returned by [`parse_utc_offset`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid UTC offset '{0}' (expected Z, UTC, or +HH:MM)")]
pub struct OffsetParseError(String);

/// Parses a fixed UTC offset such as `Z`, `UTC`, `+02:00`, `-0530` or `+9`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, OffsetParseError> {
    let trimmed = s.trim();
    let invalid = || OffsetParseError(trimmed.to_string());

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
