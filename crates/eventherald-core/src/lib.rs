//! Core types: events, time windows, selection, message formatting

pub mod event;
pub mod format;
pub mod outcome;
pub mod report;
pub mod select;
pub mod time;
pub mod tracing;

pub use event::Event;
pub use format::{FormatOptions, MessageBuilder, MessageFormatter, MessageStyle, TimeFormat};
pub use outcome::{NotificationOutcome, OutcomeStatus, RunResult};
pub use report::{RecordingSink, Report, ReportSink, TracingSink};
pub use select::{Selection, partition, select};
pub use time::{TimeWindow, WindowBasis, WindowStrategy, parse_utc_offset};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
