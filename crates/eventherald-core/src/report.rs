//! Advisory error-reporting sink.
//!
//! Components that want operators to see what happened during a run take a
//! `&dyn ReportSink`. Every method returns `()`: a sink can observe a run but
//! has no way to change its outcome.

use std::error::Error;
use std::sync::Mutex;

use tracing::{error, info};

/// Breadcrumb category for per-event selection decisions.
pub const CATEGORY_SELECTION: &str = "selection";
/// Breadcrumb category for dispatch results.
pub const CATEGORY_DISPATCH: &str = "dispatch";
/// Breadcrumb category for run lifecycle steps.
pub const CATEGORY_RUN: &str = "run";

/// Receives breadcrumbs and error reports from a run.
pub trait ReportSink: Send + Sync {
    /// Records a short, categorized trail entry.
    fn breadcrumb(&self, category: &str, message: &str);

    /// Reports an error. `context` says what was being attempted.
    fn capture_error(&self, context: &str, error: &(dyn Error + 'static));
}

/// Forwards reports to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn breadcrumb(&self, category: &str, message: &str) {
        info!(target: "eventherald::report", category, "{}", message);
    }

    fn capture_error(&self, context: &str, error: &(dyn Error + 'static)) {
        let chain = error_chain(error);
        error!(target: "eventherald::report", context, error = %chain, "error reported");
    }
}

/// A report captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// A breadcrumb with its category and message.
    Breadcrumb { category: String, message: String },
    /// An error report with its context and rendered error chain.
    Error { context: String, error: String },
}

/// Keeps every report in memory, in arrival order.
///
/// Useful in tests and for callers that want to inspect a run afterwards.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<Report>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every report so far.
    pub fn reports(&self) -> Vec<Report> {
        self.lock().clone()
    }

    /// Returns the messages of breadcrumbs in `category`.
    pub fn breadcrumbs(&self, category: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Report::Breadcrumb { category: c, message } if c == category => {
                    Some(message.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Returns the error reports as `(context, error)` pairs.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.lock()
            .iter()
            .filter_map(|r| match r {
                Report::Error { context, error } => Some((context.clone(), error.clone())),
                Report::Breadcrumb { .. } => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Report>> {
        // Reports recorded before a panic are still valid.
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ReportSink for RecordingSink {
    fn breadcrumb(&self, category: &str, message: &str) {
        self.lock().push(Report::Breadcrumb {
            category: category.to_string(),
            message: message.to_string(),
        });
    }

    fn capture_error(&self, context: &str, error: &(dyn Error + 'static)) {
        self.lock().push(Report::Error {
            context: context.to_string(),
            error: error_chain(error),
        });
    }
}

/// Renders an error and its sources as `outer: inner: root`.
///
/// A source whose message is already the tail of the rendering is not
/// repeated.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
