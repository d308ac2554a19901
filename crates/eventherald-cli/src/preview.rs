//! Dry-run message channel.

use std::io::Write;
use std::sync::Mutex;

use eventherald_providers::{BoxFuture, MessageChannel, ProviderError, ProviderResult};

/// Separates announcements in the preview output.
const SEPARATOR: &str = "----";

/// A [`MessageChannel`] that writes announcements to a writer instead of
/// posting them.
pub struct PreviewChannel<W> {
    out: Mutex<W>,
}

impl PreviewChannel<std::io::Stdout> {
    /// Creates a channel printing to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> PreviewChannel<W> {
    /// Creates a channel writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, channel_id: &str, text: &str) -> std::io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{} #{}", SEPARATOR, channel_id)?;
        writeln!(out, "{}", text)?;
        out.flush()
    }
}

impl<W: Write + Send> MessageChannel for PreviewChannel<W> {
    fn name(&self) -> &str {
        "preview"
    }

    fn post_message<'a>(
        &'a self,
        channel_id: &'a str,
        _token: &'a str,
        text: &'a str,
    ) -> BoxFuture<'a, ProviderResult<()>> {
        let result = self.write(channel_id, text).map_err(|e| {
            ProviderError::configuration(format!("failed to write preview: {}", e))
                .with_provider("preview")
                .with_source(e)
        });
        Box::pin(async move { result })
    }
}
