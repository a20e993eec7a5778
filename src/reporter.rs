//! Non-fatal diagnostics.
//!
//! Every anomaly the rewriter notices (missing annotation, docblock/hint
//! mismatch, blacklisted type) is strictly advisory: it is reported here
//! and processing continues.  Warnings go to stderr so they never mix with
//! the rewritten source on stdout, and a quiet flag silences them entirely.

use owo_colors::OwoColorize;

/// Sink for the rewriter's warnings.
///
/// Normal mode writes a colorized `WARNING:` line to stderr per message.
/// Capturing mode records messages in memory instead, so tests can assert
/// on diagnostics without scraping stderr.
pub struct Reporter {
    quiet: bool,
    captured: Option<Vec<String>>,
}

impl Reporter {
    /// A reporter writing to stderr.  `quiet` suppresses all output.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            captured: None,
        }
    }

    /// A reporter that records messages in memory instead of printing.
    pub fn capturing() -> Self {
        Self {
            quiet: false,
            captured: Some(Vec::new()),
        }
    }

    /// Report one warning.  No-op when quiet; never fails.
    pub fn warn(&mut self, message: String) {
        if self.quiet {
            return;
        }
        match &mut self.captured {
            Some(messages) => messages.push(message),
            None => eprintln!("{}{message}", "WARNING: ".yellow()),
        }
    }

    /// Messages recorded so far (always empty outside capturing mode).
    pub fn captured(&self) -> &[String] {
        self.captured.as_deref().unwrap_or(&[])
    }
}
