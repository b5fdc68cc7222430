//! Human readable status output. Logs go through `tracing` instead.

use console::{Emoji, Term, style};
use ota_client::Error;

pub(crate) static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
pub(crate) static CHECK: Emoji<'_, '_> = Emoji("✅ ", "");
pub(crate) static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
pub(crate) static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
pub(crate) static CLIPBOARD: Emoji<'_, '_> = Emoji("📋 ", "");
pub(crate) static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");
pub(crate) static INBOX: Emoji<'_, '_> = Emoji("📥 ", "");
pub(crate) static OUTBOX: Emoji<'_, '_> = Emoji("📤 ", "");
pub(crate) static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
pub(crate) static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
pub(crate) static RULER: Emoji<'_, '_> = Emoji("📏 ", "");
pub(crate) static REPEAT: Emoji<'_, '_> = Emoji("🔄 ", "");
pub(crate) static HOURGLASS: Emoji<'_, '_> = Emoji("⏳ ", "");
pub(crate) static SPARKLES: Emoji<'_, '_> = Emoji("✨ ", "");
pub(crate) static BULB: Emoji<'_, '_> = Emoji("💡 ", "");

/// What the failed request was doing. Only changes wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Trigger,
    Upload,
}

/// Console sink for status messages. Errors are always written to stderr, everything else is
/// dropped in quiet mode.
#[derive(Debug, Clone)]
pub struct Reporter {
    out: Option<Term>,
    err: Term,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self {
            out: (!quiet).then(Term::stdout),
            err: Term::stderr(),
        }
    }

    pub const fn is_quiet(&self) -> bool {
        self.out.is_none()
    }

    pub(crate) fn line(&self, msg: impl AsRef<str>) {
        if let Some(t) = &self.out {
            let _ = t.write_line(msg.as_ref());
        }
    }

    pub(crate) fn blank(&self) {
        self.line("");
    }

    pub(crate) fn banner(&self, title: &str) {
        self.line(style(title).bold().to_string());
        self.line("=".repeat(50));
    }

    pub(crate) fn warn(&self, msg: impl std::fmt::Display) {
        self.line(format!("{WARNING}{}", style(msg).yellow()));
    }

    pub(crate) fn success(&self, msg: impl std::fmt::Display) {
        self.line(format!("{CHECK}{}", style(msg).green()));
    }

    fn error_line(&self, msg: impl std::fmt::Display) {
        let _ = self.err.write_line(&format!("{CROSS}{}", style(msg).red()));
    }

    /// Explain a failed update request.
    pub(crate) fn failure(&self, action: Action, e: &Error) {
        match e {
            Error::Connection { device, .. } => {
                self.error_line(format!("Connection error: Could not connect to {device}"));
                let _ = self
                    .err
                    .write_line("   Make sure the device is connected to WiFi and reachable");
            }
            Error::Timeout(_) => match action {
                Action::Trigger => self.error_line(format!("Request timeout: {e}")),
                Action::Upload => self.error_line(format!(
                    "Upload timeout ({e}). Firmware may be too large or connection is slow"
                )),
            },
            Error::Http { status, body } => {
                let what = match action {
                    Action::Trigger => "Request",
                    Action::Upload => "Upload",
                };
                self.error_line(format!("{what} failed with status code: {status}"));
                let _ = self.err.write_line(&format!("Response: {body}"));
            }
            Error::Other(msg) if action == Action::Upload => {
                self.error_line(format!("Upload error: {msg}"))
            }
            _ => self.error_line(format!("Error: {e}")),
        }
    }
}
