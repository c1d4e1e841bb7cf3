//! Operator notices
//!
//! Short status lines shown to the operator, mirrored into the log.

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Info => "ℹ️",
            NoticeKind::Success => "✅",
            NoticeKind::Warning => "⚠️",
            NoticeKind::Error => "❌",
        }
    }
}

/// Render a notice line
pub fn format_notice(kind: NoticeKind, message: &str) -> String {
    format!("{}  {}", kind.icon(), message)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Notifier;

impl Notifier {
    pub fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Info | NoticeKind::Success => tracing::info!(notice = message),
            NoticeKind::Warning => tracing::warn!(notice = message),
            NoticeKind::Error => tracing::error!(notice = message),
        }

        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", format_notice(kind, message));
        let _ = out.flush();
    }

    pub fn info(&self, message: &str) {
        self.notify(NoticeKind::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.notify(NoticeKind::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.notify(NoticeKind::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.notify(NoticeKind::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_notice() {
        assert_eq!(format_notice(NoticeKind::Success, "Saved"), "✅  Saved");
        assert!(format_notice(NoticeKind::Warning, "Careful").ends_with("Careful"));
    }
}
