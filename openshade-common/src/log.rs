//! The apply log surfaced to users after a patch pass.

/// How bad a log entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// One entry in the apply log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub severity: Severity,
    pub message: String,
}

impl LogEvent {
    pub fn info(message: impl Into<String>) -> Self {
        LogEvent {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        LogEvent {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        LogEvent {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Ordered collection of log entries from one load or apply pass.
pub type Log = Vec<LogEvent>;

/// Whether any entry reached [`Severity::Error`].
pub fn has_errors(log: &[LogEvent]) -> bool {
    log.iter().any(|e| e.severity == Severity::Error)
}
