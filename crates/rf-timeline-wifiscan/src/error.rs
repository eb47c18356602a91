//! Error types for the rf-timeline-wifiscan crate.
//!
//! Only the adapters fail hard. Row-level problems are absorbed by the
//! extractor and never become a [`WifiScanError`].

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while obtaining capture rows.
#[derive(Debug, Clone)]
pub enum WifiScanError {
    /// The capture or export file could not be opened.
    FileRead {
        /// The file that failed to open.
        path: PathBuf,
        /// Underlying I/O error text.
        reason: String,
    },

    /// The field extraction tool ran but reported failure.
    ScanFailed {
        /// Human-readable description of what went wrong.
        reason: String,
    },

    /// Failed to execute the field extraction subprocess.
    ProcessError(String),

    /// The tabular output could not be parsed at all (e.g. unreadable header).
    ParseError(String),
}

impl fmt::Display for WifiScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileRead { path, reason } => {
                write!(f, "failed to read capture file '{}': {reason}", path.display())
            }
            Self::ScanFailed { reason } => {
                write!(f, "capture field extraction failed: {reason}")
            }
            Self::ProcessError(msg) => {
                write!(f, "capture process error: {msg}")
            }
            Self::ParseError(msg) => {
                write!(f, "capture output parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for WifiScanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_path() {
        let err = WifiScanError::FileRead {
            path: PathBuf::from("/tmp/missing.csv"),
            reason: "No such file or directory".into(),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/missing.csv"));
        assert!(text.contains("No such file"));
    }
}
