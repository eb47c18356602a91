//! The driving port for capture-to-rows extraction.

use crate::domain::row::CaptureRow;
use crate::error::WifiScanError;

/// Port that abstracts how a capture is turned into tabular rows.
///
/// Implementations include:
/// - [`crate::adapter::CsvExportSource`] -- reads a Wireshark CSV export.
/// - [`crate::adapter::TsharkFieldsSource`] -- runs `tshark -T fields`.
pub trait CaptureSource {
    /// Read every row of the capture.
    ///
    /// Malformed individual records are skipped; only a failure to read the
    /// capture as a whole is an error.
    fn rows(&self) -> Result<Vec<CaptureRow>, WifiScanError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}
