//! Adapter that reads capture rows from a Wireshark CSV export.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::row::CaptureRow;
use crate::error::WifiScanError;
use crate::port::CaptureSource;

/// Reads a CSV export with (some of) the columns `frame.time_epoch`,
/// `wlan.fc.type_subtype`, `wlan_mgt.ssid`, `wlan_radio.frequency` and
/// `wlan_radio.channel_width`.
#[derive(Debug, Clone)]
pub struct CsvExportSource {
    path: PathBuf,
}

impl CsvExportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureSource for CsvExportSource {
    fn rows(&self) -> Result<Vec<CaptureRow>, WifiScanError> {
        let file = File::open(&self.path).map_err(|e| WifiScanError::FileRead {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        parse_capture_csv(file)
    }

    fn describe(&self) -> String {
        format!("csv export {}", self.path.display())
    }
}

/// Parse header-led CSV into capture rows.
///
/// Columns are matched by name; unknown columns are ignored and absent ones
/// leave the corresponding field `None`. Records that fail to decode are
/// skipped.
pub fn parse_capture_csv<R: Read>(reader: R) -> Result<Vec<CaptureRow>, WifiScanError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.headers()
        .map_err(|e| WifiScanError::ParseError(format!("unreadable header: {e}")))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.deserialize::<CaptureRow>() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                tracing::trace!(error = %e, "Skipping malformed capture record");
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, parsed = rows.len(), "Skipped malformed capture records");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
frame.time_epoch,wlan.fc.type_subtype,wlan_mgt.ssid,wlan_radio.frequency,wlan_radio.channel_width
1700000000.100000,Beacon frame,lab-5g,5180,0
1700000000.200000,8,\"lab, 6g\",6115,2
1700000000.300000,Probe Response,lab-5g,5180,
";

    #[test]
    fn parses_named_columns() {
        let rows = parse_capture_csv(EXPORT.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].time_epoch.as_deref(), Some("1700000000.100000"));
        assert_eq!(rows[0].type_subtype.as_deref(), Some("Beacon frame"));
        assert_eq!(rows[1].ssid.as_deref(), Some("lab, 6g"));
        assert_eq!(rows[1].channel_width.as_deref(), Some("2"));
        assert_eq!(rows[2].channel_width, None);
    }

    #[test]
    fn missing_columns_are_none() {
        let data = "frame.time_epoch,wlan.fc.type_subtype\n1.5,8\n";
        let rows = parse_capture_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time_epoch.as_deref(), Some("1.5"));
        assert_eq!(rows[0].frequency, None);
        assert_eq!(rows[0].ssid, None);
    }

    #[test]
    fn short_records_are_tolerated() {
        let data = "frame.time_epoch,wlan.fc.type_subtype,wlan_radio.frequency\n1.0,8\n2.0,8,5180\n";
        let rows = parse_capture_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].frequency.as_deref(), Some("5180"));
    }

    #[test]
    fn empty_input_gives_no_rows() {
        let rows = parse_capture_csv("".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = CsvExportSource::new("/nonexistent/rf-timeline/export.csv");
        assert!(matches!(
            source.rows(),
            Err(WifiScanError::FileRead { .. })
        ));
    }
}
