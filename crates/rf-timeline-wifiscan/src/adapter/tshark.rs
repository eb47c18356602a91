//! Adapter that extracts capture rows by invoking `tshark -T fields`.
//!
//! # Design
//!
//! tshark writes one CSV line per frame with a header naming each requested
//! field, so the output goes straight through [`parse_capture_csv`]. Some
//! dissector versions put the SSID in `wlan_mgt.tag.ssid` instead of
//! `wlan_mgt.ssid`; both are requested and [`CaptureRow::ssid`] picks
//! whichever is populated.
//!
//! [`CaptureRow::ssid`]: crate::domain::row::CaptureRow::ssid

use std::path::{Path, PathBuf};
use std::process::Command;

use super::csv_export::parse_capture_csv;
use crate::domain::row::CaptureRow;
use crate::error::WifiScanError;
use crate::port::CaptureSource;

/// Fields requested from tshark, in column order.
pub const TSHARK_FIELDS: [&str; 8] = [
    "frame.time_epoch",
    "wlan.fc.type_subtype",
    "wlan_mgt.tag.ssid",
    "wlan_mgt.ssid",
    "wlan_radio.frequency",
    "wlan_radio.channel_width",
    "wlan.ta",
    "wlan.ra",
];

/// Runs tshark over a pcap/pcapng file.
#[derive(Debug, Clone)]
pub struct TsharkFieldsSource {
    capture: PathBuf,
    /// tshark executable, `"tshark"` unless overridden.
    program: String,
}

impl TsharkFieldsSource {
    pub fn new(capture: impl Into<PathBuf>) -> Self {
        Self {
            capture: capture.into(),
            program: "tshark".to_owned(),
        }
    }

    /// Use a specific tshark binary instead of the one on `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn capture(&self) -> &Path {
        &self.capture
    }

    /// Arguments passed to tshark.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = vec![
            "-r".to_owned(),
            self.capture.display().to_string(),
            "-T".to_owned(),
            "fields".to_owned(),
        ];
        for field in TSHARK_FIELDS {
            args.push("-e".to_owned());
            args.push(field.to_owned());
        }
        for option in ["separator=,", "quote=d", "header=y"] {
            args.push("-E".to_owned());
            args.push(option.to_owned());
        }
        args
    }
}

impl CaptureSource for TsharkFieldsSource {
    fn rows(&self) -> Result<Vec<CaptureRow>, WifiScanError> {
        let args = self.command_args();
        tracing::debug!(program = %self.program, capture = %self.capture.display(), "Running tshark");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| {
                WifiScanError::ProcessError(format!("failed to run `{}`: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WifiScanError::ScanFailed {
                reason: format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            });
        }

        parse_capture_csv(output.stdout.as_slice())
    }

    fn describe(&self) -> String {
        format!("{} fields of {}", self.program, self.capture.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_args_request_all_fields() {
        let source = TsharkFieldsSource::new("/captures/session.pcapng");
        let args = source.command_args();

        assert_eq!(&args[..4], &["-r", "/captures/session.pcapng", "-T", "fields"]);
        let requested: Vec<&str> = args
            .windows(2)
            .filter(|w| w[0] == "-e")
            .map(|w| w[1].as_str())
            .collect();
        assert_eq!(requested, TSHARK_FIELDS.to_vec());
        assert!(args.ends_with(&[
            "-E".to_owned(),
            "separator=,".to_owned(),
            "-E".to_owned(),
            "quote=d".to_owned(),
            "-E".to_owned(),
            "header=y".to_owned(),
        ]));
    }

    #[test]
    fn tshark_style_output_uses_tag_ssid() {
        let stdout = "\
frame.time_epoch,wlan.fc.type_subtype,wlan_mgt.tag.ssid,wlan_mgt.ssid,wlan_radio.frequency,wlan_radio.channel_width,wlan.ta,wlan.ra
\"1700000000.5\",\"8\",\"tagged\",\"\",\"5180\",\"0\",\"aa:bb:cc:dd:ee:ff\",\"ff:ff:ff:ff:ff:ff\"
";
        let rows = parse_capture_csv(stdout.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ssid(), Some("tagged"));
        assert!(rows[0].is_beacon());
    }

    #[test]
    fn missing_program_is_process_error() {
        let source = TsharkFieldsSource::new("/captures/session.pcapng")
            .with_program("/nonexistent/rf-timeline/tshark");
        assert!(matches!(source.rows(), Err(WifiScanError::ProcessError(_))));
    }
}
