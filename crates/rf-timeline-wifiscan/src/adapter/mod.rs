//! Adapter implementations for the [`CaptureSource`](crate::port::CaptureSource) port.
//!
//! - [`CsvExportSource`]: reads "Export Packet Dissections → As CSV" output.
//! - [`TsharkFieldsSource`]: shells out to `tshark -T fields` on a pcap/pcapng.
//!
//! Both feed the same CSV parser, [`parse_capture_csv`].

mod csv_export;
mod tshark;

pub use csv_export::{parse_capture_csv, CsvExportSource};
pub use tshark::{TsharkFieldsSource, TSHARK_FIELDS};
