//! # rf-timeline-wifiscan
//!
//! Wireless side of the rf-timeline fusion pipeline.
//!
//! This crate turns tabular capture rows into beacon [`Event`](rf_timeline_core::Event)s:
//!
//! - **Domain types**: [`Band`], [`CaptureRow`], and the pure classifiers
//!   [`classify_band`] and [`normalize_width`]
//! - **Extractor**: [`extract_beacon_events`] -- filters beacon frames and
//!   labels them `wifi_beacon_{band}_{width}`
//! - **Port**: [`CaptureSource`] -- trait abstracting where rows come from
//! - **Adapters**: [`CsvExportSource`] for Wireshark CSV exports and
//!   [`TsharkFieldsSource`] which shells out to `tshark -T fields`

pub mod adapter;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod port;

pub use adapter::{parse_capture_csv, CsvExportSource, TsharkFieldsSource};
pub use domain::band::{classify_band, normalize_width, width_from_code, Band};
pub use domain::row::CaptureRow;
pub use error::WifiScanError;
pub use extractor::{
    extract_beacon_events, extract_beacon_events_with_stats, ExtractionStats,
    BEACON_LABEL_PREFIX, DEFAULT_WIDTH_MHZ,
};
pub use port::CaptureSource;
