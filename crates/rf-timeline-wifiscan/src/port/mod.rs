//! Port definitions for obtaining capture rows.
//!
//! The extractor only needs rows; where they come from (a CSV export, a
//! `tshark` subprocess, a test double) is hidden behind [`CaptureSource`].

mod capture_source;

pub use capture_source::CaptureSource;
