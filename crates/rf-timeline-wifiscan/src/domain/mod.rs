//! Domain types for the wireless side of the timeline.

pub mod band;
pub mod row;

pub use band::{classify_band, normalize_width, width_from_code, Band};
pub use row::CaptureRow;
