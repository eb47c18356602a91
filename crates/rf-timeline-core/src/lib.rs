//! # rf-timeline-core
//!
//! Core types for the rf-timeline event fusion system.
//!
//! This crate provides the building blocks shared by every other rf-timeline
//! crate:
//!
//! - **Event model**: [`Event`], [`EventSource`] and [`Attributes`], the single
//!   immutable record that both the wireless extractor and the acoustic
//!   detector produce.
//! - **Alignment**: the [`OffsetEstimator`] strategy trait with the
//!   [`FixedOffset`] and [`FirstEventOffset`] implementations, and [`align`]
//!   which retimes acoustic events into the capture's epoch time base.
//! - **Fusion**: [`Timeline`], the time-sorted merge of both streams consumed by
//!   the motif matcher and the triplet miner.
//! - **Errors**: [`CoreError`] and the [`CoreResult`] alias.
//!
//! ## Example
//!
//! ```rust
//! use rf_timeline_core::{align, Attributes, Event, EventSource, FirstEventOffset, Timeline};
//!
//! let wifi = vec![Event::new(1_700_000_000.0, EventSource::Wireless, "wifi_beacon_5g_20", Attributes::new()).unwrap()];
//! let audio = vec![Event::new(0.5, EventSource::Acoustic, "ultra_18_21khz", Attributes::new()).unwrap()];
//!
//! let aligned = align(audio, &wifi, &FirstEventOffset);
//! assert_eq!(aligned.offset, Some(1_699_999_999.5));
//!
//! let timeline = Timeline::fuse(wifi, aligned.events);
//! assert_eq!(timeline.len(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod align;
pub mod error;
pub mod event;
pub mod timeline;

pub use align::{align, Alignment, FirstEventOffset, FixedOffset, OffsetEstimator};
pub use error::{CoreError, CoreResult};
pub use event::{Attributes, Event, EventSource};
pub use timeline::{Timeline, TimelineRecord};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::align::{align, FirstEventOffset, FixedOffset, OffsetEstimator};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::event::{Attributes, Event, EventSource};
    pub use crate::timeline::Timeline;
}
