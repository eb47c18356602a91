//! Timestamp alignment between the capture clock and the audio clock.
//!
//! Capture timestamps are epoch seconds while acoustic detections are seconds
//! since the start of the recording. Alignment moves every acoustic event by a
//! single scalar offset. How that offset is obtained is an [`OffsetEstimator`]
//! so the first-event heuristic can be swapped for a correlation-based one
//! without touching fusion or matching.

use crate::error::{CoreError, CoreResult};
use crate::event::Event;

/// Strategy for deriving the acoustic-to-epoch offset.
pub trait OffsetEstimator {
    /// Return the offset in seconds to add to every acoustic timestamp, or
    /// `None` when there is no basis for an estimate.
    fn estimate(&self, wireless: &[Event], acoustic: &[Event]) -> Option<f64>;

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// An offset supplied by the caller. Always applied, no estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOffset(f64);

impl FixedOffset {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOffset`] if `seconds` is NaN or infinite.
    pub fn new(seconds: f64) -> CoreResult<Self> {
        if !seconds.is_finite() {
            return Err(CoreError::InvalidOffset { value: seconds });
        }
        Ok(Self(seconds))
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl OffsetEstimator for FixedOffset {
    fn estimate(&self, _wireless: &[Event], _acoustic: &[Event]) -> Option<f64> {
        Some(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Assumes the earliest event of each stream happened at the same instant.
///
/// Best effort only: a recording that starts well before the first beacon (or
/// a spurious early detection) skews every acoustic timestamp. Callers that
/// know the true offset should use [`FixedOffset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEventOffset;

impl OffsetEstimator for FirstEventOffset {
    fn estimate(&self, wireless: &[Event], acoustic: &[Event]) -> Option<f64> {
        let wireless_t0 = earliest(wireless)?;
        let acoustic_t0 = earliest(acoustic)?;
        Some(wireless_t0 - acoustic_t0)
    }

    fn name(&self) -> &'static str {
        "first-event"
    }
}

fn earliest(events: &[Event]) -> Option<f64> {
    events.iter().map(Event::timestamp).reduce(f64::min)
}

/// Acoustic events after alignment, with the offset that was applied.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub events: Vec<Event>,
    /// `None` when the estimator had nothing to work with and the events were
    /// returned unchanged.
    pub offset: Option<f64>,
}

/// Move acoustic events onto the wireless time base.
///
/// Every acoustic event is replaced by a shifted copy. When the estimator
/// returns `None` (e.g. [`FirstEventOffset`] with an empty stream) the input is
/// returned as-is.
pub fn align(
    acoustic: Vec<Event>,
    wireless: &[Event],
    estimator: &dyn OffsetEstimator,
) -> Alignment {
    let Some(offset) = estimator.estimate(wireless, &acoustic) else {
        tracing::debug!(
            estimator = estimator.name(),
            wireless = wireless.len(),
            acoustic = acoustic.len(),
            "No alignment basis, acoustic timestamps left unchanged"
        );
        return Alignment {
            events: acoustic,
            offset: None,
        };
    };

    tracing::debug!(estimator = estimator.name(), offset, "Aligning acoustic events");

    let events = acoustic.iter().map(|e| e.shifted(offset)).collect();
    Alignment {
        events,
        offset: Some(offset),
    }
}
