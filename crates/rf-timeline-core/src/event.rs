//! The timeline event value object.
//!
//! Both sources reduce to the same record: a finite timestamp, a source tag, a
//! non-empty label and free-form diagnostic attributes. Fields are private so
//! an [`Event`] cannot be changed after construction; retiming goes through
//! [`Event::shifted`], which returns a new value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Diagnostic key/value data attached to an event (SSID, frequency, peak level).
///
/// Never consulted by matching or mining. A `BTreeMap` keeps the rendered
/// order stable across runs.
pub type Attributes = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// EventSource
// ---------------------------------------------------------------------------

/// Which sensor stream produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    /// Beacon frames from a network capture
    #[serde(rename = "wifi")]
    Wireless,
    /// Ultrasonic pulses detected in an audio recording
    #[serde(rename = "audio")]
    Acoustic,
}

impl EventSource {
    /// Short tag used in persisted timelines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wireless => "wifi",
            Self::Acoustic => "audio",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single timestamped observation on the fused timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    timestamp: f64,
    source: EventSource,
    label: String,
    attributes: Attributes,
}

impl Event {
    /// Create a new event.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEvent`] if `timestamp` is not finite or
    /// `label` is empty.
    pub fn new(
        timestamp: f64,
        source: EventSource,
        label: impl Into<String>,
        attributes: Attributes,
    ) -> CoreResult<Self> {
        if !timestamp.is_finite() {
            return Err(CoreError::invalid_event(format!(
                "timestamp {timestamp} is not finite"
            )));
        }
        let label = label.into();
        if label.is_empty() {
            return Err(CoreError::invalid_event("label must not be empty"));
        }
        Ok(Self {
            timestamp,
            source,
            label,
            attributes,
        })
    }

    /// Seconds; epoch-referenced once the event is on a fused timeline.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up a single attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Return a copy of this event moved by `offset` seconds.
    ///
    /// `offset` must be finite; the estimators in [`crate::align`] guarantee
    /// this.
    pub fn shifted(&self, offset: f64) -> Self {
        debug_assert!(offset.is_finite(), "offset must be finite");
        Self {
            timestamp: self.timestamp + offset,
            source: self.source,
            label: self.label.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_new_rejects_non_finite_timestamp() {
        for ts in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Event::new(ts, EventSource::Wireless, "wifi_beacon_5g_20", Attributes::new());
            assert!(matches!(result, Err(CoreError::InvalidEvent { .. })));
        }
    }

    #[test]
    fn test_new_rejects_empty_label() {
        let result = Event::new(1.0, EventSource::Acoustic, "", Attributes::new());
        assert!(matches!(result, Err(CoreError::InvalidEvent { .. })));
    }

    #[test]
    fn test_shifted_returns_new_event() {
        let original = Event::new(
            2.5,
            EventSource::Acoustic,
            "ultra_18_21khz",
            attrs(&[("peak_db", "-40.0")]),
        )
        .unwrap();

        let moved = original.shifted(100.0);

        assert_eq!(original.timestamp(), 2.5);
        assert_eq!(moved.timestamp(), 102.5);
        assert_eq!(moved.label(), original.label());
        assert_eq!(moved.source(), original.source());
        assert_eq!(moved.attribute("peak_db"), Some("-40.0"));
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(EventSource::Wireless.to_string(), "wifi");
        assert_eq!(EventSource::Acoustic.to_string(), "audio");
        assert_eq!(
            serde_json::to_string(&EventSource::Acoustic).unwrap(),
            "\"audio\""
        );
    }
}
