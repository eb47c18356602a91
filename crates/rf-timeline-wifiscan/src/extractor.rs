//! Beacon frame extraction.
//!
//! Turns capture rows into wireless [`Event`]s labelled
//! `wifi_beacon_{band}_{width}`. The transform is pure: the same rows always
//! give the same events, and a bad row is skipped rather than failing the
//! batch.

use rf_timeline_core::{Attributes, Event, EventSource};

use crate::domain::band::{classify_band, normalize_width};
use crate::domain::row::CaptureRow;

/// Prefix shared by every wireless label.
pub const BEACON_LABEL_PREFIX: &str = "wifi_beacon_";

/// Width assumed when the capture does not report one.
///
/// 20 MHz is the narrowest channel every band supports.
pub const DEFAULT_WIDTH_MHZ: &str = "20";

/// What happened to each input row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Rows seen
    pub rows: usize,
    /// Rows without a parseable timestamp
    pub bad_timestamp: usize,
    /// Rows that were not beacon frames
    pub not_beacon: usize,
    /// Beacon rows whose frequency fell outside every band
    pub no_band: usize,
    /// Events produced
    pub emitted: usize,
}

/// Extract beacon events from capture rows.
pub fn extract_beacon_events(rows: &[CaptureRow]) -> Vec<Event> {
    extract_beacon_events_with_stats(rows).0
}

/// Like [`extract_beacon_events`] but also reports why rows were dropped.
pub fn extract_beacon_events_with_stats(rows: &[CaptureRow]) -> (Vec<Event>, ExtractionStats) {
    let mut stats = ExtractionStats {
        rows: rows.len(),
        ..Default::default()
    };
    let mut events = Vec::new();

    for row in rows {
        let Some(timestamp) = row.timestamp() else {
            stats.bad_timestamp += 1;
            continue;
        };
        if !row.is_beacon() {
            stats.not_beacon += 1;
            continue;
        }

        let freq_hz = row.frequency_hz();
        let Some(band) = classify_band(freq_hz) else {
            stats.no_band += 1;
            continue;
        };
        let width = normalize_width(row.channel_width.as_deref())
            .unwrap_or_else(|| DEFAULT_WIDTH_MHZ.to_owned());

        let mut attributes = Attributes::new();
        attributes.insert("ssid".into(), row.ssid().unwrap_or_default().to_owned());
        attributes.insert(
            "freq_hz".into(),
            freq_hz.map(|f| f.to_string()).unwrap_or_default(),
        );
        attributes.insert("width_mhz".into(), width.clone());

        let label = format!("{BEACON_LABEL_PREFIX}{band}_{width}");
        match Event::new(timestamp, EventSource::Wireless, label, attributes) {
            Ok(event) => {
                events.push(event);
                stats.emitted += 1;
            }
            Err(e) => {
                tracing::trace!(error = %e, "Dropping beacon row");
            }
        }
    }

    tracing::debug!(
        rows = stats.rows,
        emitted = stats.emitted,
        bad_timestamp = stats.bad_timestamp,
        not_beacon = stats.not_beacon,
        no_band = stats.no_band,
        "Extracted beacon events"
    );

    (events, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beacon(ts: &str, freq: &str, width: Option<&str>) -> CaptureRow {
        CaptureRow {
            time_epoch: Some(ts.into()),
            type_subtype: Some("8".into()),
            ssid: Some("lab".into()),
            frequency: Some(freq.into()),
            channel_width: width.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn labels_combine_band_and_width() {
        let rows = vec![
            beacon("1.0", "5180", Some("0")),
            beacon("2.0", "6115", Some("2")),
            beacon("3.0", "2412", Some("40MHz")),
        ];
        let events = extract_beacon_events(&rows);
        let labels: Vec<&str> = events.iter().map(Event::label).collect();
        assert_eq!(
            labels,
            vec!["wifi_beacon_5g_20", "wifi_beacon_6g_80", "wifi_beacon_2g4_40"]
        );
        assert!(events.iter().all(|e| e.source() == EventSource::Wireless));
    }

    #[test]
    fn missing_width_defaults_to_20() {
        let events = extract_beacon_events(&[beacon("1.0", "5500", None)]);
        assert_eq!(events[0].label(), "wifi_beacon_5g_20");
        assert_eq!(events[0].attribute("width_mhz"), Some("20"));
    }

    #[test]
    fn attributes_carry_ssid_frequency_and_width() {
        let events = extract_beacon_events(&[beacon("1.0", "5180", Some("1"))]);
        let e = &events[0];
        assert_eq!(e.attribute("ssid"), Some("lab"));
        assert_eq!(e.attribute("freq_hz"), Some("5180000000"));
        assert_eq!(e.attribute("width_mhz"), Some("40"));
    }

    #[test]
    fn missing_ssid_is_empty_string() {
        let mut row = beacon("1.0", "5180", None);
        row.ssid = None;
        let events = extract_beacon_events(&[row]);
        assert_eq!(events[0].attribute("ssid"), Some(""));
    }

    #[test]
    fn bad_rows_are_skipped_not_fatal() {
        let mut probe = beacon("4.0", "5180", None);
        probe.type_subtype = Some("Probe Request".into());

        let rows = vec![
            beacon("not-a-time", "5180", None),
            beacon("1.0", "900", None),
            beacon("2.0", "", None),
            probe,
            beacon("5.0", "5180", None),
        ];

        let (events, stats) = extract_beacon_events_with_stats(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp(), 5.0);
        assert_eq!(
            stats,
            ExtractionStats {
                rows: 5,
                bad_timestamp: 1,
                not_beacon: 1,
                no_band: 2,
                emitted: 1,
            }
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let rows = vec![
            beacon("1.0", "5180", Some("0")),
            beacon("1.5", "6115", None),
            beacon("bad", "6115", None),
        ];
        assert_eq!(extract_beacon_events(&rows), extract_beacon_events(&rows));
    }
}
