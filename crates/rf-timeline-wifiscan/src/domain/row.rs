//! A single row of capture fields.
//!
//! Column names follow the Wireshark field names so a CSV export or a
//! `tshark -T fields` dump deserializes directly. Every field is optional:
//! missing columns and empty cells both become `None`.

use serde::Deserialize;

/// Frequencies below this are taken to be MHz rather than Hz.
const MHZ_CUTOFF: f64 = 100_000.0;

/// Best-effort fields of one captured frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaptureRow {
    /// `frame.time_epoch`
    #[serde(rename = "frame.time_epoch", default)]
    pub time_epoch: Option<String>,

    /// `wlan.fc.type_subtype`, numeric (`8`) or descriptive (`Beacon frame`)
    #[serde(rename = "wlan.fc.type_subtype", default)]
    pub type_subtype: Option<String>,

    /// `wlan_mgt.ssid`
    #[serde(rename = "wlan_mgt.ssid", default)]
    pub ssid: Option<String>,

    /// `wlan_mgt.tag.ssid`, used by some dissector versions instead of `wlan_mgt.ssid`
    #[serde(rename = "wlan_mgt.tag.ssid", default)]
    pub ssid_tag: Option<String>,

    /// `wlan_radio.frequency`, MHz or Hz
    #[serde(rename = "wlan_radio.frequency", default)]
    pub frequency: Option<String>,

    /// `wlan_radio.channel_width`, enumeration code or MHz text
    #[serde(rename = "wlan_radio.channel_width", default)]
    pub channel_width: Option<String>,
}

impl CaptureRow {
    /// Capture time in epoch seconds, if present and a finite number.
    pub fn timestamp(&self) -> Option<f64> {
        parse_finite(self.time_epoch.as_deref()?)
    }

    /// Whether the frame type/subtype identifies a beacon.
    pub fn is_beacon(&self) -> bool {
        let subtype = self.type_subtype.as_deref().unwrap_or("");
        subtype.contains("Beacon") || subtype.trim() == "8"
    }

    /// Radio frequency normalized to Hz.
    pub fn frequency_hz(&self) -> Option<f64> {
        let f = parse_finite(self.frequency.as_deref()?)?;
        Some(if f < MHZ_CUTOFF { f * 1e6 } else { f })
    }

    /// SSID, falling back to the tagged-parameter column.
    pub fn ssid(&self) -> Option<&str> {
        self.ssid
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.ssid_tag.as_deref())
    }
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
