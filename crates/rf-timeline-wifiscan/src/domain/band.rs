//! Frequency band and channel width classification.
//!
//! Pure functions over the radio fields of a capture row. Neither ever fails:
//! an input that cannot be classified yields `None`.

use std::fmt;

// ---------------------------------------------------------------------------
// Band -- Value Object
// ---------------------------------------------------------------------------

/// Inclusive 2.4 GHz range in Hz.
pub const BAND_2G4_HZ: (f64, f64) = (2400e6, 2500e6);
/// Inclusive 5 GHz range in Hz.
pub const BAND_5G_HZ: (f64, f64) = (5150e6, 5945e6);
/// Inclusive 6 GHz range in Hz. Overlaps [`BAND_5G_HZ`] between 5925 and 5945 MHz.
pub const BAND_6G_HZ: (f64, f64) = (5925e6, 7125e6);

/// Coarse WiFi frequency allocation of a beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// 2.4 GHz
    Band2_4GHz,
    /// 5 GHz
    Band5GHz,
    /// 6 GHz (Wi-Fi 6E / 7)
    Band6GHz,
}

impl Band {
    /// Token used inside event labels (`2g4`, `5g`, `6g`).
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Band2_4GHz => "2g4",
            Self::Band5GHz => "5g",
            Self::Band6GHz => "6g",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Classify a carrier frequency in Hz.
///
/// Ranges are checked in declaration order, so a frequency inside the 5g/6g
/// overlap resolves to [`Band::Band5GHz`].
pub fn classify_band(freq_hz: Option<f64>) -> Option<Band> {
    let f = freq_hz?;
    let within = |(lo, hi): (f64, f64)| lo <= f && f <= hi;

    if within(BAND_2G4_HZ) {
        Some(Band::Band2_4GHz)
    } else if within(BAND_5G_HZ) {
        Some(Band::Band5GHz)
    } else if within(BAND_6G_HZ) {
        Some(Band::Band6GHz)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Channel width
// ---------------------------------------------------------------------------

/// Map a `wlan_radio.channel_width` enumeration code to MHz.
///
/// Code 4 is 80+80 MHz and is reported as `80`.
pub fn width_from_code(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("20"),
        1 => Some("40"),
        2 => Some("80"),
        3 => Some("160"),
        4 => Some("80"),
        5 => Some("5"),
        6 => Some("10"),
        _ => None,
    }
}

/// Normalize a channel-width field to a bare MHz number.
///
/// Accepts either an enumeration code (`"0"`..`"6"`) or free text that already
/// carries the width (`"40MHz"`, `"80 MHz"`). For the latter, the first run of
/// decimal digits is returned.
pub fn normalize_width(field: Option<&str>) -> Option<String> {
    let text = field?.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(width) = text.parse::<i64>().ok().and_then(width_from_code) {
        return Some(width.to_owned());
    }

    first_digit_run(text).map(str::to_owned)
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}
