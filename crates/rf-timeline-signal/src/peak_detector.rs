//! Ultrasonic pulse detection.
//!
//! Tracks the mean STFT magnitude inside a frequency band, converts it to dB
//! and flags frames that rise a fixed margin above the recording's median
//! level. Candidates closer together than the minimum separation collapse
//! onto the earliest one.

use rf_timeline_core::{Attributes, Event, EventSource};
use serde::{Deserialize, Serialize};

use crate::audio::AudioBuffer;
use crate::spectrogram::{band_mean_magnitude, StftConfig};
use crate::stats::median;
use crate::{Result, SignalError};

/// Label carried by every detection.
pub const ULTRASONIC_LABEL: &str = "ultra_18_21khz";

/// Prefix shared by all ultrasonic labels.
pub const ULTRASONIC_LABEL_PREFIX: &str = "ultra_";

/// Magnitude floor applied before the dB conversion.
pub const DB_FLOOR_EPSILON: f64 = 1e-12;

/// Detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Lower band edge in Hz (inclusive)
    pub band_low_hz: f64,
    /// Upper band edge in Hz (inclusive)
    pub band_high_hz: f64,
    /// Margin above the median level, in dB
    pub threshold_db: f64,
    /// Minimum spacing between accepted peaks, in seconds
    pub min_separation_s: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            band_low_hz: 18_000.0,
            band_high_hz: 21_000.0,
            threshold_db: 12.0,
            min_separation_s: 0.25,
        }
    }
}

impl DetectorConfig {
    /// Check the band and thresholds.
    pub fn validate(&self) -> Result<()> {
        if !(self.band_low_hz.is_finite() && self.band_low_hz >= 0.0) {
            return Err(SignalError::InvalidConfig(format!(
                "band_low_hz must be a non-negative number, got {}",
                self.band_low_hz
            )));
        }
        if !(self.band_high_hz.is_finite() && self.band_high_hz >= self.band_low_hz) {
            return Err(SignalError::InvalidConfig(format!(
                "band_high_hz ({}) must be >= band_low_hz ({})",
                self.band_high_hz, self.band_low_hz
            )));
        }
        if !self.threshold_db.is_finite() {
            return Err(SignalError::InvalidConfig(format!(
                "threshold_db must be finite, got {}",
                self.threshold_db
            )));
        }
        if !(self.min_separation_s.is_finite() && self.min_separation_s >= 0.0) {
            return Err(SignalError::InvalidConfig(format!(
                "min_separation_s must be a non-negative number, got {}",
                self.min_separation_s
            )));
        }
        Ok(())
    }
}

/// Per-frame band level of a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLevels {
    /// Frame times in seconds from the start of the recording
    pub times: Vec<f64>,
    /// Band level per frame in dB
    pub levels_db: Vec<f64>,
    /// Median of `levels_db`
    pub median_db: f64,
}

impl BandLevels {
    /// Indices of frames strictly above `median_db + margin_db`.
    pub fn candidates(&self, margin_db: f64) -> Vec<usize> {
        let threshold = self.median_db + margin_db;
        self.levels_db
            .iter()
            .enumerate()
            .filter(|(_, level)| **level > threshold)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Band-energy detector for ultrasonic beacons.
#[derive(Debug, Clone)]
pub struct UltrasonicDetector {
    config: DetectorConfig,
    stft: StftConfig,
}

impl UltrasonicDetector {
    /// Create a detector with the default 4096/1024 Hann STFT.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stft: StftConfig::default(),
        })
    }

    /// Replace the STFT parameters.
    pub fn with_stft(mut self, stft: StftConfig) -> Self {
        self.stft = stft;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Band level per frame, or `None` when the recording is empty or no
    /// frequency bin falls inside the band.
    pub fn band_levels(&self, audio: &AudioBuffer) -> Result<Option<BandLevels>> {
        if audio.is_empty() {
            return Ok(None);
        }
        let sample_rate = audio.sample_rate();
        let mono = audio.to_mono();

        let Some(means) = band_mean_magnitude(
            &mono,
            sample_rate,
            &self.stft,
            self.config.band_low_hz,
            self.config.band_high_hz,
        )?
        else {
            tracing::warn!(
                low_hz = self.config.band_low_hz,
                high_hz = self.config.band_high_hz,
                nyquist_hz = sample_rate / 2.0,
                "No spectrogram bins inside detection band"
            );
            return Ok(None);
        };

        let levels_db: Vec<f64> = means
            .iter()
            .map(|&m| 20.0 * m.max(DB_FLOOR_EPSILON).log10())
            .collect();
        let times: Vec<f64> = (0..levels_db.len())
            .map(|k| self.stft.frame_time(k, sample_rate))
            .collect();
        let Some(median_db) = median(&levels_db) else {
            return Ok(None);
        };

        Ok(Some(BandLevels {
            times,
            levels_db,
            median_db,
        }))
    }

    /// Detect pulses, timestamped in seconds from the start of the recording.
    pub fn detect(&self, audio: &AudioBuffer) -> Result<Vec<Event>> {
        let Some(levels) = self.band_levels(audio)? else {
            return Ok(Vec::new());
        };

        let candidates = levels.candidates(self.config.threshold_db);
        let candidate_times: Vec<f64> = candidates.iter().map(|&i| levels.times[i]).collect();
        let accepted = select_peaks(&candidate_times, self.config.min_separation_s);

        let events = accepted
            .into_iter()
            .map(|c| {
                let frame = candidates[c];
                let mut attributes = Attributes::new();
                attributes.insert(
                    "peak_db".to_string(),
                    format!("{:.1}", levels.levels_db[frame]),
                );
                Event::new(
                    levels.times[frame],
                    EventSource::Acoustic,
                    ULTRASONIC_LABEL,
                    attributes,
                )
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::info!(
            frames = levels.levels_db.len(),
            median_db = levels.median_db,
            candidates = candidates.len(),
            detections = events.len(),
            "Ultrasonic detection complete"
        );
        Ok(events)
    }
}

/// Greedy minimum-separation selection over ascending `times`.
///
/// Returns the indices of accepted entries: the first is always taken, each
/// later one only if it is at least `min_separation_s` after the last
/// accepted entry.
pub fn select_peaks(times: &[f64], min_separation_s: f64) -> Vec<usize> {
    let mut accepted = Vec::new();
    let mut last: Option<f64> = None;
    for (i, &t) in times.iter().enumerate() {
        if last.map_or(true, |prev| t - prev >= min_separation_s) {
            accepted.push(i);
            last = Some(t);
        }
    }
    accepted
}
