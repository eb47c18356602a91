//! The analysis pipeline: detect, align, fuse, persist.

use std::path::Path;

use anyhow::{Context, Result};
use rf_timeline_core::{
    align, Event, EventSource, FirstEventOffset, FixedOffset, OffsetEstimator, Timeline,
};
use rf_timeline_signal::{AudioBuffer, UltrasonicDetector};

use crate::config::AnalysisConfig;

/// Column names of a persisted timeline.
pub const TIMELINE_HEADER: [&str; 4] = ["ts_epoch", "source", "label", "meta"];

/// A fused timeline plus how it was put together.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub timeline: Timeline,
    /// Offset added to acoustic timestamps, `None` if they were left as-is.
    pub offset: Option<f64>,
    /// Name of the offset estimator used.
    pub estimator: &'static str,
}

impl Analysis {
    pub fn wireless_events(&self) -> usize {
        self.timeline.count_by_source(EventSource::Wireless)
    }

    pub fn acoustic_events(&self) -> usize {
        self.timeline.count_by_source(EventSource::Acoustic)
    }
}

/// Detect ultrasonic pulses in `audio`, move them onto the capture clock and
/// merge them with the `wireless` beacons.
pub fn run(wireless: Vec<Event>, audio: &AudioBuffer, config: &AnalysisConfig) -> Result<Analysis> {
    let detector = UltrasonicDetector::new(config.detector.clone())?;
    let acoustic = detector.detect(audio).context("Ultrasonic detection failed")?;

    let estimator: Box<dyn OffsetEstimator> = match config.audio_offset_s {
        Some(seconds) => Box::new(FixedOffset::new(seconds)?),
        None => Box::new(FirstEventOffset),
    };
    let aligned = align(acoustic, &wireless, estimator.as_ref());
    if aligned.offset.is_none() {
        tracing::warn!(
            wireless = wireless.len(),
            acoustic = aligned.events.len(),
            "Not enough events to estimate an audio offset; acoustic timestamps are relative to the recording"
        );
    }

    let timeline = Timeline::fuse(wireless, aligned.events);
    tracing::info!(
        events = timeline.len(),
        offset = aligned.offset,
        estimator = estimator.name(),
        "Timeline fused"
    );

    Ok(Analysis {
        timeline,
        offset: aligned.offset,
        estimator: estimator.name(),
    })
}

/// Write `timeline` as `ts_epoch,source,label,meta` CSV. The header is
/// written even when the timeline is empty.
pub fn write_timeline(path: &Path, timeline: &Timeline) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create timeline file {}", path.display()))?;

    writer.write_record(TIMELINE_HEADER)?;
    for record in timeline.records()? {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write timeline file {}", path.display()))?;

    tracing::info!(path = %path.display(), events = timeline.len(), "Saved fused timeline");
    Ok(())
}
