//! End-to-end checks of the ultrasonic detector on synthetic recordings.

use std::f64::consts::PI;

use rf_timeline_core::EventSource;
use rf_timeline_signal::{
    AudioBuffer, DetectorConfig, UltrasonicDetector, ULTRASONIC_LABEL, ULTRASONIC_LABEL_PREFIX,
};

const SAMPLE_RATE: f64 = 48_000.0;

/// Silence with short 19.5 kHz tone bursts starting at each of `starts`.
fn bursts(duration_s: f64, starts: &[f64], burst_s: f64, amplitude: f64) -> Vec<f64> {
    let n = (duration_s * SAMPLE_RATE) as usize;
    let mut signal = vec![0.0; n];
    for &start in starts {
        let first = (start * SAMPLE_RATE) as usize;
        let last = ((start + burst_s) * SAMPLE_RATE) as usize;
        for (i, sample) in signal.iter_mut().enumerate().take(last.min(n)).skip(first) {
            *sample = amplitude * (2.0 * PI * 19_500.0 * i as f64 / SAMPLE_RATE).sin();
        }
    }
    signal
}

fn detector() -> UltrasonicDetector {
    UltrasonicDetector::new(DetectorConfig::default()).unwrap()
}

#[test]
fn detects_each_burst_once() {
    let starts = [0.5, 1.5, 2.5];
    let audio = AudioBuffer::from_mono(bursts(3.0, &starts, 0.05, 0.5), SAMPLE_RATE).unwrap();

    let events = detector().detect(&audio).unwrap();

    assert_eq!(events.len(), 3, "got {events:?}");
    for (event, expected) in events.iter().zip(starts) {
        assert!(
            (event.timestamp() - expected).abs() < 0.1,
            "detection at {:.3}s, burst at {expected}s",
            event.timestamp()
        );
        assert_eq!(event.source(), EventSource::Acoustic);
        assert_eq!(event.label(), ULTRASONIC_LABEL);
        assert!(event.label().starts_with(ULTRASONIC_LABEL_PREFIX));

        let peak_db = event.attribute("peak_db").unwrap();
        assert!(peak_db.parse::<f64>().is_ok());
        assert_eq!(peak_db.split('.').nth(1).map(str::len), Some(1));
    }
}

#[test]
fn accepted_peaks_respect_min_separation() {
    // Three bursts packed into 0.2 s light up a contiguous run of frames.
    let audio =
        AudioBuffer::from_mono(bursts(3.0, &[1.0, 1.1, 1.2], 0.02, 0.5), SAMPLE_RATE).unwrap();
    let detector = detector();

    let levels = detector.band_levels(&audio).unwrap().unwrap();
    let candidates = levels.candidates(detector.config().threshold_db);
    let events = detector.detect(&audio).unwrap();

    assert!(!events.is_empty());
    assert!(events.len() < candidates.len());
    for pair in events.windows(2) {
        assert!(pair[1].timestamp() - pair[0].timestamp() >= 0.25);
    }
}

#[test]
fn earliest_candidate_wins_over_louder_one() {
    // A faint burst then a much louder one 0.1 s later: both light up one
    // contiguous run of candidate frames shorter than the separation.
    let faint = bursts(3.0, &[1.0], 0.02, 0.05);
    let loud = bursts(3.0, &[1.1], 0.02, 0.8);
    let signal: Vec<f64> = faint.iter().zip(&loud).map(|(a, b)| a + b).collect();
    let audio = AudioBuffer::from_mono(signal, SAMPLE_RATE).unwrap();
    let detector = detector();

    let levels = detector.band_levels(&audio).unwrap().unwrap();
    let candidates = levels.candidates(detector.config().threshold_db);
    let first = candidates[0];
    let loudest = candidates
        .iter()
        .copied()
        .max_by(|&a, &b| levels.levels_db[a].total_cmp(&levels.levels_db[b]))
        .unwrap();
    assert!(levels.times[loudest] > levels.times[first]);
    assert!(levels.levels_db[loudest] > levels.levels_db[first]);

    let events = detector.detect(&audio).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].timestamp(), levels.times[first]);
    assert_eq!(
        events[0].attribute("peak_db"),
        Some(format!("{:.1}", levels.levels_db[first]).as_str())
    );
}

#[test]
fn silence_yields_no_detections() {
    let audio = AudioBuffer::from_mono(vec![0.0; 96_000], SAMPLE_RATE).unwrap();
    assert!(detector().detect(&audio).unwrap().is_empty());
}

#[test]
fn band_above_nyquist_yields_no_detections() {
    // 16 kHz audio tops out at 8 kHz, below the 18-21 kHz band.
    let signal: Vec<f64> = (0..32_000)
        .map(|i| (2.0 * PI * 1_000.0 * i as f64 / 16_000.0).sin())
        .collect();
    let audio = AudioBuffer::from_mono(signal, 16_000.0).unwrap();

    let detector = detector();
    assert!(detector.band_levels(&audio).unwrap().is_none());
    assert!(detector.detect(&audio).unwrap().is_empty());
}

#[test]
fn stereo_is_mixed_down() {
    let mono = bursts(2.0, &[0.8], 0.05, 0.5);
    let stereo: Vec<f64> = mono.iter().flat_map(|&s| [s, 0.0]).collect();

    let mono_events = detector()
        .detect(&AudioBuffer::from_mono(mono, SAMPLE_RATE).unwrap())
        .unwrap();
    let stereo_events = detector()
        .detect(&AudioBuffer::new(stereo, 2, SAMPLE_RATE).unwrap())
        .unwrap();

    assert_eq!(mono_events.len(), 1);
    assert_eq!(stereo_events.len(), 1);
    assert_eq!(mono_events[0].timestamp(), stereo_events[0].timestamp());
}
