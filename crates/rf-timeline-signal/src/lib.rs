//! rf-timeline Signal Processing Library
//!
//! Turns an audio recording into timestamped ultrasonic detections.
//!
//! # Features
//!
//! - **Audio buffers**: interleaved multi-channel samples with WAV decoding
//! - **Spectrogram**: centred short-time Fourier transform with a Hann taper
//! - **Ultrasonic detection**: band energy, median-relative thresholding and
//!   greedy minimum-separation de-duplication
//!
//! # Example
//!
//! ```rust,no_run
//! use rf_timeline_signal::{AudioBuffer, DetectorConfig, UltrasonicDetector};
//!
//! let audio = AudioBuffer::from_wav("mic.wav")?;
//! let detector = UltrasonicDetector::new(DetectorConfig::default())?;
//! let events = detector.detect(&audio)?;
//! println!("{} ultrasonic pulses", events.len());
//! # Ok::<(), rf_timeline_signal::SignalError>(())
//! ```

pub mod audio;
pub mod peak_detector;
pub mod spectrogram;
mod stats;

pub use audio::AudioBuffer;
pub use peak_detector::{
    select_peaks, BandLevels, DetectorConfig, UltrasonicDetector, DB_FLOOR_EPSILON,
    ULTRASONIC_LABEL, ULTRASONIC_LABEL_PREFIX,
};
pub use spectrogram::{
    band_mean_magnitude, compute_spectrogram, Spectrogram, SpectrogramError, StftConfig,
    WindowFunction,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for signal processing operations
pub type Result<T> = std::result::Result<T, SignalError>;

/// Unified error type for signal processing operations
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// STFT configuration or input error
    #[error("Spectrogram error: {0}")]
    Spectrogram(#[from] SpectrogramError),

    /// WAV decoding error
    #[error("WAV decode error: {0}")]
    Wav(#[from] hound::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Audio buffer validation error
    #[error("Invalid audio buffer: {0}")]
    InvalidAudio(String),

    /// Detection produced an event that violates the event invariants
    #[error("Event construction error: {0}")]
    Event(#[from] rf_timeline_core::CoreError),
}
