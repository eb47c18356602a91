//! Audio Spectrogram Generation
//!
//! Short-Time Fourier Transform over a mono signal. Frames are centred: the
//! signal is padded with `window_size / 2` zeros on each side so frame `k`
//! sits at `k * hop_size / sample_rate` seconds, and the tail is zero-padded
//! so the last hop fits exactly. Magnitudes are scaled by `1 / sum(window)`,
//! which makes a full-scale sinusoid read as half its amplitude at its bin.

use std::f64::consts::PI;

use ndarray::Array2;
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Configuration for spectrogram generation.
#[derive(Debug, Clone)]
pub struct StftConfig {
    /// FFT window size (number of samples per frame)
    pub window_size: usize,
    /// Hop size (step between consecutive frames). Smaller = more overlap.
    pub hop_size: usize,
    /// Window function to apply
    pub window_fn: WindowFunction,
    /// Pad so frames are centred on their timestamps
    pub center: bool,
}

impl Default for StftConfig {
    /// 4096-sample Hann windows with 75% overlap.
    fn default() -> Self {
        Self {
            window_size: 4096,
            hop_size: 1024,
            window_fn: WindowFunction::Hann,
            center: true,
        }
    }
}

impl StftConfig {
    fn validate(&self, sample_rate: f64) -> Result<(), SpectrogramError> {
        if self.window_size == 0 {
            return Err(SpectrogramError::InvalidWindowSize);
        }
        if self.hop_size == 0 {
            return Err(SpectrogramError::InvalidHopSize);
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SpectrogramError::InvalidSampleRate(sample_rate));
        }
        Ok(())
    }

    /// Number of one-sided frequency bins.
    pub fn n_freq(&self) -> usize {
        self.window_size / 2 + 1
    }

    fn pad(&self) -> usize {
        if self.center {
            self.window_size / 2
        } else {
            0
        }
    }

    /// Number of frames produced for a signal of `len` samples.
    pub fn n_frames(&self, len: usize) -> Result<usize, SpectrogramError> {
        let padded = len + 2 * self.pad();
        if padded < self.window_size {
            return Err(SpectrogramError::SignalTooShort {
                signal_len: len,
                window_size: self.window_size,
            });
        }
        let span = padded - self.window_size;
        // Zero-extend the tail so the final frame starts on a hop boundary.
        Ok(span.div_ceil(self.hop_size) + 1)
    }

    /// Centre time in seconds of frame `frame`.
    pub fn frame_time(&self, frame: usize, sample_rate: f64) -> f64 {
        let centre = frame * self.hop_size + self.window_size / 2 - self.pad();
        centre as f64 / sample_rate
    }

    /// Centre frequency in Hz of bin `bin`.
    pub fn bin_frequency(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.window_size as f64
    }
}

/// Window function types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFunction {
    /// Rectangular (no windowing)
    Rectangular,
    /// Periodic Hann window, the DFT-even form used for spectral analysis
    Hann,
}

/// Result of spectrogram computation.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// Magnitudes: rows = frequency bins, columns = time frames.
    /// Only positive frequencies (0 to Nyquist), so rows = window_size/2 + 1.
    pub data: Array2<f64>,
    /// Number of frequency bins
    pub n_freq: usize,
    /// Number of time frames
    pub n_time: usize,
    /// Frequency resolution (Hz per bin)
    pub freq_resolution: f64,
    /// Time resolution (seconds per frame)
    pub time_resolution: f64,
    /// Time of the first frame in seconds
    pub time_origin: f64,
}

impl Spectrogram {
    /// Bin centre frequencies in Hz.
    pub fn frequencies(&self) -> Vec<f64> {
        (0..self.n_freq)
            .map(|b| b as f64 * self.freq_resolution)
            .collect()
    }

    /// Frame times in seconds.
    pub fn times(&self) -> Vec<f64> {
        (0..self.n_time)
            .map(|t| self.time_origin + t as f64 * self.time_resolution)
            .collect()
    }
}

/// Compute the magnitude spectrogram of a 1D signal.
pub fn compute_spectrogram(
    signal: &[f64],
    sample_rate: f64,
    config: &StftConfig,
) -> Result<Spectrogram, SpectrogramError> {
    config.validate(sample_rate)?;
    let n_frames = config.n_frames(signal.len())?;
    let n_freq = config.n_freq();
    let mut data = Array2::zeros((n_freq, n_frames));

    for_each_frame(signal, config, n_frames, |frame, magnitudes| {
        for (bin, &mag) in magnitudes.iter().enumerate() {
            data[[bin, frame]] = mag;
        }
    });

    Ok(Spectrogram {
        data,
        n_freq,
        n_time: n_frames,
        freq_resolution: sample_rate / config.window_size as f64,
        time_resolution: config.hop_size as f64 / sample_rate,
        time_origin: config.frame_time(0, sample_rate),
    })
}

/// Mean magnitude per frame over the bins whose centre lies in
/// `[low_hz, high_hz]`.
///
/// Computes frame by frame without materialising the full matrix. Returns
/// `Ok(None)` when no bin falls inside the band.
pub fn band_mean_magnitude(
    signal: &[f64],
    sample_rate: f64,
    config: &StftConfig,
    low_hz: f64,
    high_hz: f64,
) -> Result<Option<Vec<f64>>, SpectrogramError> {
    config.validate(sample_rate)?;

    let bins: Vec<usize> = (0..config.n_freq())
        .filter(|&b| {
            let f = config.bin_frequency(b, sample_rate);
            low_hz <= f && f <= high_hz
        })
        .collect();
    if bins.is_empty() {
        return Ok(None);
    }

    let n_frames = config.n_frames(signal.len())?;
    let mut means = vec![0.0; n_frames];
    let n_bins = bins.len() as f64;

    for_each_frame(signal, config, n_frames, |frame, magnitudes| {
        means[frame] = bins.iter().map(|&b| magnitudes[b]).sum::<f64>() / n_bins;
    });

    Ok(Some(means))
}

/// Run the windowed FFT over every frame, handing the scaled one-sided
/// magnitudes of each to `visit`.
fn for_each_frame(
    signal: &[f64],
    config: &StftConfig,
    n_frames: usize,
    mut visit: impl FnMut(usize, &[f64]),
) {
    let window = make_window(config.window_fn, config.window_size);
    let scale = 1.0 / window.iter().sum::<f64>();
    let pad = config.pad();
    let n_freq = config.n_freq();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(config.window_size);

    let mut buffer = vec![Complex64::new(0.0, 0.0); config.window_size];
    let mut magnitudes = vec![0.0; n_freq];

    for frame in 0..n_frames {
        let start = frame * config.hop_size;

        // Apply window and convert to complex; positions outside the signal
        // are the zero padding.
        for (i, (slot, &w)) in buffer.iter_mut().zip(window.iter()).enumerate() {
            let sample = (start + i)
                .checked_sub(pad)
                .and_then(|idx| signal.get(idx))
                .copied()
                .unwrap_or(0.0);
            *slot = Complex64::new(sample * w, 0.0);
        }

        fft.process(&mut buffer);

        for (mag, value) in magnitudes.iter_mut().zip(buffer.iter()) {
            *mag = value.norm() * scale;
        }
        visit(frame, &magnitudes);
    }
}

/// Generate a window function.
fn make_window(kind: WindowFunction, size: usize) -> Vec<f64> {
    match kind {
        WindowFunction::Rectangular => vec![1.0; size],
        WindowFunction::Hann => (0..size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
            .collect(),
    }
}

/// Errors from spectrogram computation.
#[derive(Debug, thiserror::Error)]
pub enum SpectrogramError {
    #[error("Signal too short ({signal_len} samples) for window size {window_size}")]
    SignalTooShort { signal_len: usize, window_size: usize },

    #[error("Hop size must be > 0")]
    InvalidHopSize,

    #[error("Window size must be > 0")]
    InvalidWindowSize,

    #[error("Sample rate must be positive, got {0}")]
    InvalidSampleRate(f64),
}
