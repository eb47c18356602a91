//! In-memory audio buffers.
//!
//! The detector works on a complete recording, so decoding reads the whole
//! file up front. Samples are kept interleaved (`frame0_ch0, frame0_ch1, ...`)
//! as they come out of the decoder.

use std::io::Read;
use std::path::Path;

use crate::{Result, SignalError};

/// A decoded recording.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f64>,
    channels: usize,
    sample_rate: f64,
}

impl AudioBuffer {
    /// Wrap interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::InvalidAudio`] if `channels` is zero, the sample
    /// count is not a whole number of frames, or `sample_rate` is not a
    /// positive finite number.
    pub fn new(samples: Vec<f64>, channels: usize, sample_rate: f64) -> Result<Self> {
        if channels == 0 {
            return Err(SignalError::InvalidAudio("channel count must be > 0".into()));
        }
        if samples.len() % channels != 0 {
            return Err(SignalError::InvalidAudio(format!(
                "{} samples do not divide into {channels} channels",
                samples.len()
            )));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SignalError::InvalidAudio(format!(
                "sample rate {sample_rate} must be positive"
            )));
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Single-channel buffer.
    pub fn from_mono(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        Self::new(samples, 1, sample_rate)
    }

    /// Decode a WAV file.
    pub fn from_wav(path: impl AsRef<Path>) -> Result<Self> {
        let reader = hound::WavReader::open(path)?;
        Self::from_wav_reader(reader)
    }

    /// Decode WAV data from any reader.
    pub fn from_wav_bytes<R: Read>(reader: R) -> Result<Self> {
        Self::from_wav_reader(hound::WavReader::new(reader)?)
    }

    fn from_wav_reader<R: Read>(mut reader: hound::WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        let samples: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<_, _>>()?,
            hound::SampleFormat::Int => {
                // Full-scale integer PCM maps onto [-1, 1).
                let scale = f64::from(1u32 << (spec.bits_per_sample.saturating_sub(1).min(31)));
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| f64::from(v) / scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        tracing::debug!(
            channels = spec.channels,
            sample_rate = spec.sample_rate,
            bits = spec.bits_per_sample,
            samples = samples.len(),
            "Decoded WAV"
        );

        Self::new(samples, usize::from(spec.channels), f64::from(spec.sample_rate))
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn duration_s(&self) -> f64 {
        self.frames() as f64 / self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Average all channels into one.
    pub fn to_mono(&self) -> Vec<f64> {
        if self.channels == 1 {
            return self.samples.clone();
        }
        let n = self.channels as f64;
        self.samples
            .chunks_exact(self.channels)
            .map(|frame| frame.iter().sum::<f64>() / n)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Cursor;

    fn wav_bytes(spec: hound::WavSpec, write: impl FnOnce(&mut hound::WavWriter<&mut Cursor<Vec<u8>>>)) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            write(&mut writer);
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_new_validates_layout() {
        assert!(AudioBuffer::new(vec![0.0; 3], 2, 48_000.0).is_err());
        assert!(AudioBuffer::new(vec![0.0; 4], 0, 48_000.0).is_err());
        assert!(AudioBuffer::new(vec![0.0; 4], 2, 0.0).is_err());
        assert!(AudioBuffer::new(vec![0.0; 4], 2, f64::NAN).is_err());
        assert!(AudioBuffer::new(vec![0.0; 4], 2, 48_000.0).is_ok());
    }

    #[test]
    fn test_to_mono_averages_channels() {
        let buffer = AudioBuffer::new(vec![1.0, 3.0, -1.0, 1.0], 2, 8_000.0).unwrap();
        assert_eq!(buffer.frames(), 2);
        assert_eq!(buffer.to_mono(), vec![2.0, 0.0]);
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::from_mono(vec![0.0; 24_000], 48_000.0).unwrap();
        assert_abs_diff_eq!(buffer.duration_s(), 0.5);
    }

    #[test]
    fn test_decode_int16_stereo() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, |w| {
            for s in [16_384i16, -16_384, i16::MIN, 0] {
                w.write_sample(s).unwrap();
            }
        });

        let buffer = AudioBuffer::from_wav_bytes(Cursor::new(bytes)).unwrap();
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.sample_rate(), 44_100.0);
        assert_eq!(buffer.samples(), &[0.5, -0.5, -1.0, 0.0]);
        assert_eq!(buffer.to_mono(), vec![0.0, -0.5]);
    }

    #[test]
    fn test_decode_float_mono() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let bytes = wav_bytes(spec, |w| {
            for s in [0.25f32, -0.75] {
                w.write_sample(s).unwrap();
            }
        });

        let buffer = AudioBuffer::from_wav_bytes(Cursor::new(bytes)).unwrap();
        assert_eq!(buffer.samples(), &[0.25, -0.75]);
    }

    #[test]
    fn test_garbage_is_wav_error() {
        let result = AudioBuffer::from_wav_bytes(Cursor::new(b"not a wav file".to_vec()));
        assert!(matches!(result, Err(SignalError::Wav(_))));
    }
}
