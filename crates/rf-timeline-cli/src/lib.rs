//! rf-timeline CLI
//!
//! Builds one timeline from a Wi-Fi capture and an audio recording, then looks
//! for repeating beacon → ultrasound → beacon sequences.
//!
//! # Usage
//!
//! ```bash
//! # Capture straight from a pcap (needs tshark on PATH)
//! rf-timeline --pcap capture.pcapng --audio mic.wav --out timeline.csv \
//!     --motif "wifi5_20,ultra19,wifi6_20" --gap 2.0
//!
//! # From a Wireshark CSV export, also listing the 10 most frequent triplets
//! rf-timeline --ws-csv ws.csv --audio mic.wav --mine-top 10 --format json
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use rf_timeline_signal::AudioBuffer;
use rf_timeline_wifiscan::{
    extract_beacon_events_with_stats, CaptureSource, CsvExportSource, TsharkFieldsSource,
};

pub mod analyze;
pub mod config;
pub mod error;
pub mod report;

use config::AnalysisConfig;
use error::ConfigError;
use report::Report;

/// rf-timeline Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "rf-timeline")]
#[command(author, version, about = "Fuse Wi-Fi beacons and ultrasonic pulses into one timeline and search it for motifs")]
pub struct Cli {
    #[command(flatten)]
    pub capture: CaptureInput,

    /// Audio recording (WAV, mono or multi-channel)
    #[arg(long)]
    pub audio: PathBuf,

    /// Where to write the fused timeline CSV
    #[arg(long, default_value = "timeline.csv")]
    pub out: PathBuf,

    /// Seconds added to audio timestamps; estimated from the first events when omitted
    #[arg(long, allow_negative_numbers = true)]
    pub audio_offset: Option<f64>,

    /// Three comma-separated motif tokens
    #[arg(long)]
    pub motif: Option<String>,

    /// Maximum seconds between motif steps
    #[arg(long)]
    pub gap: Option<f64>,

    /// List the K most frequent label triplets (0 disables)
    #[arg(long, value_name = "K")]
    pub mine_top: Option<usize>,

    /// Maximum span of a mined triplet in seconds
    #[arg(long)]
    pub mine_window: Option<f64>,

    /// Lower edge of the ultrasonic band in Hz
    #[arg(long)]
    pub ultra_low: Option<f64>,

    /// Upper edge of the ultrasonic band in Hz
    #[arg(long)]
    pub ultra_high: Option<f64>,

    /// Detection threshold in dB above the median band level
    #[arg(long, allow_negative_numbers = true)]
    pub ultra_thresh_db: Option<f64>,

    /// Minimum seconds between ultrasonic detections
    #[arg(long)]
    pub ultra_min_sep: Option<f64>,

    /// JSON configuration file; explicit flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the capture rows come from. Exactly one is required.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct CaptureInput {
    /// PCAP/PCAPNG capture, decoded with tshark
    #[arg(long)]
    pub pcap: Option<PathBuf>,

    /// Wireshark CSV export with frame.time_epoch, wlan.fc.type_subtype,
    /// wlan_mgt.ssid, wlan_radio.frequency and wlan_radio.channel_width columns
    #[arg(long)]
    pub ws_csv: Option<PathBuf>,
}

impl CaptureInput {
    pub fn source(&self) -> Result<Box<dyn CaptureSource>> {
        match (&self.pcap, &self.ws_csv) {
            (Some(pcap), None) => Ok(Box::new(TsharkFieldsSource::new(pcap))),
            (None, Some(csv)) => Ok(Box::new(CsvExportSource::new(csv))),
            _ => bail!("Provide exactly one of --pcap or --ws-csv"),
        }
    }
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty table output
    #[default]
    Table,
    /// JSON output
    Json,
}

impl Cli {
    /// Defaults, then the `--config` file, then explicit flags.
    pub fn analysis_config(&self) -> Result<AnalysisConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => AnalysisConfig::from_json(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(offset) = self.audio_offset {
            cfg.audio_offset_s = Some(offset);
        }
        if let Some(motif) = &self.motif {
            cfg.motif = motif.clone();
        }
        if let Some(gap) = self.gap {
            cfg.gap_s = gap;
        }
        if let Some(top) = self.mine_top {
            cfg.mine_top = top;
        }
        if let Some(window) = self.mine_window {
            cfg.mine_window_s = window;
        }
        if let Some(low) = self.ultra_low {
            cfg.detector.band_low_hz = low;
        }
        if let Some(high) = self.ultra_high {
            cfg.detector.band_high_hz = high;
        }
        if let Some(db) = self.ultra_thresh_db {
            cfg.detector.threshold_db = db;
        }
        if let Some(sep) = self.ultra_min_sep {
            cfg.detector.min_separation_s = sep;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

/// Run the whole pipeline and print the report.
///
/// Both inputs are loaded before any analysis, so an unreadable capture or
/// audio file fails fast.
pub fn execute(cli: Cli) -> Result<Report> {
    let config = cli.analysis_config()?;

    let source = cli.capture.source()?;
    let rows = source
        .rows()
        .with_context(|| format!("Failed to read capture from {}", source.describe()))?;
    let audio = AudioBuffer::from_wav(&cli.audio)
        .with_context(|| format!("Failed to decode audio {}", cli.audio.display()))?;

    let (wireless, stats) = extract_beacon_events_with_stats(&rows);
    tracing::info!(
        rows = stats.rows,
        beacons = stats.emitted,
        skipped = stats.rows - stats.emitted,
        "Extracted beacon events"
    );

    let analysis = analyze::run(wireless, &audio, &config)?;
    analyze::write_timeline(&cli.out, &analysis.timeline)?;

    let report = Report::build(&analysis, &config, &cli.out);
    match cli.format {
        OutputFormat::Table => report.print_table(),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(report)
}
