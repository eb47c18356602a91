//! Analysis report: motif hits, frequent triplets and run summary, rendered
//! either as colored tables or as one JSON document.

use std::path::Path;

use chrono::{DateTime, Utc};
use colored::Colorize;
use rf_timeline_motif::{Motif, MotifHit, MotifMatcher, TripletCount, TripletMiner};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::analyze::Analysis;
use crate::config::AnalysisConfig;

/// Number of motif hits listed in table output.
pub const MAX_LISTED_HITS: usize = 25;

/// Everything printed at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub timeline_path: String,
    pub events: EventCounts,
    pub alignment: AlignmentSummary,
    pub motif: MotifOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triplets: Option<TripletSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventCounts {
    pub total: usize,
    pub wireless: usize,
    pub acoustic: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentSummary {
    pub estimator: &'static str,
    pub offset_s: Option<f64>,
}

/// Result of the motif search, or why it did not run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MotifOutcome {
    Searched {
        motif: String,
        gap_s: f64,
        hits: Vec<HitRecord>,
    },
    Skipped {
        motif: String,
        reason: String,
    },
}

/// Owned copy of a [`MotifHit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRecord {
    pub indices: [usize; 3],
    pub timestamps: [f64; 3],
    pub labels: [String; 3],
    pub gaps_s: [f64; 2],
}

impl From<&MotifHit<'_>> for HitRecord {
    fn from(hit: &MotifHit<'_>) -> Self {
        let (first_gap, second_gap) = hit.gaps();
        Self {
            indices: hit.indices,
            timestamps: hit.events.map(|e| e.timestamp()),
            labels: hit.events.map(|e| e.label().to_string()),
            gaps_s: [first_gap, second_gap],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripletSection {
    pub window_s: f64,
    pub top_k: usize,
    pub entries: Vec<TripletCount>,
}

#[derive(Tabled)]
struct HitRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Anchor (UTC)")]
    anchor: String,
    #[tabled(rename = "Step 1")]
    first: String,
    #[tabled(rename = "Step 2")]
    second: String,
    #[tabled(rename = "Step 3")]
    third: String,
    #[tabled(rename = "Labels")]
    labels: String,
}

impl HitRow {
    fn new(number: usize, hit: &HitRecord) -> Self {
        let [t1, t2, t3] = hit.timestamps;
        let [gap1, gap2] = hit.gaps_s;
        Self {
            number: format!("{number:02}"),
            anchor: utc_time(t1),
            first: format!("{t1:.3}"),
            second: format!("{t2:.3} (+{gap1:.2}s)"),
            third: format!("{t3:.3} (+{gap2:.2}s)"),
            labels: hit.labels.join(" -> "),
        }
    }
}

#[derive(Tabled)]
struct TripletRow {
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Triplet")]
    triplet: String,
}

/// Epoch seconds as a UTC wall-clock time, millisecond precision.
fn utc_time(epoch_s: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis((epoch_s * 1000.0).round() as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl Report {
    /// Run the motif search and, if enabled, triplet mining over the fused
    /// timeline.
    pub fn build(analysis: &Analysis, config: &AnalysisConfig, timeline_path: &Path) -> Self {
        let events = analysis.timeline.events();

        let motif = match Motif::parse(&config.motif)
            .and_then(|motif| MotifMatcher::new(motif, config.gap_s))
        {
            Ok(matcher) => {
                let hits = matcher.find(events).iter().map(HitRecord::from).collect();
                MotifOutcome::Searched {
                    motif: matcher.motif().to_string(),
                    gap_s: matcher.gap_s(),
                    hits,
                }
            }
            Err(e) => {
                tracing::warn!(motif = %config.motif, error = %e, "Skipping motif search");
                MotifOutcome::Skipped {
                    motif: config.motif.clone(),
                    reason: e.to_string(),
                }
            }
        };

        let triplets = (config.mine_top > 0).then(|| {
            let miner = TripletMiner {
                window_s: config.mine_window_s,
                top_k: config.mine_top,
            };
            TripletSection {
                window_s: miner.window_s,
                top_k: miner.top_k,
                entries: miner.mine(events),
            }
        });

        Self {
            timeline_path: timeline_path.display().to_string(),
            events: EventCounts {
                total: analysis.timeline.len(),
                wireless: analysis.wireless_events(),
                acoustic: analysis.acoustic_events(),
            },
            alignment: AlignmentSummary {
                estimator: analysis.estimator,
                offset_s: analysis.offset,
            },
            motif,
            triplets,
        }
    }

    /// Number of motif hits, zero when the search was skipped.
    pub fn hit_count(&self) -> usize {
        match &self.motif {
            MotifOutcome::Searched { hits, .. } => hits.len(),
            MotifOutcome::Skipped { .. } => 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn print_table(&self) {
        println!("{}", "rf-timeline Analysis".bold().cyan());
        println!("{}", "=".repeat(50));
        println!(
            "  {} {} (events: {})",
            "Saved fused timeline:".dimmed(),
            self.timeline_path,
            self.events.total
        );
        println!(
            "  {} {} wifi, {} audio",
            "Sources:".dimmed(),
            self.events.wireless,
            self.events.acoustic
        );
        println!(
            "  {} {}",
            "Audio offset:".dimmed(),
            match self.alignment.offset_s {
                Some(offset) => format!("{offset:+.3}s ({})", self.alignment.estimator).normal(),
                None => "not applied".yellow(),
            }
        );
        println!();

        match &self.motif {
            MotifOutcome::Searched { motif, gap_s, hits } => {
                println!(
                    "{} {} within <= {}s gaps: {} occurrences",
                    "Detected motif".bold(),
                    motif.green(),
                    gap_s,
                    hits.len()
                );
                if !hits.is_empty() {
                    let rows: Vec<HitRow> = hits
                        .iter()
                        .take(MAX_LISTED_HITS)
                        .enumerate()
                        .map(|(i, hit)| HitRow::new(i + 1, hit))
                        .collect();
                    println!("{}", Table::new(rows).with(Style::rounded()));
                }
                if hits.len() > MAX_LISTED_HITS {
                    println!("  ...({} more)", hits.len() - MAX_LISTED_HITS);
                }
            }
            MotifOutcome::Skipped { motif, reason } => {
                println!(
                    "{} Motif '{}' skipped: {}",
                    "[WARN]".yellow(),
                    motif,
                    reason
                );
            }
        }

        if let Some(section) = &self.triplets {
            println!();
            println!(
                "{} within {}s window:",
                format!("Top {} triplets", section.top_k).bold(),
                section.window_s
            );
            if section.entries.is_empty() {
                println!("  {} No triplets found", "[INFO]".blue());
            } else {
                let rows: Vec<TripletRow> = section
                    .entries
                    .iter()
                    .map(|t| TripletRow {
                        count: t.count,
                        triplet: t.key.to_string(),
                    })
                    .collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
    }
}
