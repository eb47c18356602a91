//! Gap-bounded motif search.

use rf_timeline_core::Event;
use serde::Serialize;

use crate::token::Motif;
use crate::{MotifError, Result};

/// One occurrence of a motif.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotifHit<'a> {
    /// Positions of the three steps in the searched slice
    pub indices: [usize; 3],
    /// The matched events, in step order
    pub events: [&'a Event; 3],
}

impl MotifHit<'_> {
    /// Seconds between step 1 and 2, and between step 2 and 3.
    pub fn gaps(&self) -> (f64, f64) {
        let [a, b, c] = self.events;
        (
            b.timestamp() - a.timestamp(),
            c.timestamp() - b.timestamp(),
        )
    }

    pub fn start(&self) -> f64 {
        self.events[0].timestamp()
    }
}

/// Finds every ordered occurrence of a motif whose consecutive steps are at
/// most `gap_s` seconds apart.
#[derive(Debug, Clone)]
pub struct MotifMatcher {
    motif: Motif,
    gap_s: f64,
}

impl MotifMatcher {
    pub fn new(motif: Motif, gap_s: f64) -> Result<Self> {
        if !(gap_s.is_finite() && gap_s >= 0.0) {
            return Err(MotifError::InvalidParameter {
                field: "gap_s",
                reason: format!("must be a non-negative number of seconds, got {gap_s}"),
            });
        }
        Ok(Self { motif, gap_s })
    }

    pub fn motif(&self) -> &Motif {
        &self.motif
    }

    pub fn gap_s(&self) -> f64 {
        self.gap_s
    }

    /// All hits in `events`, which must be sorted by timestamp.
    ///
    /// Every combination is reported, so one event may take part in several
    /// hits. Hits are ordered by `(i, j, k)`.
    pub fn find<'a>(&self, events: &'a [Event]) -> Vec<MotifHit<'a>> {
        let [first, second, third] = self.motif.tokens();
        let mut hits = Vec::new();

        for (i, a) in events.iter().enumerate() {
            if !first.matches(a.label()) {
                continue;
            }
            for (j, b) in within_gap(events, i, a.timestamp(), self.gap_s) {
                if !second.matches(b.label()) {
                    continue;
                }
                for (k, c) in within_gap(events, j, b.timestamp(), self.gap_s) {
                    if third.matches(c.label()) {
                        hits.push(MotifHit {
                            indices: [i, j, k],
                            events: [a, b, c],
                        });
                    }
                }
            }
        }

        tracing::debug!(
            motif = %self.motif,
            gap_s = self.gap_s,
            events = events.len(),
            hits = hits.len(),
            "Motif search complete"
        );
        hits
    }
}

/// Events after `from` whose timestamp is within `gap_s` of `anchor`.
fn within_gap(
    events: &[Event],
    from: usize,
    anchor: f64,
    gap_s: f64,
) -> impl Iterator<Item = (usize, &Event)> {
    events
        .iter()
        .enumerate()
        .skip(from + 1)
        .take_while(move |(_, e)| e.timestamp() - anchor <= gap_s)
}
