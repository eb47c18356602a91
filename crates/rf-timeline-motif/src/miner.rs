//! Frequent ordered-triplet mining.

use std::collections::HashMap;
use std::fmt;

use rf_timeline_core::Event;
use serde::{Deserialize, Serialize};

use crate::{MotifError, Result};

/// Ordered label triple. `(a, b, c)` and `(b, a, c)` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripletKey(pub [String; 3]);

impl TripletKey {
    pub fn labels(&self) -> &[String; 3] {
        &self.0
    }
}

impl fmt::Display for TripletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.0;
        write!(f, "{a} -> {b} -> {c}")
    }
}

/// A triplet and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripletCount {
    pub key: TripletKey,
    pub count: usize,
}

/// Counts ordered label triplets whose first and last events lie within
/// `window_s` seconds of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripletMiner {
    /// Maximum span from first to third event, in seconds
    pub window_s: f64,
    /// Number of triplets to report
    pub top_k: usize,
}

impl Default for TripletMiner {
    fn default() -> Self {
        Self {
            window_s: 3.0,
            top_k: 10,
        }
    }
}

impl TripletMiner {
    pub fn new(window_s: f64, top_k: usize) -> Result<Self> {
        let miner = Self { window_s, top_k };
        miner.validate()?;
        Ok(miner)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.window_s.is_finite() && self.window_s >= 0.0) {
            return Err(MotifError::InvalidParameter {
                field: "window_s",
                reason: format!(
                    "must be a non-negative number of seconds, got {}",
                    self.window_s
                ),
            });
        }
        Ok(())
    }

    /// The `top_k` most frequent triplets in `events`, which must be sorted
    /// by timestamp.
    ///
    /// Sorted by descending count; equal counts keep the order in which the
    /// triplets were first seen.
    pub fn mine(&self, events: &[Event]) -> Vec<TripletCount> {
        let mut order: Vec<TripletKey> = Vec::new();
        let mut counts: HashMap<TripletKey, usize> = HashMap::new();
        let mut triplets = 0usize;

        for (i, first) in events.iter().enumerate() {
            let start = first.timestamp();
            for (j, second) in events.iter().enumerate().skip(i + 1) {
                if second.timestamp() - start > self.window_s {
                    break;
                }
                for third in &events[j + 1..] {
                    if third.timestamp() - start > self.window_s {
                        break;
                    }
                    triplets += 1;
                    let key = TripletKey([
                        first.label().to_string(),
                        second.label().to_string(),
                        third.label().to_string(),
                    ]);
                    match counts.get_mut(&key) {
                        Some(count) => *count += 1,
                        None => {
                            counts.insert(key.clone(), 1);
                            order.push(key);
                        }
                    }
                }
            }
        }

        let mut ranked: Vec<TripletCount> = order
            .into_iter()
            .map(|key| {
                let count = counts.get(&key).copied().unwrap_or_default();
                TripletCount { key, count }
            })
            .collect();
        // Stable, so ties stay in first-seen order.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(self.top_k);

        tracing::debug!(
            window_s = self.window_s,
            triplets,
            distinct = counts.len(),
            reported = ranked.len(),
            "Triplet mining complete"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rf_timeline_core::{Attributes, EventSource};

    fn ev(ts: f64, label: &str) -> Event {
        Event::new(ts, EventSource::Wireless, label, Attributes::new()).unwrap()
    }

    fn key(a: &str, b: &str, c: &str) -> TripletKey {
        TripletKey([a.into(), b.into(), c.into()])
    }

    #[test]
    fn counts_triplets_inside_window() {
        let events = vec![ev(0.0, "a"), ev(1.0, "b"), ev(2.0, "c"), ev(3.5, "d")];
        let top = TripletMiner::new(3.0, 10).unwrap().mine(&events);
        // (a,b,c) spans 2.0; (b,c,d) spans 2.5; anything from a to d spans 3.5.
        assert_eq!(
            top,
            vec![
                TripletCount { key: key("a", "b", "c"), count: 1 },
                TripletCount { key: key("b", "c", "d"), count: 1 },
            ]
        );
    }

    #[test]
    fn window_is_inclusive() {
        let events = vec![ev(0.0, "a"), ev(1.0, "b"), ev(3.0, "c")];
        assert_eq!(TripletMiner::new(3.0, 10).unwrap().mine(&events).len(), 1);
        assert!(TripletMiner::new(2.5, 10).unwrap().mine(&events).is_empty());
    }

    #[test]
    fn ranks_by_count_then_first_seen() {
        let events = vec![
            ev(0.0, "x"),
            ev(0.1, "y"),
            ev(0.2, "z"),
            ev(10.0, "p"),
            ev(10.1, "q"),
            ev(10.2, "r"),
            ev(20.0, "p"),
            ev(20.1, "q"),
            ev(20.2, "r"),
        ];
        let top = TripletMiner::new(1.0, 10).unwrap().mine(&events);
        assert_eq!(top[0], TripletCount { key: key("p", "q", "r"), count: 2 });
        assert_eq!(top[1], TripletCount { key: key("x", "y", "z"), count: 1 });
    }

    #[test]
    fn key_is_order_sensitive() {
        assert_ne!(key("a", "b", "c"), key("b", "a", "c"));
        assert_eq!(key("a", "b", "c").labels(), &["a", "b", "c"].map(String::from));
        assert_eq!(key("a", "b", "c").to_string(), "a -> b -> c");
    }

    #[test]
    fn zero_top_k_and_short_input() {
        let events = vec![ev(0.0, "a"), ev(0.1, "b"), ev(0.2, "c")];
        assert!(TripletMiner::new(3.0, 0).unwrap().mine(&events).is_empty());
        assert!(TripletMiner::default().mine(&events[..2]).is_empty());
    }

    #[test]
    fn miner_config_from_partial_json() {
        let miner: TripletMiner = serde_json::from_str(r#"{"top_k": 4}"#).unwrap();
        assert_eq!(miner.top_k, 4);
        assert_eq!(miner.window_s, 3.0);
        assert!(miner.validate().is_ok());
    }

    #[test]
    fn triplet_count_serializes_key_as_label_array() {
        let count = TripletCount {
            key: key("a", "b", "c"),
            count: 2,
        };
        let value = serde_json::to_value(&count).unwrap();
        assert_eq!(value, serde_json::json!({"key": ["a", "b", "c"], "count": 2}));
        let back: TripletCount = serde_json::from_value(value).unwrap();
        assert_eq!(back, count);
    }

    #[test]
    fn rejects_bad_window() {
        assert!(TripletMiner::new(-0.5, 10).is_err());
        assert!(TripletMiner::new(f64::INFINITY, 10).is_err());
    }
}
