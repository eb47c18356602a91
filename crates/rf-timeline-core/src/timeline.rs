//! The fused, time-sorted event timeline.

use serde::Serialize;

use crate::error::CoreResult;
use crate::event::{Event, EventSource};

/// Wireless and acoustic events merged into ascending timestamp order.
///
/// Read-only once built: the matcher and the miner both borrow
/// [`Timeline::events`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    events: Vec<Event>,
}

impl Timeline {
    /// Merge both streams. Wireless events come first in the input order, so
    /// equal timestamps keep wireless before acoustic.
    pub fn fuse(wireless: Vec<Event>, acoustic: Vec<Event>) -> Self {
        let mut events = wireless;
        events.extend(acoustic);
        Self::from_events(events)
    }

    /// Build a timeline from arbitrary events; the sort is stable.
    pub fn from_events(mut events: Vec<Event>) -> Self {
        events.sort_by(|a, b| a.timestamp().total_cmp(&b.timestamp()));
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count_by_source(&self, source: EventSource) -> usize {
        self.events.iter().filter(|e| e.source() == source).count()
    }

    /// First and last timestamps, if any.
    pub fn span(&self) -> Option<(f64, f64)> {
        let first = self.events.first()?.timestamp();
        let last = self.events.last()?.timestamp();
        Some((first, last))
    }

    /// Persistence records in timeline order.
    pub fn records(&self) -> CoreResult<Vec<TimelineRecord>> {
        self.events.iter().map(TimelineRecord::from_event).collect()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// One row of a persisted timeline: `ts_epoch,source,label,meta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRecord {
    /// Timestamp with exactly six decimal places
    pub ts_epoch: String,
    pub source: &'static str,
    pub label: String,
    /// Attributes rendered as a JSON object
    pub meta: String,
}

impl TimelineRecord {
    pub fn from_event(event: &Event) -> CoreResult<Self> {
        Ok(Self {
            ts_epoch: format!("{:.6}", event.timestamp()),
            source: event.source().as_str(),
            label: event.label().to_owned(),
            meta: serde_json::to_string(event.attributes())?,
        })
    }
}
