//! Receivers are how flushed snapshots come into the backend.
//!
//! The StatsD daemon owns the flush interval; every flush arrives as a
//! `FlushEvent` on a channel and the backend turns it into data points.

use serde::Deserialize;

use super::snapshot::MetricSnapshot;

pub mod json;

mod channel;

pub use self::channel::{flush_channel, FlushReceiver, FlushSender};

/// A snapshot along with the time it was flushed at.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FlushEvent {
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(flatten)]
    pub snapshot: MetricSnapshot,
}

impl FlushEvent {
    pub fn new(timestamp: u64, snapshot: MetricSnapshot) -> FlushEvent {
        FlushEvent {
            timestamp,
            snapshot,
        }
    }
}
