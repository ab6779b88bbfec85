//! Aggregated metrics handed over by the StatsD daemon on every flush.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

pub mod aggregate;

pub use self::aggregate::reduce;

/// One interval's worth of aggregated metrics. Read once per flush and then
/// dropped.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricSnapshot {
    pub counters: HashMap<String, f64>,
    pub gauges: HashMap<String, f64>,
    /// Samples in arrival order.
    pub timers: HashMap<String, Vec<f64>>,
    /// Only the number of distinct members is exported.
    pub sets: HashMap<String, HashSet<String>>,
}

impl MetricSnapshot {
    pub fn new() -> MetricSnapshot {
        MetricSnapshot::default()
    }

    pub fn with_counter<K: Into<String>>(mut self, key: K, value: f64) -> MetricSnapshot {
        self.counters.insert(key.into(), value);
        self
    }

    pub fn with_gauge<K: Into<String>>(mut self, key: K, value: f64) -> MetricSnapshot {
        self.gauges.insert(key.into(), value);
        self
    }

    pub fn with_timer<K: Into<String>>(mut self, key: K, samples: Vec<f64>) -> MetricSnapshot {
        self.timers.insert(key.into(), samples);
        self
    }

    pub fn with_set<K, I, M>(mut self, key: K, members: I) -> MetricSnapshot
    where
        K: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.sets
            .insert(key.into(), members.into_iter().map(Into::into).collect());
        self
    }

    /// Total number of keys across all four kinds.
    pub fn len(&self) -> usize {
        self.counters.len() + self.gauges.len() + self.timers.len() + self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
