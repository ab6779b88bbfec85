//! Turns a flushed snapshot into data points, one per metric.

use tracing::{debug, info, warn};

use super::key;
use super::metric::{format_timestamp, DataPoint, Measurement, Unit};
use super::publish::Publisher;
use super::snapshot::{reduce, MetricSnapshot};

/// Counters under this prefix are StatsD's own bookkeeping and never exported.
pub const HOUSEKEEPING_PREFIX: &str = "statsd.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Counter,
    Timer,
    Gauge,
    Set,
}

impl Kind {
    fn as_str(&self) -> &'static str {
        match *self {
            Kind::Counter => "counter",
            Kind::Timer => "timer",
            Kind::Gauge => "gauge",
            Kind::Set => "set",
        }
    }
}

/// Outcome of one flush cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Data points the publisher accepted.
    pub published: usize,
    /// Data points the publisher rejected.
    pub failed: usize,
    /// Keys that produced no data point (housekeeping counters, empty timers).
    pub skipped: usize,
}

impl FlushReport {
    pub fn attempted(&self) -> usize {
        self.published + self.failed
    }
}

pub struct FlushCoordinator<P> {
    publisher: P,
}

impl<P: Publisher> FlushCoordinator<P> {
    pub fn new(publisher: P) -> FlushCoordinator<P> {
        FlushCoordinator { publisher }
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn into_publisher(self) -> P {
        self.publisher
    }

    /// Publish every metric in the snapshot. A failed publish is logged and
    /// counted; it never stops the remaining keys or kinds from going out.
    pub fn flush(&self, timestamp: u64, snapshot: &MetricSnapshot) -> FlushReport {
        info!(at = %format_timestamp(timestamp), "flushing metrics");

        let mut report = FlushReport::default();

        for (key, value) in &snapshot.counters {
            if key.starts_with(HOUSEKEEPING_PREFIX) {
                debug!(key = %key, "skipping housekeeping counter");
                report.skipped += 1;
                continue;
            }

            self.emit(
                &mut report,
                Kind::Counter,
                key,
                Unit::Count,
                timestamp,
                Measurement::Value(*value),
            );
        }

        for (key, samples) in &snapshot.timers {
            match reduce(samples) {
                Some(summary) => self.emit(
                    &mut report,
                    Kind::Timer,
                    key,
                    Unit::Milliseconds,
                    timestamp,
                    Measurement::Statistics(summary),
                ),
                None => {
                    debug!(key = %key, "skipping timer without samples");
                    report.skipped += 1;
                }
            }
        }

        for (key, value) in &snapshot.gauges {
            self.emit(
                &mut report,
                Kind::Gauge,
                key,
                Unit::None,
                timestamp,
                Measurement::Value(*value),
            );
        }

        for (key, members) in &snapshot.sets {
            self.emit(
                &mut report,
                Kind::Set,
                key,
                Unit::None,
                timestamp,
                Measurement::Value(members.len() as f64),
            );
        }

        info!(
            published = report.published,
            failed = report.failed,
            skipped = report.skipped,
            "flush complete"
        );

        report
    }

    fn emit(
        &self,
        report: &mut FlushReport,
        kind: Kind,
        key: &str,
        unit: Unit,
        timestamp: u64,
        measurement: Measurement,
    ) {
        let point = DataPoint {
            name: key::parse(key),
            unit,
            timestamp,
            measurement,
        };

        match self.publisher.publish(&point) {
            Ok(()) => report.published += 1,
            Err(err) => {
                warn!(key, kind = kind.as_str(), error = %err, "failed to publish data point");
                report.failed += 1;
            }
        }
    }
}
