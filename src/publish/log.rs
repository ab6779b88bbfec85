use tracing::info;

use super::super::error::PublishError;
use super::super::metric::{DataPoint, Measurement};
use super::Publisher;

/// Emits data points as log events instead of sending them anywhere. Handy
/// for dry runs.
pub struct LogPublisher {
    namespace: String,
}

impl LogPublisher {
    pub fn new<S: Into<String>>(namespace: S) -> LogPublisher {
        LogPublisher {
            namespace: namespace.into(),
        }
    }
}

impl Publisher for LogPublisher {
    fn publish(&self, point: &DataPoint) -> Result<(), PublishError> {
        let dimensions = point
            .dimensions()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join(",");

        match point.measurement {
            Measurement::Value(value) => info!(
                namespace = %self.namespace,
                metric = point.metric_name(),
                dimensions = %dimensions,
                unit = point.unit.as_str(),
                timestamp = point.timestamp,
                value,
                "data point"
            ),
            Measurement::Statistics(summary) => info!(
                namespace = %self.namespace,
                metric = point.metric_name(),
                dimensions = %dimensions,
                unit = point.unit.as_str(),
                timestamp = point.timestamp,
                minimum = summary.minimum,
                maximum = summary.maximum,
                sum = summary.sum,
                sample_count = summary.sample_count,
                "data point"
            ),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use string_cache::DefaultAtom as Atom;

    use super::*;
    use crate::metric::{ParsedName, StatisticSummary, Unit};

    #[test]
    fn it_never_fails() {
        let publisher = LogPublisher::new("statsd");
        let mut point = DataPoint {
            name: ParsedName {
                metric_name: Atom::from("latency"),
                dimensions: vec![(Atom::from("host"), Atom::from("web1"))],
            },
            unit: Unit::Milliseconds,
            timestamp: 0,
            measurement: Measurement::Statistics(StatisticSummary {
                minimum: 1.0,
                maximum: 2.0,
                sum: 3.0,
                sample_count: 2,
            }),
        };

        assert!(publisher.publish(&point).is_ok());

        point.measurement = Measurement::Value(4.0);
        assert!(publisher.publish(&point).is_ok());
    }
}
