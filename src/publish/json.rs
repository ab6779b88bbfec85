use std::io::{self, Write};
use std::sync::Mutex;

use serde::Serialize;

use super::super::error::PublishError;
use super::super::metric::{format_timestamp, DataPoint, Measurement, StatisticSummary};
use super::Publisher;

/// Writes every data point as one line of JSON.
///
/// ```text
/// {"namespace":"statsd","metricName":"getUsers","dimensions":[{"name":"application","value":"appA"}],"unit":"Count","timestamp":"2017-07-14T02:40:00.000Z","value":3.0}
/// ```
pub struct JsonPublisher<W> {
    namespace: String,
    writer: Mutex<W>,
}

impl<W: Write> JsonPublisher<W> {
    pub fn new<S: Into<String>>(namespace: S, writer: W) -> JsonPublisher<W> {
        JsonPublisher {
            namespace: namespace.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Give back the writer, e.g. to inspect a buffer after flushing.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Record<'a> {
    namespace: &'a str,
    metric_name: &'a str,
    dimensions: Vec<DimensionRecord<'a>>,
    unit: &'static str,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistic_values: Option<StatisticValues>,
}

#[derive(Serialize)]
struct DimensionRecord<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatisticValues {
    minimum: f64,
    maximum: f64,
    sum: f64,
    sample_count: usize,
}

impl From<StatisticSummary> for StatisticValues {
    fn from(summary: StatisticSummary) -> StatisticValues {
        StatisticValues {
            minimum: summary.minimum,
            maximum: summary.maximum,
            sum: summary.sum,
            sample_count: summary.sample_count,
        }
    }
}

impl<'a> Record<'a> {
    fn new(namespace: &'a str, point: &'a DataPoint) -> Record<'a> {
        let (value, statistic_values) = match point.measurement {
            Measurement::Value(value) => (Some(value), None),
            Measurement::Statistics(summary) => (None, Some(summary.into())),
        };

        Record {
            namespace,
            metric_name: point.metric_name(),
            dimensions: point
                .dimensions()
                .iter()
                .map(|(name, value)| DimensionRecord {
                    name: &**name,
                    value: &**value,
                })
                .collect(),
            unit: point.unit.as_str(),
            timestamp: format_timestamp(point.timestamp),
            value,
            statistic_values,
        }
    }
}

impl<W: Write> Publisher for JsonPublisher<W> {
    fn publish(&self, point: &DataPoint) -> Result<(), PublishError> {
        let mut line = serde_json::to_vec(&Record::new(&self.namespace, point))?;
        line.push(b'\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "writer lock poisoned"))?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}
