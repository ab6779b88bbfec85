use chrono::{DateTime, SecondsFormat, Utc};
use string_cache::DefaultAtom as Atom;

// Aliases:
//   Count:
//     StatsD: Counter
//     CloudWatch: Count
//   Milliseconds:
//     StatsD: Timer
//     CloudWatch: StatisticValues in Milliseconds
//   None:
//     StatsD: Gauge, Set (cardinality)

/// Name and value of a tag attached to an exported data point.
pub type Dimension = (Atom, Atom);

/// What a dotted metric key decomposes into.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedName {
    pub metric_name: Atom,
    pub dimensions: Vec<Dimension>,
}

impl ParsedName {
    /// Look up the value of a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|(dimension, _)| &**dimension == name)
            .map(|(_, value)| &**value)
    }
}

/// Summary of the samples a timer collected during one interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatisticSummary {
    pub minimum: f64,
    pub maximum: f64,
    pub sum: f64,
    pub sample_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Count,
    Milliseconds,
    None,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Unit::Count => "Count",
            Unit::Milliseconds => "Milliseconds",
            Unit::None => "None",
        }
    }
}

/// A data point carries either a single value or a timer summary, never both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    Value(f64),
    Statistics(StatisticSummary),
}

/// Normalized record handed to a publisher.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub name: ParsedName,
    pub unit: Unit,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub measurement: Measurement,
}

impl DataPoint {
    pub fn metric_name(&self) -> &str {
        &self.name.metric_name
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.name.dimensions
    }
}

/// Render epoch seconds as an ISO-8601 UTC string with millisecond precision,
/// e.g. `2017-07-14T02:40:00.000Z`.
///
/// Timestamps chrono cannot represent fall back to the raw number of seconds.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_formats_timestamps() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_timestamp(1_500_000_000), "2017-07-14T02:40:00.000Z");
    }

    #[test]
    fn it_falls_back_for_unrepresentable_timestamps() {
        assert_eq!(format_timestamp(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn it_looks_up_dimensions() {
        let name = ParsedName {
            metric_name: Atom::from("latency"),
            dimensions: vec![
                (Atom::from("application"), Atom::from("api")),
                (Atom::from("host"), Atom::from("web1")),
            ],
        };

        assert_eq!(name.dimension("host"), Some("web1"));
        assert_eq!(name.dimension("status"), None);
    }
}
