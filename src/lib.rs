//! StatsD backend that exports flushed metrics as dimensioned data points.
//!
//! Each flush hands over a [`MetricSnapshot`](snapshot::MetricSnapshot) of
//! counters, gauges, timers and sets. Every key is split into
//! application/host/query/status dimensions (see [`key`]), timers are reduced
//! to summary statistics, and the resulting data points go to a
//! [`Publisher`](publish::Publisher).

pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod flush;
pub mod key;
pub mod metric;
pub mod publish;
pub mod snapshot;

/// How flushes come into the backend.
pub mod recv;

pub use backend::Backend;
pub use config::Config;
pub use error::{Error, PublishError};
pub use flush::{FlushCoordinator, FlushReport};
pub use metric::{DataPoint, Measurement, ParsedName, StatisticSummary, Unit};
pub use publish::Publisher;
pub use snapshot::MetricSnapshot;
