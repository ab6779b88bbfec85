//! Wires configuration, credentials and a publisher together.
//!
//! Startup happens in two phases: credentials are resolved first and only a
//! successfully started `Backend` is able to receive flushes.

use tracing::info;

use super::config::Config;
use super::credentials::{self, Credentials, MetadataService};
use super::error::Error;
use super::flush::{FlushCoordinator, FlushReport};
use super::publish::Publisher;
use super::recv::FlushReceiver;
use super::snapshot::MetricSnapshot;

pub struct Backend<P> {
    namespace: String,
    coordinator: FlushCoordinator<P>,
}

impl<P: Publisher> Backend<P> {
    /// Resolve credentials, then build the publisher with them.
    ///
    /// `build` receives `None` when the publisher should use its default
    /// credential chain.
    pub fn start<M, F>(config: &Config, metadata: &M, build: F) -> Result<Backend<P>, Error>
    where
        M: MetadataService + ?Sized,
        F: FnOnce(&Config, Option<Credentials>) -> P,
    {
        let source = config.credential_source()?;
        let credentials = credentials::resolve(&source, metadata)?;

        let publisher = build(config, credentials);
        info!(namespace = %config.namespace, "backend started");

        Ok(Backend {
            namespace: config.namespace.clone(),
            coordinator: FlushCoordinator::new(publisher),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn publisher(&self) -> &P {
        self.coordinator.publisher()
    }

    pub fn into_publisher(self) -> P {
        self.coordinator.into_publisher()
    }

    pub fn flush(&self, timestamp: u64, snapshot: &MetricSnapshot) -> FlushReport {
        self.coordinator.flush(timestamp, snapshot)
    }

    /// Flush every event from `receiver` until all senders are gone. Returns
    /// the number of flush cycles run.
    pub fn listen(&self, receiver: FlushReceiver) -> usize {
        let mut cycles = 0;
        for event in receiver {
            self.flush(event.timestamp, &event.snapshot);
            cycles += 1;
        }
        info!(cycles, "flush listener stopped");
        cycles
    }
}
