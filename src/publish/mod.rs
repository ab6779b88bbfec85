//! Publishers hand data points to the monitoring backend.
//!
//! The flush coordinator only knows about the `Publisher` trait; retries,
//! authentication and batching are up to the implementation.

use super::error::PublishError;
use super::metric::DataPoint;

mod json;
mod log;

pub use self::json::JsonPublisher;
pub use self::log::LogPublisher;

pub trait Publisher {
    fn publish(&self, point: &DataPoint) -> Result<(), PublishError>;
}

impl<'a, P: Publisher + ?Sized> Publisher for &'a P {
    fn publish(&self, point: &DataPoint) -> Result<(), PublishError> {
        (**self).publish(point)
    }
}

impl<P: Publisher + ?Sized> Publisher for Box<P> {
    fn publish(&self, point: &DataPoint) -> Result<(), PublishError> {
        (**self).publish(point)
    }
}

/// Publisher backed by a closure.
pub struct FnPublisher<F> {
    f: F,
}

impl<F> Publisher for FnPublisher<F>
where
    F: Fn(&DataPoint) -> Result<(), PublishError>,
{
    fn publish(&self, point: &DataPoint) -> Result<(), PublishError> {
        (self.f)(point)
    }
}

/// Wrap a closure so it can be used as a publisher.
pub fn from_fn<F>(f: F) -> FnPublisher<F>
where
    F: Fn(&DataPoint) -> Result<(), PublishError>,
{
    FnPublisher { f }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use string_cache::DefaultAtom as Atom;

    use super::*;
    use crate::metric::{Measurement, ParsedName, Unit};

    fn point() -> DataPoint {
        DataPoint {
            name: ParsedName {
                metric_name: Atom::from("requests"),
                dimensions: vec![],
            },
            unit: Unit::Count,
            timestamp: 0,
            measurement: Measurement::Value(1.0),
        }
    }

    #[test]
    fn it_publishes_through_closures() {
        let calls = Cell::new(0);
        let publisher = from_fn(|_| {
            calls.set(calls.get() + 1);
            Ok(())
        });

        publisher.publish(&point()).unwrap();
        (&publisher).publish(&point()).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn it_publishes_through_boxes() {
        let publisher: Box<dyn Publisher> =
            Box::new(from_fn(|_| Err(PublishError::Rejected("nope".to_string()))));

        assert!(publisher.publish(&point()).is_err());
    }
}
