//! Metric families and their collection logic.
//!
//! A family pairs a fixed, ordered field declaration with the logic
//! that produces a matching sample from a management connection. The
//! field list drives `config` mode; `collect` drives report mode; both
//! must agree on field names and order. Adding a family means adding a
//! new implementation, not touching existing ones.

mod gc_time;
mod threshold_count;

pub use gc_time::GcTimeCollector;
pub use threshold_count::ThresholdCountCollector;

use crate::client::{JmxError, ManagementConnection};
use crate::protocol::{MetricField, MetricSample};

/// One metric family's collection capability.
pub trait MetricCollector {
    /// The family's field declarations, in report order.
    fn fields(&self) -> &'static [MetricField];

    /// Produces one value per declared field, in declaration order.
    ///
    /// Read-only and idempotent with respect to the remote runtime.
    fn collect(&self, conn: &mut dyn ManagementConnection) -> Result<MetricSample, JmxError>;
}
