//! Remote JVM management access.
//!
//! The `ManagementConnection` trait is the seam between metric
//! collection and the wire: collectors only see entity lists, so they
//! can be exercised against `MockConnection` without a live JVM.
//! `JolokiaConnection` is the production implementation, speaking the
//! Jolokia HTTP bridge exposed by the target JVM.
//!
//! A connection is scoped to one plugin invocation and released by
//! `Drop` on every exit path, success or failure.

pub mod jolokia;
pub mod mock;

pub use jolokia::JolokiaConnection;
pub use mock::MockConnection;

/// Sentinel for counters the remote runtime reports as undefined.
pub const UNDEFINED: i64 = -1;

/// Error type for JVM management access.
#[derive(Debug)]
pub enum JmxError {
    /// Endpoint unreachable, refused, or handshake/authentication failed.
    Connection(String),
    /// Endpoint reachable but the requested bean or attribute is absent,
    /// or the query itself failed.
    Query(String),
    /// Attribute present but not coercible to a 64-bit integer.
    Type { attribute: String, value: String },
}

impl std::fmt::Display for JmxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JmxError::Connection(msg) => write!(f, "JMX connection error: {}", msg),
            JmxError::Query(msg) => write!(f, "JMX query error: {}", msg),
            JmxError::Type { attribute, value } => {
                write!(f, "JMX attribute {} is not numeric: {}", attribute, value)
            }
        }
    }
}

impl std::error::Error for JmxError {}

/// A garbage collector visible through the management endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcCollectorInfo {
    /// The collector's MBean `name` property, e.g. `Copy`.
    pub name: String,
    /// Accumulated collection elapsed time in milliseconds;
    /// [`UNDEFINED`] if the runtime does not track it.
    pub collection_time_ms: i64,
}

/// A memory pool visible through the management endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPoolInfo {
    /// The pool's MBean `name` property, e.g. `Tenured Gen`.
    pub name: String,
    /// Number of usage-threshold crossings; [`UNDEFINED`] if the pool
    /// does not support a usage threshold.
    pub usage_threshold_count: i64,
}

/// Read access to one remote JVM's runtime counters.
///
/// Both queries are read-only and idempotent: repeated calls have no
/// side effects, though the counters themselves evolve remotely.
pub trait ManagementConnection {
    /// Enumerates all garbage collectors with their accumulated
    /// collection time.
    fn gc_collectors(&mut self) -> Result<Vec<GcCollectorInfo>, JmxError>;

    /// Enumerates all memory pools with their usage-threshold crossing
    /// counts.
    fn memory_pools(&mut self) -> Result<Vec<MemoryPoolInfo>, JmxError>;
}
