//! Plugin entrypoint dispatch, shared by both binaries.
//!
//! One invocation runs exactly one of two paths: `config` renders the
//! static declaration block from the resolved environment alone, and
//! report mode connects, collects once, and renders the values. There
//! is no partial report: the first connection or collection error
//! aborts the invocation before anything reaches stdout.

use tracing::debug;

use crate::client::{JmxError, JolokiaConnection, ManagementConnection};
use crate::collector::{GcTimeCollector, MetricCollector, ThresholdCountCollector};
use crate::config::ConnectionConfig;
use crate::protocol::{self, GraphConfig};

/// The metric family a binary serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    GcTime,
    ThresholdUsageCount,
}

impl Family {
    fn collector(&self) -> Box<dyn MetricCollector> {
        match self {
            Family::GcTime => Box::new(GcTimeCollector::new()),
            Family::ThresholdUsageCount => Box::new(ThresholdCountCollector::new()),
        }
    }

    fn graph(&self, config: &ConnectionConfig) -> GraphConfig {
        match self {
            Family::GcTime => GcTimeCollector::graph(config),
            Family::ThresholdUsageCount => ThresholdCountCollector::graph(config),
        }
    }
}

/// Invocation mode, decided by the single command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print the graph declaration block. Never opens a connection.
    Config,
    /// Connect and report values; the token is the instance name used
    /// for connection resolution.
    Report(String),
}

impl Mode {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "config" {
            Mode::Config
        } else {
            Mode::Report(arg.to_string())
        }
    }
}

/// Runs one plugin invocation and returns the protocol output for
/// stdout. Errors carry no partial output.
pub fn run(family: Family, mode: Mode) -> Result<String, JmxError> {
    match mode {
        Mode::Config => {
            let config = ConnectionConfig::resolve(None);
            Ok(protocol::render_config(
                &family.graph(&config),
                family.collector().fields(),
            ))
        }
        Mode::Report(instance) => {
            let config = ConnectionConfig::resolve(Some(&instance));
            debug!(host = %config.host, port = %config.port, "connecting");
            let mut conn = JolokiaConnection::connect(&config.host, &config.port)?;
            report(family, &mut conn)
        }
    }
}

/// Collects and renders the value report over an open connection.
/// Split from [`run`] so tests can drive it with a mock connection.
pub fn report(
    family: Family,
    conn: &mut dyn ManagementConnection,
) -> Result<String, JmxError> {
    let sample = family.collector().collect(conn)?;
    Ok(protocol::render_report(&sample))
}
