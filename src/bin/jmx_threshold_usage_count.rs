//! jmx_threshold_usage_count - Munin plugin for memory-pool
//! usage-threshold crossings.
//!
//! Reports how often the Tenured and Perm generation pools crossed
//! their configured usage thresholds, over the JVM's Jolokia endpoint.

use clap::Parser;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

use munin_jmx::plugin::{self, Family, Mode};

/// Munin plugin reporting JVM memory-pool usage-threshold crossings.
#[derive(Parser)]
#[command(
    name = "jmx_threshold_usage_count",
    about = "Munin plugin: JVM memory-pool usage-threshold crossings",
    version
)]
struct Args {
    /// "config" prints the graph declaration; any other token is the
    /// connection instance name for a value report.
    mode: String,
}

/// Diagnostics go to stderr; stdout is reserved for protocol output.
fn init_logging() {
    let filter = EnvFilter::from_default_env()
        .add_directive(Level::WARN.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging();

    match plugin::run(Family::ThresholdUsageCount, Mode::from_arg(&args.mode)) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            // The original plugin printed failures to stdout and exited
            // 0, indistinguishable from success for the supervisor.
            // Report on stderr and fail the invocation instead.
            error!("jmx_threshold_usage_count: {}", e);
            std::process::exit(1);
        }
    }
}
