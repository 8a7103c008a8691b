//! jmx_gc_time - Munin plugin for JVM garbage-collection time.
//!
//! Reports accumulated minor (copy) and major (mark-sweep-compact)
//! collection time over the JVM's Jolokia endpoint.

use clap::Parser;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

use munin_jmx::plugin::{self, Family, Mode};

/// Munin plugin reporting accumulated JVM garbage-collection time.
#[derive(Parser)]
#[command(name = "jmx_gc_time", about = "Munin plugin: JVM garbage-collection time", version)]
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

    match plugin::run(Family::GcTime, Mode::from_arg(&args.mode)) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            // The original plugin printed failures to stdout and exited
            // 0, indistinguishable from success for the supervisor.
            // Report on stderr and fail the invocation instead.
            error!("jmx_gc_time: {}", e);
            std::process::exit(1);
        }
    }
}
