//! munin-jmx - Munin plugins for JVM runtime metrics.
//!
//! This library provides the core functionality shared between:
//! - `jmx_gc_time` - accumulated garbage-collection time (minor/major)
//! - `jmx_threshold_usage_count` - memory-pool usage-threshold crossings
//!
//! Each plugin is a single-shot poller: Munin invokes it once per
//! reporting interval, either with `config` (print the graph
//! declaration, no network) or with an instance name (connect to the
//! JVM's Jolokia endpoint, collect, print `<field>.value` lines).

pub mod client;
pub mod collector;
pub mod config;
pub mod plugin;
pub mod protocol;
