//! GCTime family: accumulated garbage-collection elapsed time.
//!
//! The Sun JVM runs two kinds of collection: quick minor copy
//! collections and intrusive major mark-sweep-compact collections.
//! Collectors are classified by name; collectors matching neither
//! category (e.g. G1 regional collectors under other names) are
//! ignored.

use tracing::debug;

use super::MetricCollector;
use crate::client::{JmxError, ManagementConnection, UNDEFINED};
use crate::config::ConnectionConfig;
use crate::protocol::{GraphConfig, MetricField, MetricSample};

const FIELDS: [MetricField; 2] = [
    MetricField {
        name: "CopyTime",
        label: "MinorTime",
        info: "The approximate accumulated collection elapsed time in milliseconds. \
               This method returns -1 if the collection elapsed time is undefined for this collector.",
        draw: None,
    },
    MetricField {
        name: "MarkSweepCompactTime",
        label: "MajorTime",
        info: "The approximate accumulated collection elapsed time in milliseconds. \
               This method returns -1 if the collection elapsed time is undefined for this collector. \
               The Java virtual machine implementation may use a high resolution timer to measure the \
               elapsed time. This method may return the same value even if the collection count has \
               been incremented if the collection elapsed time is very short.",
        draw: Some("AREA"),
    },
];

const GRAPH_INFO: &str = "The Sun JVM defines garbage collection in two modes: Minor copy \
    collections and Major Mark-Sweep-Compact collections. A minor collection runs relatively \
    quickly and involves moving live data around the heap in the presence of running threads. \
    A major collection is a much more intrusive garbage collection that suspends all execution \
    threads while it completes its task. In terms of performance tuning the heap, the primary \
    goal is to reduce the frequency and duration of major garbage collections.";

/// Collection category a collector name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcCategory {
    Minor,
    Major,
}

/// Classifies a collector by name.
///
/// Case-insensitive substring match with separators stripped, so
/// `Copy`, `PS Scavenge`-style `minor` aliases, `MarkSweepCompact` and
/// `Mark-Sweep-Compact` all resolve the same way.
pub fn classify(name: &str) -> Option<GcCategory> {
    let folded: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();

    if folded.contains("copy") || folded.contains("minor") {
        Some(GcCategory::Minor)
    } else if folded.contains("marksweepcompact") || folded.contains("major") {
        Some(GcCategory::Major)
    } else {
        None
    }
}

/// Collector for the GCTime family.
#[derive(Debug, Default)]
pub struct GcTimeCollector;

impl GcTimeCollector {
    pub fn new() -> Self {
        Self
    }

    /// Config-mode graph metadata for this family.
    pub fn graph(config: &ConnectionConfig) -> GraphConfig {
        GraphConfig {
            title: "GarbageCollectorTime".to_string(),
            vlabel: "Count",
            category: config.category.clone(),
            info: GRAPH_INFO,
        }
    }
}

impl MetricCollector for GcTimeCollector {
    fn fields(&self) -> &'static [MetricField] {
        &FIELDS
    }

    fn collect(&self, conn: &mut dyn ManagementConnection) -> Result<MetricSample, JmxError> {
        let collectors = conn.gc_collectors()?;

        // Several collectors may fall into one category; their defined
        // times are summed. A bucket with no defined contribution stays
        // at the -1 sentinel.
        let mut minor: Option<i64> = None;
        let mut major: Option<i64> = None;
        for collector in &collectors {
            let Some(category) = classify(&collector.name) else {
                debug!(name = %collector.name, "collector matches no category, ignored");
                continue;
            };
            if collector.collection_time_ms == UNDEFINED {
                continue;
            }
            let bucket = match category {
                GcCategory::Minor => &mut minor,
                GcCategory::Major => &mut major,
            };
            *bucket = Some(bucket.unwrap_or(0) + collector.collection_time_ms);
        }

        let mut sample = MetricSample::new();
        sample.push(FIELDS[0].name, minor.unwrap_or(UNDEFINED));
        sample.push(FIELDS[1].name, major.unwrap_or(UNDEFINED));
        Ok(sample)
    }
}
