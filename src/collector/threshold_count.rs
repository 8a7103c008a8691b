//! ThresholdUsageCount family: memory-pool usage-threshold crossings.
//!
//! Reports how many times the Tenured and Perm generation pools have
//! crossed their configured usage thresholds. Pools are selected by
//! name containment; a JVM without a matching pool (or a pool without
//! threshold support) reports the -1 sentinel for that field.

use tracing::debug;

use super::MetricCollector;
use crate::client::{JmxError, ManagementConnection, UNDEFINED};
use crate::config::ConnectionConfig;
use crate::protocol::{GraphConfig, MetricField, MetricSample};

const FIELDS: [MetricField; 2] = [
    MetricField {
        name: "TenuredGen",
        label: "TenuredGen",
        info: "UsageThresholdCount for Tenured Gen",
        draw: None,
    },
    MetricField {
        name: "PermGen",
        label: "PermGen",
        info: "UsageThresholdCount for Perm Gen",
        draw: None,
    },
];

const GRAPH_INFO: &str =
    "Returns the number of times that the memory usage has crossed the usage threshold.";

/// Generation a pool name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Tenured,
    Perm,
}

/// Classifies a memory pool by name containment, matching the literal
/// pool names the JVM publishes (`Tenured Gen`, `Perm Gen`,
/// `CMS Perm Gen`, ...).
pub fn classify(name: &str) -> Option<PoolKind> {
    if name.contains("Tenured") {
        Some(PoolKind::Tenured)
    } else if name.contains("Perm") {
        Some(PoolKind::Perm)
    } else {
        None
    }
}

/// Collector for the ThresholdUsageCount family.
#[derive(Debug, Default)]
pub struct ThresholdCountCollector;

impl ThresholdCountCollector {
    pub fn new() -> Self {
        Self
    }

    /// Config-mode graph metadata for this family. The title embeds the
    /// resolved port so graphs from several JVMs on one host stay
    /// distinguishable.
    pub fn graph(config: &ConnectionConfig) -> GraphConfig {
        GraphConfig {
            title: format!("JVM (port {}) MemorythresholdUsageCount", config.port),
            vlabel: "count",
            category: config.category.clone(),
            info: GRAPH_INFO,
        }
    }
}

impl MetricCollector for ThresholdCountCollector {
    fn fields(&self) -> &'static [MetricField] {
        &FIELDS
    }

    fn collect(&self, conn: &mut dyn ManagementConnection) -> Result<MetricSample, JmxError> {
        let pools = conn.memory_pools()?;

        // First matching pool per generation wins; an absent pool keeps
        // the -1 sentinel.
        let mut tenured: Option<i64> = None;
        let mut perm: Option<i64> = None;
        for pool in &pools {
            let bucket = match classify(&pool.name) {
                Some(PoolKind::Tenured) => &mut tenured,
                Some(PoolKind::Perm) => &mut perm,
                None => continue,
            };
            if bucket.is_none() {
                *bucket = Some(pool.usage_threshold_count);
            } else {
                debug!(name = %pool.name, "additional matching pool ignored");
            }
        }

        let mut sample = MetricSample::new();
        sample.push(FIELDS[0].name, tenured.unwrap_or(UNDEFINED));
        sample.push(FIELDS[1].name, perm.unwrap_or(UNDEFINED));
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockConnection;

    #[test]
    fn classify_selects_pools_by_containment() {
        assert_eq!(classify("Tenured Gen"), Some(PoolKind::Tenured));
        assert_eq!(classify("Perm Gen"), Some(PoolKind::Perm));
        assert_eq!(classify("CMS Perm Gen"), Some(PoolKind::Perm));
        assert_eq!(classify("Eden Space"), None);
        // Containment is case-sensitive, matching the published names.
        assert_eq!(classify("tenured gen"), None);
    }

    #[test]
    fn collect_reads_threshold_counts() {
        let mut conn = MockConnection::typical_jvm();
        let sample = ThresholdCountCollector::new().collect(&mut conn).unwrap();
        assert_eq!(sample.pairs(), &[("TenuredGen", 3), ("PermGen", 1)]);
    }

    #[test]
    fn collect_uses_sentinel_for_missing_pool() {
        let mut conn = MockConnection::new()
            .with_memory_pool("Eden Space", 0)
            .with_memory_pool("Tenured Gen", 5);
        let sample = ThresholdCountCollector::new().collect(&mut conn).unwrap();
        assert_eq!(sample.pairs(), &[("TenuredGen", 5), ("PermGen", -1)]);
    }

    #[test]
    fn collect_takes_first_matching_pool() {
        let mut conn = MockConnection::new()
            .with_memory_pool("Perm Gen", 2)
            .with_memory_pool("CMS Perm Gen", 9);
        let sample = ThresholdCountCollector::new().collect(&mut conn).unwrap();
        assert_eq!(sample.pairs()[1], ("PermGen", 2));
    }

    #[test]
    fn collect_propagates_query_failure() {
        let mut conn = MockConnection::failing();
        assert!(ThresholdCountCollector::new().collect(&mut conn).is_err());
    }

    #[test]
    fn graph_title_embeds_resolved_port() {
        let config = ConnectionConfig {
            host: "localhost".to_string(),
            port: "9010".to_string(),
            category: "tomcat".to_string(),
        };
        let graph = ThresholdCountCollector::graph(&config);
        assert_eq!(graph.title, "JVM (port 9010) MemorythresholdUsageCount");
        assert_eq!(graph.category, "tomcat");
    }
}
