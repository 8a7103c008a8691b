//! In-memory management connection for testing.
//!
//! Plays the role the mock `/proc` filesystem plays for the system
//! collectors: collectors run against synthetic entity lists with no
//! live JVM.

use super::{GcCollectorInfo, JmxError, ManagementConnection, MemoryPoolInfo};

/// Mock implementation of [`ManagementConnection`].
#[derive(Debug, Default)]
pub struct MockConnection {
    gc: Vec<GcCollectorInfo>,
    pools: Vec<MemoryPoolInfo>,
    fail_queries: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a garbage collector entity.
    pub fn with_gc_collector(mut self, name: &str, collection_time_ms: i64) -> Self {
        self.gc.push(GcCollectorInfo {
            name: name.to_string(),
            collection_time_ms,
        });
        self
    }

    /// Adds a memory pool entity.
    pub fn with_memory_pool(mut self, name: &str, usage_threshold_count: i64) -> Self {
        self.pools.push(MemoryPoolInfo {
            name: name.to_string(),
            usage_threshold_count,
        });
        self
    }

    /// Makes every query fail, simulating a session that drops after
    /// the handshake.
    pub fn failing() -> Self {
        Self {
            fail_queries: true,
            ..Self::default()
        }
    }

    /// A classic Sun JVM: Copy + MarkSweepCompact collectors and the
    /// standard generational pools.
    pub fn typical_jvm() -> Self {
        Self::new()
            .with_gc_collector("Copy", 120)
            .with_gc_collector("MarkSweepCompact", 340)
            .with_memory_pool("Eden Space", 0)
            .with_memory_pool("Survivor Space", 0)
            .with_memory_pool("Tenured Gen", 3)
            .with_memory_pool("Perm Gen", 1)
    }
}

impl ManagementConnection for MockConnection {
    fn gc_collectors(&mut self) -> Result<Vec<GcCollectorInfo>, JmxError> {
        if self.fail_queries {
            return Err(JmxError::Query("mock: session dropped".to_string()));
        }
        Ok(self.gc.clone())
    }

    fn memory_pools(&mut self) -> Result<Vec<MemoryPoolInfo>, JmxError> {
        if self.fail_queries {
            return Err(JmxError::Query("mock: session dropped".to_string()));
        }
        Ok(self.pools.clone())
    }
}
