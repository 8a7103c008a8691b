//! Connection resolution from the Munin plugin environment.
//!
//! Munin hands plugin configuration to the process as environment
//! variables (`[jmx_*]` sections in plugin-conf.d become `jmx_host`,
//! `jmx_port`, ...). The resolver only reads that environment; it never
//! touches the network, so `config` mode stays connection-free.

/// Resolved connection parameters for one JVM instance.
///
/// The port is kept as a string: it is only ever spliced into the
/// endpoint URL and into graph titles, never used as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: String,
    pub category: String,
}

/// Default Jolokia agent port.
const DEFAULT_PORT: &str = "8778";

impl ConnectionConfig {
    /// Resolves connection parameters for the given instance name.
    ///
    /// With `Some("tomcat")`, `jmx_tomcat_host` is consulted before the
    /// shared `jmx_host`; with `None` only the shared keys apply.
    /// Defaults: host `localhost`, port `8778`, category `jvm`.
    pub fn resolve(instance: Option<&str>) -> Self {
        Self {
            host: lookup(instance, "host").unwrap_or_else(|| "localhost".to_string()),
            port: lookup(instance, "port").unwrap_or_else(|| DEFAULT_PORT.to_string()),
            category: lookup(instance, "category").unwrap_or_else(|| "jvm".to_string()),
        }
    }
}

/// Reads `jmx_<instance>_<key>` first, then the shared `jmx_<key>`.
fn lookup(instance: Option<&str>, key: &str) -> Option<String> {
    if let Some(name) = instance
        && let Ok(value) = std::env::var(format!("jmx_{}_{}", name, key))
    {
        return Some(value);
    }
    std::env::var(format!("jmx_{}", key)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Instance-scoped variables keep these tests independent of each
    // other and of any shared jmx_* values in the test environment.

    #[test]
    fn resolve_uses_defaults_when_unset() {
        let config = ConnectionConfig::resolve(Some("no_such_instance"));
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, "8778");
        assert_eq!(config.category, "jvm");
    }

    #[test]
    fn resolve_prefers_instance_scoped_keys() {
        unsafe {
            std::env::set_var("jmx_cfgtest_a_host", "jvm-a.internal");
            std::env::set_var("jmx_cfgtest_a_port", "9010");
        }
        let config = ConnectionConfig::resolve(Some("cfgtest_a"));
        assert_eq!(config.host, "jvm-a.internal");
        assert_eq!(config.port, "9010");
        assert_eq!(config.category, "jvm");
    }

    #[test]
    fn resolve_is_stable_across_calls() {
        unsafe {
            std::env::set_var("jmx_cfgtest_b_category", "tomcat");
        }
        let first = ConnectionConfig::resolve(Some("cfgtest_b"));
        let second = ConnectionConfig::resolve(Some("cfgtest_b"));
        assert_eq!(first, second);
        assert_eq!(first.category, "tomcat");
    }
}
