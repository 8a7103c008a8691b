//! Jolokia HTTP bridge client.
//!
//! Jolokia exposes JMX over HTTP/JSON: a `read` request with an MBean
//! pattern returns one attribute map per matching bean. This is the
//! standard way non-JVM clients reach `java.lang:type=GarbageCollector`
//! and `java.lang:type=MemoryPool`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{GcCollectorInfo, JmxError, ManagementConnection, MemoryPoolInfo, UNDEFINED};

/// Bound on connect and per-query time. An unreachable endpoint must
/// not hang the invocation past the scheduler's polling interval.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const GC_MBEAN_PATTERN: &str = "java.lang:type=GarbageCollector,*";
const POOL_MBEAN_PATTERN: &str = "java.lang:type=MemoryPool,*";

/// Jolokia `read` request body.
#[derive(Serialize)]
struct ReadRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    mbean: &'a str,
    attribute: &'a str,
}

/// An open session to one JVM's Jolokia endpoint.
pub struct JolokiaConnection {
    http: Client,
    base_url: String,
}

impl JolokiaConnection {
    /// Connects to `http://<host>:<port>/jolokia` and verifies the
    /// endpoint with a `version` handshake.
    pub fn connect(host: &str, port: &str) -> Result<Self, JmxError> {
        let http = Client::builder()
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| JmxError::Connection(e.to_string()))?;

        let connection = Self {
            http,
            base_url: format!("http://{}:{}/jolokia", host, port),
        };
        connection.handshake()?;
        debug!(endpoint = %connection.base_url, "management endpoint connected");
        Ok(connection)
    }

    fn handshake(&self) -> Result<(), JmxError> {
        let response = self
            .http
            .get(format!("{}/version", self.base_url))
            .send()
            .map_err(|e| JmxError::Connection(format_http_error(&e)))?;

        if !response.status().is_success() {
            return Err(JmxError::Connection(format!(
                "handshake failed: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Issues a pattern `read` and returns the per-bean value map.
    fn read_attribute(&self, mbean: &str, attribute: &str) -> Result<Value, JmxError> {
        let request = ReadRequest {
            kind: "read",
            mbean,
            attribute,
        };

        let response = self
            .http
            .post(&self.base_url)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    JmxError::Connection(format_http_error(&e))
                } else {
                    JmxError::Query(format_http_error(&e))
                }
            })?;

        let body: Value = response
            .json()
            .map_err(|e| JmxError::Query(format!("{}: malformed response: {}", mbean, e)))?;

        let status = body.get("status").and_then(Value::as_i64).unwrap_or(0);
        if status != 200 {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(JmxError::Query(format!(
                "{} {}: {}",
                mbean, attribute, message
            )));
        }

        body.get("value")
            .cloned()
            .ok_or_else(|| JmxError::Query(format!("{}: response has no value", mbean)))
    }
}

impl ManagementConnection for JolokiaConnection {
    fn gc_collectors(&mut self) -> Result<Vec<GcCollectorInfo>, JmxError> {
        let value = self.read_attribute(GC_MBEAN_PATTERN, "CollectionTime")?;
        let beans = value
            .as_object()
            .ok_or_else(|| JmxError::Query(format!("{}: expected bean map", GC_MBEAN_PATTERN)))?;

        let mut collectors = Vec::new();
        for (object_name, attributes) in beans {
            let Some(name) = mbean_name_property(object_name) else {
                continue;
            };
            let time = coerce_counter(attributes.get("CollectionTime"), "CollectionTime")?;
            collectors.push(GcCollectorInfo {
                name,
                collection_time_ms: time,
            });
        }
        debug!(count = collectors.len(), "enumerated garbage collectors");
        Ok(collectors)
    }

    fn memory_pools(&mut self) -> Result<Vec<MemoryPoolInfo>, JmxError> {
        let value = self.read_attribute(POOL_MBEAN_PATTERN, "UsageThresholdCount")?;
        let beans = value
            .as_object()
            .ok_or_else(|| JmxError::Query(format!("{}: expected bean map", POOL_MBEAN_PATTERN)))?;

        let mut pools = Vec::new();
        for (object_name, attributes) in beans {
            let Some(name) = mbean_name_property(object_name) else {
                continue;
            };
            // Pools without usage-threshold support either omit the
            // attribute or report it as an error entry; both map to the
            // undefined sentinel rather than a hard failure.
            let count = match attributes.get("UsageThresholdCount") {
                Some(v) => coerce_counter(Some(v), "UsageThresholdCount")?,
                None => UNDEFINED,
            };
            pools.push(MemoryPoolInfo {
                name,
                usage_threshold_count: count,
            });
        }
        debug!(count = pools.len(), "enumerated memory pools");
        Ok(pools)
    }
}

/// Extracts the `name=` property from a JMX object name, e.g.
/// `java.lang:name=Copy,type=GarbageCollector` → `Copy`.
fn mbean_name_property(object_name: &str) -> Option<String> {
    let properties = object_name.split_once(':')?.1;
    properties
        .split(',')
        .find_map(|p| p.strip_prefix("name="))
        .map(|name| name.to_string())
}

/// Coerces a JSON attribute value to an i64 counter.
///
/// JSON `null` (and an absent attribute) means the runtime reports the
/// counter as undefined; anything non-numeric is a type error.
fn coerce_counter(value: Option<&Value>, attribute: &str) -> Result<i64, JmxError> {
    match value {
        None | Some(Value::Null) => Ok(UNDEFINED),
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .ok_or_else(|| JmxError::Type {
                attribute: attribute.to_string(),
                value: v.to_string(),
            }),
    }
}

/// Formats an HTTP transport error for display.
fn format_http_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!(
            "endpoint unreachable ({})",
            innermost_source(e).unwrap_or_else(|| "connect failed".to_string())
        )
    } else {
        e.to_string()
    }
}

/// Walks the error source chain for the innermost message, which for
/// connect failures carries the OS-level cause ("Connection refused").
fn innermost_source(e: &dyn std::error::Error) -> Option<String> {
    let mut source = e.source()?;
    while let Some(inner) = source.source() {
        source = inner;
    }
    Some(source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mbean_name_property_extracts_name() {
        assert_eq!(
            mbean_name_property("java.lang:name=Copy,type=GarbageCollector"),
            Some("Copy".to_string())
        );
        assert_eq!(
            mbean_name_property("java.lang:type=MemoryPool,name=Tenured Gen"),
            Some("Tenured Gen".to_string())
        );
    }

    #[test]
    fn mbean_name_property_rejects_unnamed_beans() {
        assert_eq!(mbean_name_property("java.lang:type=Memory"), None);
        assert_eq!(mbean_name_property("not-an-object-name"), None);
    }

    #[test]
    fn coerce_counter_accepts_integers() {
        assert_eq!(coerce_counter(Some(&json!(340)), "CollectionTime").unwrap(), 340);
        assert_eq!(coerce_counter(Some(&json!(0)), "CollectionTime").unwrap(), 0);
    }

    #[test]
    fn coerce_counter_maps_null_and_missing_to_undefined() {
        assert_eq!(
            coerce_counter(Some(&Value::Null), "CollectionTime").unwrap(),
            UNDEFINED
        );
        assert_eq!(coerce_counter(None, "CollectionTime").unwrap(), UNDEFINED);
    }

    #[test]
    fn coerce_counter_rejects_non_numeric() {
        let err = coerce_counter(Some(&json!("fast")), "CollectionTime").unwrap_err();
        match err {
            JmxError::Type { attribute, value } => {
                assert_eq!(attribute, "CollectionTime");
                assert_eq!(value, "\"fast\"");
            }
            other => panic!("expected type error, got {}", other),
        }
    }
}
