//! Munin plugin protocol rendering.
//!
//! Two disjoint line grammars on stdout: the `config` declaration block
//! (graph metadata plus per-field `.label`/`.info`/`.draw` lines) and
//! the value report (`<field>.value <n>` lines). The supervisor
//! correlates the two positionally by field name, so names must be
//! byte-identical across modes and field order must never change.
//!
//! Rendering is pure string construction from already-validated inputs;
//! it cannot fail.

use std::fmt::Write;

/// Static description of one reportable value, declared per family.
#[derive(Debug, Clone, Copy)]
pub struct MetricField {
    /// Field name, shared between config and report lines.
    pub name: &'static str,
    /// Display label for the graph legend.
    pub label: &'static str,
    /// One-line description shown by the supervisor.
    pub info: &'static str,
    /// Optional draw hint, e.g. `AREA`.
    pub draw: Option<&'static str>,
}

/// Ordered values produced by one collection call, one per declared
/// field of the family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    values: Vec<(&'static str, i64)>,
}

impl MetricSample {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn push(&mut self, name: &'static str, value: i64) {
        self.values.push((name, value));
    }

    pub fn pairs(&self) -> &[(&'static str, i64)] {
        &self.values
    }
}

impl Default for MetricSample {
    fn default() -> Self {
        Self::new()
    }
}

/// Graph-level metadata for the config block.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub title: String,
    pub vlabel: &'static str,
    pub category: String,
    pub info: &'static str,
}

/// Renders the `config` declaration block.
pub fn render_config(graph: &GraphConfig, fields: &[MetricField]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "graph_title {}", graph.title);
    let _ = writeln!(out, "graph_vlabel {}", graph.vlabel);
    let _ = writeln!(out, "graph_category {}", graph.category);
    let _ = writeln!(out, "graph_info {}", graph.info);
    for field in fields {
        let _ = writeln!(out, "{}.label {}", field.name, field.label);
        let _ = writeln!(out, "{}.info {}", field.name, field.info);
        if let Some(draw) = field.draw {
            let _ = writeln!(out, "{}.draw {}", field.name, draw);
        }
    }
    out
}

/// Renders the value report, one `<field>.value <n>` line per field in
/// declaration order.
pub fn render_report(sample: &MetricSample) -> String {
    let mut out = String::new();
    for (name, value) in sample.pairs() {
        let _ = writeln!(out, "{}.value {}", name, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [MetricField; 2] = [
        MetricField {
            name: "CopyTime",
            label: "MinorTime",
            info: "minor collections",
            draw: None,
        },
        MetricField {
            name: "MarkSweepCompactTime",
            label: "MajorTime",
            info: "major collections",
            draw: Some("AREA"),
        },
    ];

    fn graph() -> GraphConfig {
        GraphConfig {
            title: "GarbageCollectorTime".to_string(),
            vlabel: "Count",
            category: "jvm".to_string(),
            info: "gc time",
        }
    }

    #[test]
    fn render_config_emits_declaration_block() {
        let out = render_config(&graph(), &FIELDS);
        assert_eq!(
            out,
            "graph_title GarbageCollectorTime\n\
             graph_vlabel Count\n\
             graph_category jvm\n\
             graph_info gc time\n\
             CopyTime.label MinorTime\n\
             CopyTime.info minor collections\n\
             MarkSweepCompactTime.label MajorTime\n\
             MarkSweepCompactTime.info major collections\n\
             MarkSweepCompactTime.draw AREA\n"
        );
    }

    #[test]
    fn render_config_is_byte_stable() {
        assert_eq!(render_config(&graph(), &FIELDS), render_config(&graph(), &FIELDS));
    }

    #[test]
    fn render_report_preserves_field_order() {
        let mut sample = MetricSample::new();
        sample.push("CopyTime", 120);
        sample.push("MarkSweepCompactTime", 340);
        assert_eq!(
            render_report(&sample),
            "CopyTime.value 120\nMarkSweepCompactTime.value 340\n"
        );
    }

    #[test]
    fn render_report_passes_sentinel_through() {
        let mut sample = MetricSample::new();
        sample.push("CopyTime", -1);
        assert_eq!(render_report(&sample), "CopyTime.value -1\n");
    }

    #[test]
    fn config_and_report_field_names_match() {
        let mut sample = MetricSample::new();
        for field in &FIELDS {
            sample.push(field.name, 0);
        }
        let config = render_config(&graph(), &FIELDS);
        let config_names: Vec<&str> = config
            .lines()
            .filter_map(|l| l.split_once(".label ").map(|(n, _)| n))
            .collect();
        let report = render_report(&sample);
        let report_names: Vec<&str> = report
            .lines()
            .filter_map(|l| l.split_once(".value ").map(|(n, _)| n))
            .collect();
        assert_eq!(config_names, report_names);
    }
}
