// OpenMetrics text exposition.

use super::model::{FamilySample, MetricFamily, MetricKind, SampleValue};
use std::fmt::Write;

pub const CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Render families in order and terminate with a single `# EOF`.
pub(crate) fn render(families: &[MetricFamily]) -> String {
    let mut out = String::new();
    for family in families {
        write_family(&mut out, family);
    }
    out.push_str("# EOF\n");
    out
}

fn write_family(out: &mut String, family: &MetricFamily) {
    let _ = writeln!(out, "# HELP {} {}", family.name, escape_help(&family.help));
    let _ = writeln!(out, "# TYPE {} {}", family.name, family.kind.type_name());
    let sample_name = match family.kind {
        MetricKind::Info => format!("{}_info", family.name),
        MetricKind::Gauge | MetricKind::Boolean => family.name.clone(),
    };
    for sample in &family.samples {
        write_sample(out, &sample_name, sample);
    }
}

fn write_sample(out: &mut String, name: &str, sample: &FamilySample) {
    out.push_str(name);
    if !sample.labels.is_empty() {
        out.push('{');
        for (i, (label, value)) in sample.labels.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", label, escape_label_value(value));
        }
        out.push('}');
    }
    out.push(' ');
    match sample.value {
        SampleValue::Gauge(v) => out.push_str(&format_value(v)),
        SampleValue::Boolean(b) => out.push(if b { '1' } else { '0' }),
        SampleValue::Info => out.push('1'),
    }
    out.push('\n');
}

pub(crate) fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// HELP text follows the same escaping as label values.
pub(crate) fn escape_help(help: &str) -> String {
    escape_label_value(help)
}

pub(crate) fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}
