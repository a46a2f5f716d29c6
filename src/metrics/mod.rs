// Per-request metric builder rendered as an OpenMetrics document.

mod exposition;
mod model;

pub use exposition::CONTENT_TYPE;
pub use model::{InfoRecord, Labels, MetricDescriptor, MetricFamily, MetricKind, Sample, Unit};

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use model::{FamilySample, SampleValue};

/// Accumulates metric families under one namespace (e.g. `docker`).
/// Built fresh for every scrape, rendered once, then dropped.
#[derive(Debug, Clone)]
pub struct OpenMetrics {
    namespace: String,
    families: Vec<MetricFamily>,
}

impl OpenMetrics {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            families: Vec::new(),
        }
    }

    /// `{namespace}_{name}_{unit}`; the unit is not repeated if the name already ends with it.
    fn family_name(&self, descriptor: &MetricDescriptor, unit: Option<Unit>) -> String {
        let mut name = format!("{}_{}", self.namespace, descriptor.name);
        if let Some(unit) = unit {
            let suffix = format!("_{}", unit.as_str());
            if !name.ends_with(&suffix) {
                name.push_str(&suffix);
            }
        }
        name
    }

    fn push(
        &mut self,
        descriptor: &MetricDescriptor,
        kind: MetricKind,
        samples: Vec<FamilySample>,
    ) {
        let unit = match kind {
            MetricKind::Gauge => descriptor.unit,
            MetricKind::Boolean | MetricKind::Info => None,
        };
        let name = self.family_name(descriptor, unit);
        self.families.push(MetricFamily {
            name,
            help: descriptor.description.to_string(),
            kind,
            samples,
        });
    }

    pub fn add_gauge<I>(&mut self, descriptor: &MetricDescriptor, samples: I) -> &mut Self
    where
        I: IntoIterator<Item = Sample<f64>>,
    {
        let samples = samples
            .into_iter()
            .map(|s| FamilySample {
                labels: s.labels,
                value: SampleValue::Gauge(s.value),
            })
            .collect();
        self.push(descriptor, MetricKind::Gauge, samples);
        self
    }

    /// Rendered as a gauge with value 0 or 1. Booleans never carry a unit.
    pub fn add_boolean<I>(&mut self, descriptor: &MetricDescriptor, samples: I) -> &mut Self
    where
        I: IntoIterator<Item = Sample<bool>>,
    {
        let samples = samples
            .into_iter()
            .map(|s| FamilySample {
                labels: s.labels,
                value: SampleValue::Boolean(s.value),
            })
            .collect();
        self.push(descriptor, MetricKind::Boolean, samples);
        self
    }

    /// Each record becomes one `{family}_info{name="..",key=".."} 1` sample.
    pub fn add_info<I>(&mut self, descriptor: &MetricDescriptor, records: I) -> &mut Self
    where
        I: IntoIterator<Item = InfoRecord>,
    {
        let samples = records
            .into_iter()
            .map(|r| FamilySample {
                labels: r.labels(),
                value: SampleValue::Info,
            })
            .collect();
        self.push(descriptor, MetricKind::Info, samples);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn families(&self) -> &[MetricFamily] {
        &self.families
    }

    pub fn render(&self) -> String {
        exposition::render(&self.families)
    }
}

impl IntoResponse for OpenMetrics {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, CONTENT_TYPE)],
            self.render(),
        )
            .into_response()
    }
}
