// Metric descriptors, label sets and typed samples.

use std::borrow::Cow;

/// Unit suffix appended to gauge names, following the OpenMetrics naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Bytes,
    Ratio,
    Seconds,
    Celsius,
}

impl Unit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Bytes => "bytes",
            Unit::Ratio => "ratio",
            Unit::Seconds => "seconds",
            Unit::Celsius => "celsius",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub unit: Option<Unit>,
}

impl MetricDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// Label pairs in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels(Vec<(String, String)>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A labelled value: `f64` for gauges, `bool` for booleans.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<V> {
    pub labels: Labels,
    pub value: V,
}

impl<V> Sample<V> {
    pub fn new(labels: Labels, value: V) -> Self {
        Self { labels, value }
    }
}

/// Info record: the `name` label plus exactly one informational label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRecord {
    pub name: String,
    pub key: String,
    pub value: String,
}

impl InfoRecord {
    /// `key` must be a label name other than `name`.
    pub fn new(name: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        debug_assert!(
            key != "name" && is_label_name(&key),
            "invalid info label {:?}",
            key
        );
        Self {
            name: name.into(),
            key,
            value: value.into(),
        }
    }

    pub(crate) fn labels(&self) -> Labels {
        Labels::new()
            .with("name", self.name.as_str())
            .with(self.key.as_str(), self.value.as_str())
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
pub fn is_label_name(s: &str) -> bool {
    let mut bytes = s.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    /// Booleans are exposed as 0/1 gauges.
    Boolean,
    Info,
}

impl MetricKind {
    /// The `# TYPE` keyword.
    pub const fn type_name(self) -> &'static str {
        match self {
            MetricKind::Gauge | MetricKind::Boolean => "gauge",
            MetricKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SampleValue {
    Gauge(f64),
    Boolean(bool),
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FamilySample {
    pub(crate) labels: Labels,
    pub(crate) value: SampleValue,
}

/// One named, typed group of samples. `name` already carries namespace and unit.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub(crate) name: String,
    pub(crate) help: String,
    pub(crate) kind: MetricKind,
    pub(crate) samples: Vec<FamilySample>,
}

impl MetricFamily {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
