//! Core types for query resolution

use crate::error::QueryError;
use querydash_storage::QueryMode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A submitted natural-language query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub mode: QueryMode,
}

impl Query {
    pub fn new(text: impl Into<String>, mode: QueryMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    pub fn local(text: impl Into<String>) -> Self {
        Self::new(text, QueryMode::Local)
    }

    pub fn remote(text: impl Into<String>) -> Self {
        Self::new(text, QueryMode::Remote)
    }

    /// Reject blank queries
    pub fn validate(&self) -> Result<(), QueryError> {
        ensure_not_blank(&self.text)
    }
}

pub(crate) fn ensure_not_blank(text: &str) -> Result<(), QueryError> {
    if text.trim().is_empty() {
        Err(QueryError::InvalidQuery)
    } else {
        Ok(())
    }
}

/// Chart type hint for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
    Other(String),
}

impl ChartKind {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bar" => ChartKind::Bar,
            "line" => ChartKind::Line,
            "pie" => ChartKind::Pie,
            "area" => ChartKind::Area,
            _ => ChartKind::Other(name.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Area => "area",
            ChartKind::Other(name) => name,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChartKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Tabular data, empty when absent
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// Normalized result handed to the presentation layer.
///
/// `categories` and `values` always have the same length; they are private
/// so the pairing can only be set through [`ResultPayload::with_series`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPayload {
    pub title: String,
    pub description: String,
    pub summary: String,
    pub chart_kind: ChartKind,
    categories: Vec<String>,
    values: Vec<f64>,
    pub metrics: BTreeMap<String, String>,
    pub insights: Vec<String>,
    pub table: DataTable,
}

pub(crate) const PLACEHOLDER_TITLE: &str = "AI Response Unavailable";

impl ResultPayload {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            summary: summary.into(),
            chart_kind: ChartKind::default(),
            categories: Vec::new(),
            values: Vec::new(),
            metrics: BTreeMap::new(),
            insights: Vec::new(),
            table: DataTable::default(),
        }
    }

    /// Renderable stand-in used when a remote answer could not be decoded
    pub fn placeholder(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            PLACEHOLDER_TITLE,
            "Failed to parse AI response. Please try again.",
            message.clone(),
        )
        .with_insights([message])
    }

    pub fn is_placeholder(&self) -> bool {
        self.title == PLACEHOLDER_TITLE
    }

    /// Set the chart series. Extra labels or values beyond the shorter side
    /// are dropped.
    pub fn with_series<C, V>(mut self, categories: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        V: IntoIterator<Item = f64>,
    {
        let (categories, values): (Vec<String>, Vec<f64>) = categories
            .into_iter()
            .map(|c| -> String { c.into() })
            .zip(values)
            .unzip();
        self.categories = categories;
        self.values = values;
        self
    }

    pub fn with_chart_kind(mut self, kind: ChartKind) -> Self {
        self.chart_kind = kind;
        self
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metrics.insert(name.into(), value.into());
        self
    }

    pub fn with_insights<I>(mut self, insights: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.insights = insights.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_table(mut self, table: DataTable) -> Self {
        self.table = table;
        self
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// (category, value) pairs in order
    pub fn series(&self) -> impl Iterator<Item = (&str, f64)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// One labelled data point
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub points: Vec<ChartPoint>,
}

/// Metrics, insights and table attached to a combined answer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentBlock {
    pub metrics: BTreeMap<String, String>,
    pub insights: Vec<String>,
    pub table: DataTable,
}

/// Every result shape a resolver can produce before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum ResultShape {
    /// Several charts plus metrics/insights/table
    Combined {
        charts: Vec<ChartSpec>,
        content: ContentBlock,
    },
    /// Metrics and insights only
    Summary {
        metrics: BTreeMap<String, String>,
        insights: Vec<String>,
    },
    Table(DataTable),
    Chart(ChartSpec),
    /// The answer could not be decoded
    Error { message: String },
}

impl ResultShape {
    pub fn kind(&self) -> &'static str {
        match self {
            ResultShape::Combined { .. } => "combined",
            ResultShape::Summary { .. } => "summary",
            ResultShape::Table(_) => "table",
            ResultShape::Chart(_) => "chart",
            ResultShape::Error { .. } => "error",
        }
    }
}
