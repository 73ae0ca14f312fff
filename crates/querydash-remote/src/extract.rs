//! Decoding model answers into result shapes
//!
//! The model is asked for JSON but may wrap it in Markdown code fences.
//! Fences are removed, then the remainder must parse as JSON and match one
//! of the known shapes exactly; anything else is a [`ParseError`].

use crate::error::ParseError;
use querydash_core::{ChartKind, ChartPoint, ChartSpec, ContentBlock, DataTable, ResultShape};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Remove every ```json / ``` marker and surrounding whitespace
pub fn strip_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Decode a model answer into a [`ResultShape`]
pub fn decode(text: &str) -> Result<ResultShape, ParseError> {
    let body = strip_fences(text);
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: Value =
        serde_json::from_str(&body).map_err(|e| ParseError::Json(e.to_string()))?;
    let answer =
        WireAnswer::deserialize(value).map_err(|e| ParseError::UnknownShape(e.to_string()))?;
    answer.into_shape()
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
enum WireAnswer {
    Combined(WireCombined),
    Summary(WireSummary),
    Table(WireTable),
    Chart(WireChart),
}

#[derive(Deserialize)]
struct WireCombined {
    charts: Vec<WireChart>,
    content: WireContent,
}

#[derive(Deserialize)]
struct WireContent {
    #[serde(default)]
    metrics: Map<String, Value>,
    #[serde(default)]
    insights: Vec<Value>,
    #[serde(default)]
    table: Option<WireTable>,
}

#[derive(Deserialize)]
struct WireSummary {
    metrics: Map<String, Value>,
    insights: Vec<Value>,
}

#[derive(Deserialize)]
struct WireTable {
    headers: Vec<Value>,
    rows: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct WireChart {
    #[serde(rename = "chartType")]
    chart_type: String,
    data: Vec<WirePoint>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct WirePoint {
    name: Value,
    value: Value,
}

impl WireAnswer {
    fn into_shape(self) -> Result<ResultShape, ParseError> {
        Ok(match self {
            WireAnswer::Combined(combined) => ResultShape::Combined {
                charts: combined
                    .charts
                    .into_iter()
                    .map(WireChart::into_spec)
                    .collect::<Result<_, _>>()?,
                content: ContentBlock {
                    metrics: metrics(combined.content.metrics),
                    insights: texts(combined.content.insights),
                    table: combined
                        .content
                        .table
                        .map(WireTable::into_table)
                        .unwrap_or_default(),
                },
            },
            WireAnswer::Summary(summary) => ResultShape::Summary {
                metrics: metrics(summary.metrics),
                insights: texts(summary.insights),
            },
            WireAnswer::Table(table) => ResultShape::Table(table.into_table()),
            WireAnswer::Chart(chart) => ResultShape::Chart(chart.into_spec()?),
        })
    }
}

impl WireChart {
    fn into_spec(self) -> Result<ChartSpec, ParseError> {
        let points = self
            .data
            .into_iter()
            .map(WirePoint::into_point)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChartSpec {
            kind: ChartKind::parse(&self.chart_type),
            title: self.title,
            description: self.description,
            points,
        })
    }
}

impl WirePoint {
    fn into_point(self) -> Result<ChartPoint, ParseError> {
        let name = match &self.name {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => return Err(ParseError::InvalidPoint(format!("name {}", other))),
        };
        let value = match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidPoint(format!("value {} for '{}'", self.value, name)))?;

        Ok(ChartPoint { name, value })
    }
}

impl WireTable {
    fn into_table(self) -> DataTable {
        DataTable {
            headers: texts(self.headers),
            rows: self.rows.into_iter().map(texts).collect(),
        }
    }
}

fn text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn texts(values: Vec<Value>) -> Vec<String> {
    values.into_iter().map(text).collect()
}

fn metrics(map: Map<String, Value>) -> BTreeMap<String, String> {
    map.into_iter().map(|(k, v)| (k, text(v))).collect()
}
