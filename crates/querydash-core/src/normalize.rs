//! Mapping every [`ResultShape`] onto the single [`ResultPayload`] shape

use crate::types::{ChartSpec, DataTable, ResultPayload, ResultShape};

/// Normalize a decoded answer. `query` titles answers that carry no title.
pub fn normalize(shape: ResultShape, query: &str) -> ResultPayload {
    let fallback_title = query.trim();

    match shape {
        ResultShape::Chart(chart) => chart_payload(chart, fallback_title, "Chart analysis"),

        ResultShape::Summary { metrics, insights } => {
            let summary = insights.first().cloned().unwrap_or_default();
            let mut payload =
                ResultPayload::new(fallback_title, "Key metrics and insights", summary)
                    .with_insights(insights);
            payload.metrics = metrics;
            payload
        }

        ResultShape::Table(table) => {
            let summary = format!("{} rows", table.rows.len());
            let (categories, values) = table_series(&table);
            ResultPayload::new(fallback_title, "Tabular results", summary)
                .with_series(categories, values)
                .with_table(table)
        }

        ResultShape::Combined { charts, content } => {
            let primary = charts.into_iter().next().unwrap_or_default();
            let mut payload = chart_payload(primary, fallback_title, "Combined analysis");
            if let Some(first) = content.insights.first() {
                if payload.summary.is_empty() {
                    payload.summary = first.clone();
                }
            }
            payload.metrics = content.metrics;
            payload.insights = content.insights;
            payload.table = content.table;
            payload
        }

        ResultShape::Error { message } => ResultPayload::placeholder(message),
    }
}

fn chart_payload(chart: ChartSpec, fallback_title: &str, description: &str) -> ResultPayload {
    let title = chart
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| fallback_title.to_string());
    let summary = chart.description.unwrap_or_default();
    let (categories, values): (Vec<String>, Vec<f64>) =
        chart.points.into_iter().map(|p| (p.name, p.value)).unzip();

    ResultPayload::new(title, description, summary)
        .with_chart_kind(chart.kind)
        .with_series(categories, values)
}

/// Labels from the first column, values from the first later column whose
/// cells are all numeric
fn table_series(table: &DataTable) -> (Vec<String>, Vec<f64>) {
    if table.rows.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let width = table.rows.iter().map(Vec::len).min().unwrap_or(0);

    let numeric_column = (1..width).find_map(|col| {
        table
            .rows
            .iter()
            .map(|row| parse_number(&row[col]))
            .collect::<Option<Vec<f64>>>()
    });

    match numeric_column {
        Some(values) => {
            let labels = table.rows.iter().map(|row| row[0].clone()).collect();
            (labels, values)
        }
        None => (Vec::new(), Vec::new()),
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
