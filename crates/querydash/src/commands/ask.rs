use crate::app::{runtime, App};
use anyhow::Context;
use querydash_core::{Query, ResultPayload};
use querydash_storage::{save_mode, QueryMode};

pub fn run(text: &str, mode: Option<QueryMode>, json: bool) -> anyhow::Result<()> {
    let app = App::open()?;
    let payload = ask(&app, text, mode)?;
    print_payload(&payload, json)
}

/// Submit `text` in `mode`, or in the stored default mode when `None`.
/// An explicit mode becomes the new default once the text is accepted.
pub(crate) fn ask(app: &App, text: &str, mode: Option<QueryMode>) -> anyhow::Result<ResultPayload> {
    let query = Query::new(text, mode.unwrap_or_else(|| app.mode()));
    query.validate()?;

    if let Some(mode) = mode {
        save_mode(app.store(), mode).context("failed to save query mode")?;
    }
    submit(app, query)
}

pub(crate) fn submit(app: &App, query: Query) -> anyhow::Result<ResultPayload> {
    let dispatcher = app.dispatcher();
    let submission = runtime()?.block_on(dispatcher.submit(query))?;
    Ok(submission.payload)
}

pub(crate) fn print_payload(payload: &ResultPayload, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(payload)?);
    } else {
        print!("{}", render(payload));
    }
    Ok(())
}

/// Plain-text rendering of a result
pub(crate) fn render(payload: &ResultPayload) -> String {
    let mut lines = vec![payload.title.clone()];
    if !payload.description.is_empty() {
        lines.push(payload.description.clone());
    }
    if !payload.summary.is_empty() {
        lines.push(String::new());
        lines.push(payload.summary.clone());
    }

    if !payload.categories().is_empty() {
        lines.push(String::new());
        lines.push(format!("Chart ({})", payload.chart_kind));
        let width = payload.categories().iter().map(|c| c.len()).max().unwrap_or(0);
        for (name, value) in payload.series() {
            lines.push(format!("  {:<width$}  {}", name, value, width = width));
        }
    }

    if !payload.metrics.is_empty() {
        lines.push(String::new());
        lines.push("Metrics".to_string());
        for (name, value) in &payload.metrics {
            lines.push(format!("  {}: {}", name, value));
        }
    }

    if !payload.insights.is_empty() {
        lines.push(String::new());
        lines.push("Insights".to_string());
        for insight in &payload.insights {
            lines.push(format!("  - {}", insight));
        }
    }

    if !payload.table.is_empty() {
        lines.push(String::new());
        lines.push(payload.table.headers.join(" | "));
        for row in &payload.table.rows {
            lines.push(row.join(" | "));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
