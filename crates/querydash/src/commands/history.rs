use crate::app::App;
use crate::commands::ask;
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use querydash_core::Query;
use querydash_storage::{HistoryEntry, HistoryStore};

pub fn run_list(json: bool) -> anyhow::Result<()> {
    let app = App::open()?;
    let history = app.history();

    if json {
        println!("{}", serde_json::to_string_pretty(history.list())?);
        return Ok(());
    }
    if history.is_empty() {
        println!("No query history");
        return Ok(());
    }
    print!("{}", render(history.list()));
    Ok(())
}

pub fn run_remove(timestamp: i64) -> anyhow::Result<()> {
    let app = App::open()?;
    let mut history = app.history();
    let entry = remove(&mut history, timestamp)?;
    println!("Removed \"{}\"", entry.text);
    Ok(())
}

pub fn run_clear() -> anyhow::Result<()> {
    let app = App::open()?;
    let mut history = app.history();
    let count = history.len();
    history.clear().context("failed to clear history")?;
    println!("Cleared {} entries", count);
    Ok(())
}

/// Resubmit a stored query in the mode it was asked with. The result is
/// recorded as a new entry and the stored one is left untouched.
pub fn run_rerun(timestamp: i64, json: bool) -> anyhow::Result<()> {
    let app = App::open()?;
    let query = stored_query(&app.history(), timestamp)?;
    let payload = ask::submit(&app, query)?;
    ask::print_payload(&payload, json)
}

fn parse_timestamp(timestamp: i64) -> anyhow::Result<DateTime<Utc>> {
    match DateTime::from_timestamp_millis(timestamp) {
        Some(ts) => Ok(ts),
        None => bail!("invalid timestamp: {}", timestamp),
    }
}

fn find(history: &HistoryStore, timestamp: i64) -> anyhow::Result<&HistoryEntry> {
    let submitted_at = parse_timestamp(timestamp)?;
    history
        .find_by_timestamp(submitted_at)
        .with_context(|| format!("no history entry at {}", timestamp))
}

fn stored_query(history: &HistoryStore, timestamp: i64) -> anyhow::Result<Query> {
    let entry = find(history, timestamp)?;
    Ok(Query::new(entry.text.clone(), entry.mode))
}

fn remove(history: &mut HistoryStore, timestamp: i64) -> anyhow::Result<HistoryEntry> {
    let entry = find(history, timestamp)?.clone();
    history.remove(&entry.key())?;
    Ok(entry)
}

fn render(entries: &[HistoryEntry]) -> String {
    let mut out = format!("Recent Queries ({})\n", entries.len());
    out.push_str("==================\n");
    for entry in entries {
        out.push_str(&format!(
            "  {} | {} | {:<6} | {:<9} | {}\n",
            entry.submitted_at.timestamp_millis(),
            entry.submitted_at.format("%Y-%m-%d %H:%M"),
            entry.mode,
            entry.status,
            entry.text,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use querydash_storage::{MemoryStore, QueryMode, QueryStatus};
    use std::sync::Arc;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn sample_history() -> HistoryStore {
        let mut history = HistoryStore::load(Arc::new(MemoryStore::new()));
        history
            .append(HistoryEntry::pending("Show total sales", QueryMode::Local, at(1_000)))
            .unwrap();
        history
            .append(HistoryEntry::pending("revenue forecast", QueryMode::Remote, at(2_000)))
            .unwrap();
        history
    }

    #[test]
    fn test_render_lists_newest_first() {
        let history = sample_history();
        let text = render(history.list());
        let forecast = text.find("revenue forecast").unwrap();
        let sales = text.find("Show total sales").unwrap();
        assert!(forecast < sales);
        assert!(text.contains("  2000 | "));
        assert!(text.contains("remote"));
        assert!(text.contains("pending"));
    }

    #[test]
    fn test_stored_query_keeps_mode() {
        let history = sample_history();
        let query = stored_query(&history, 2_000).unwrap();
        assert_eq!(query.text, "revenue forecast");
        assert_eq!(query.mode, QueryMode::Remote);
        assert!(stored_query(&history, 3_000).is_err());
    }

    #[test]
    fn test_remove_by_timestamp() {
        let mut history = sample_history();
        let removed = remove(&mut history, 1_000).unwrap();
        assert_eq!(removed.text, "Show total sales");
        assert_eq!(history.len(), 1);
        assert!(remove(&mut history, 1_000).is_err());
    }

    #[test]
    fn test_rerun_adds_new_entry() {
        let temp = tempfile::TempDir::new().unwrap();
        let app = test_app(temp.path());

        ask::ask(&app, "inventory levels", None).unwrap();
        let first = app.history().list()[0].clone();

        let query = stored_query(&app.history(), first.submitted_at.timestamp_millis()).unwrap();
        let payload = ask::submit(&app, query).unwrap();
        assert_eq!(payload.title, "Inventory Status Report");

        let history = app.history();
        assert_eq!(history.len(), 2);
        assert!(history.list()[0].submitted_at > first.submitted_at);
        assert_eq!(history.list()[1], first);
        assert!(history
            .list()
            .iter()
            .all(|e| e.status == QueryStatus::Completed));
    }
}
