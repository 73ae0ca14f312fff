use crate::app::App;
use anyhow::Context;
use querydash_storage::{save_mode, QueryMode};

pub fn run(mode: Option<QueryMode>) -> anyhow::Result<()> {
    let app = App::open()?;
    println!("{}", apply(&app, mode)?);
    Ok(())
}

/// Store `mode` if given; returns the mode now in effect
fn apply(app: &App, mode: Option<QueryMode>) -> anyhow::Result<QueryMode> {
    match mode {
        Some(mode) => {
            save_mode(app.store(), mode).context("failed to save query mode")?;
            tracing::debug!(%mode, "default query mode changed");
            Ok(mode)
        }
        None => Ok(app.mode()),
    }
}
