use crate::app::App;
use querydash_storage::HISTORY_CAP;

pub fn run() -> anyhow::Result<()> {
    let app = App::open()?;
    println!("{}", report(&app));
    Ok(())
}

fn report(app: &App) -> serde_json::Value {
    serde_json::json!({
        "home": app.paths.home.display().to_string(),
        "mode": app.mode(),
        "history": app.history().len(),
        "history_cap": HISTORY_CAP,
        "api_key_configured": app.config.has_api_key(),
        "model": app.config.model,
        "endpoint": app.config.endpoint,
    })
}
