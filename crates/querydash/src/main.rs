mod app;
mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, HistoryAction};
use tracing_subscriber::filter::LevelFilter;

fn main() {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Ask { text, mode, json } => commands::ask::run(&text.join(" "), mode, json),
        Commands::History { action, json } => match action {
            None => commands::history::run_list(json),
            Some(HistoryAction::Remove { timestamp }) => commands::history::run_remove(timestamp),
            Some(HistoryAction::Clear) => commands::history::run_clear(),
        },
        Commands::Rerun { timestamp, json } => commands::history::run_rerun(timestamp, json),
        Commands::Mode { mode } => commands::mode::run(mode),
        Commands::Suggest { input } => commands::suggest::run(input.as_deref()),
        Commands::Status => commands::status::run(),
        Commands::Version => commands::version::run(),
    }
}
