use clap::{Parser, Subcommand};
use querydash_storage::QueryMode;

#[derive(Parser)]
#[command(name = "querydash")]
#[command(version)]
#[command(about = "Ask business questions, get chart-ready answers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a query
    Ask {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Resolver to use (local, remote); saved as the new default
        #[arg(short, long)]
        mode: Option<QueryMode>,

        /// Print the normalized result as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or edit query history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a stored query again
    Rerun {
        /// Entry timestamp in epoch milliseconds, as shown by `history`
        timestamp: i64,

        #[arg(long)]
        json: bool,
    },

    /// Show or set the default query mode
    Mode { mode: Option<QueryMode> },

    /// List query suggestions
    Suggest {
        /// Only show suggestions containing this text
        input: Option<String>,
    },

    /// Show configuration status
    Status,

    /// Print version information
    Version,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Delete one entry
    Remove { timestamp: i64 },
    /// Delete all entries
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["querydash", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_ask() {
        let cli =
            Cli::try_parse_from(["querydash", "ask", "show", "total", "sales", "--mode", "ai"]);
        assert!(cli.is_ok());
        if let Commands::Ask { text, mode, json } = cli.unwrap().command {
            assert_eq!(text.join(" "), "show total sales");
            assert_eq!(mode, Some(QueryMode::Remote));
            assert!(!json);
        } else {
            panic!("Expected Ask command");
        }
    }

    #[test]
    fn test_cli_ask_requires_text() {
        assert!(Cli::try_parse_from(["querydash", "ask"]).is_err());
        assert!(Cli::try_parse_from(["querydash", "ask", "x", "--mode", "cloud"]).is_err());
    }

    #[test]
    fn test_cli_parse_history_actions() {
        let cli = Cli::try_parse_from(["querydash", "history", "remove", "1700000000000"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History {
                action: Some(HistoryAction::Remove {
                    timestamp: 1_700_000_000_000
                }),
                json: false
            }
        ));

        let cli = Cli::try_parse_from(["querydash", "history", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History {
                action: Some(HistoryAction::Clear),
                ..
            }
        ));

        let cli = Cli::try_parse_from(["querydash", "history", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History {
                action: None,
                json: true
            }
        ));
    }

    #[test]
    fn test_cli_parse_mode_and_suggest() {
        let cli = Cli::try_parse_from(["querydash", "mode"]).unwrap();
        assert!(matches!(cli.command, Commands::Mode { mode: None }));

        let cli = Cli::try_parse_from(["querydash", "suggest", "compare"]).unwrap();
        if let Commands::Suggest { input } = cli.command {
            assert_eq!(input.as_deref(), Some("compare"));
        } else {
            panic!("Expected Suggest command");
        }
    }
}
