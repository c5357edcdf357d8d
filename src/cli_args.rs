use clap::{Args, Parser, Subcommand};

use crate::session::{DEFAULT_HOSTNAME, DEFAULT_USER};

#[derive(Debug, Parser)]
#[command(
    name = "expresso-term",
    about = "Terminal client for the expresso file-storage engine"
)]
pub struct Cli {
    #[command(flatten)]
    pub connect: ConnectArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Version(VersionArgs),
}

#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Emit version info as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ConnectArgs {
    /// Base URL of the expresso engine
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub base_url: String,

    /// Run the full-screen TUI frontend instead of the plain prompt
    #[arg(long)]
    pub tui: bool,

    #[arg(long, default_value_t = 2000)]
    pub connect_timeout_ms: u64,

    #[arg(long, default_value_t = 15_000)]
    pub request_timeout_ms: u64,

    /// User shown in the prompt
    #[arg(long, default_value = DEFAULT_USER)]
    pub user: String,

    /// Host shown in the prompt
    #[arg(long, default_value = DEFAULT_HOSTNAME)]
    pub hostname: String,

    /// Skip the startup banner
    #[arg(long)]
    pub no_motd: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn defaults_are_sane() {
        let cli = Cli::parse_from(["expresso-term"]);
        assert_eq!(cli.connect.base_url, "http://127.0.0.1:8080");
        assert!(!cli.connect.tui);
        assert_eq!(cli.connect.user, "root");
        assert_eq!(cli.connect.hostname, "expresso");
        assert!(cli.command.is_none());
    }

    #[test]
    fn version_subcommand_parses() {
        let cli = Cli::parse_from(["expresso-term", "version", "--json"]);
        match cli.command {
            Some(super::Commands::Version(args)) => assert!(args.json),
            other => panic!("expected version subcommand, got {other:?}"),
        }
    }
}
