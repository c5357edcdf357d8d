use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use crate::cli_args::{Cli, Commands};
use crate::remote::{FileStore, HttpConfig, HttpFileStore};
use crate::session::SessionState;
use crate::{repl_runtime, tui};

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
}

pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: "expresso-term",
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// Startup banner pushed into the output log before the first prompt.
pub fn motd_lines(base_url: &str) -> Vec<String> {
    vec![
        format!(
            "expresso-term {} — connected to {}",
            env!("CARGO_PKG_VERSION"),
            base_url
        ),
        "Type 'help' for available commands.".to_string(),
    ]
}

pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Version(args)) = &cli.command {
        let info = version_info();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            println!("{} {}", info.name, info.version);
        }
        return Ok(());
    }

    let http = HttpConfig {
        connect_timeout_ms: cli.connect.connect_timeout_ms,
        request_timeout_ms: cli.connect.request_timeout_ms,
    };
    let store: Arc<dyn FileStore> = Arc::new(
        HttpFileStore::new(&cli.connect.base_url, http)
            .with_context(|| format!("failed to set up client for {}", cli.connect.base_url))?,
    );
    let session = SessionState::new(cli.connect.user.clone(), cli.connect.hostname.clone());
    let motd = if cli.connect.no_motd {
        Vec::new()
    } else {
        motd_lines(&cli.connect.base_url)
    };

    if cli.connect.tui {
        tui::run_tui(session, store, motd).await
    } else {
        repl_runtime::run_repl(session, store, motd).await
    }
}

#[cfg(test)]
mod tests {
    use super::{motd_lines, version_info};

    #[test]
    fn version_info_serializes() {
        let json = serde_json::to_string(&version_info()).unwrap();
        assert!(json.contains("expresso-term"));
    }

    #[test]
    fn motd_names_the_engine_url() {
        let lines = motd_lines("http://host:1");
        assert!(lines[0].contains("http://host:1"));
    }
}
