//! extends CLI
//!
//! Reads a JSON config from disk, resolves its `extends` chain against
//! GitLab and prints the merged document.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use extends_core::{Document, resolve_config_str};
use extends_gitlab::GitLabFetcher;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let resolved = resolve_file(&cli)?;
    println!("{}", render(&resolved, cli.compact)?);
    Ok(())
}

fn resolve_file(cli: &Cli) -> Result<Document> {
    let text = std::fs::read_to_string(&cli.config).map_err(|e| CliError::read(&cli.config, e))?;
    tracing::debug!(config = %cli.config.display(), "Loaded config file");

    let fetcher = GitLabFetcher::new(cli.gitlab_config())?;
    let resolved = resolve_config_str(&text, &fetcher)?;
    tracing::debug!(keys = resolved.len(), "Resolved config");
    Ok(resolved)
}

fn render(document: &Document, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(document)?
    } else {
        serde_json::to_string_pretty(document)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli_for(path: &std::path::Path) -> Cli {
        Cli::try_parse_from([
            "extends",
            "--config",
            path.to_str().unwrap(),
            "--gitlab-url",
            "http://127.0.0.1:9/api/v4",
            "--max-retry-elapsed",
            "0",
        ])
        .unwrap()
    }

    #[test]
    fn leaf_config_needs_no_network() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"rules": {"indent": 2}}"#).unwrap();

        let resolved = resolve_file(&cli_for(&path)).unwrap();

        assert_eq!(resolved["rules"]["indent"], 2);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let err = resolve_file(&cli_for(&path)).unwrap_err();

        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_json_is_reported_before_fetching() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ invalid json").unwrap();

        let err = resolve_file(&cli_for(&path)).unwrap_err();

        assert!(matches!(
            err,
            CliError::Core(extends_core::Error::InvalidJson { .. })
        ));
    }

    #[test]
    fn render_pretty_and_compact() {
        let document = serde_json::json!({"a": {"b": 1}}).as_object().cloned().unwrap();
        assert_eq!(render(&document, true).unwrap(), r#"{"a":{"b":1}}"#);
        assert!(render(&document, false).unwrap().contains('\n'));
    }
}
