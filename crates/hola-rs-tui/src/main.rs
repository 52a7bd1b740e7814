//! Terminal greeting board: a form and an in-memory list of messages.

use anyhow::Context;
use clap::Parser;
use hola_rs_config::{HolaConfig, LayeredConfigOptions, MAX_SUBMIT_DELAY_MS};
use hola_rs_tui::TuiConfig;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line options for the board.
#[derive(Parser)]
#[command(name = "hola-rs-tui", version)]
struct Cli {
    /// Optional path to a hola.json5 config file, applied last
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name to pre-fill in the author field
    #[arg(long)]
    author: Option<String>,
    /// Simulated submit latency in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_SUBMIT_DELAY_MS))]
    delay_ms: Option<u64>,
    /// Start with an empty board instead of the seed greetings
    #[arg(long)]
    no_seed: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the resolved config.
    fn apply_overrides(self, config: &mut TuiConfig) {
        if let Some(author) = self.author {
            config.author = Some(author);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.submit_delay = Duration::from_millis(delay_ms);
        }
        if self.no_seed {
            config.seed = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let mut cli = Cli::parse();
    info!(
        "starting TUI (config_set={}, author_set={}, delay_set={})",
        cli.config.is_some(),
        cli.author.is_some(),
        cli.delay_ms.is_some()
    );

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.take() {
        options = options.with_runtime_path(path);
    }
    let layered =
        HolaConfig::load_layered_with_options(options).context("failed to load config")?;
    info!("config resolved (layers={})", layered.layers.len());

    let mut config = TuiConfig::from(&layered.config);
    cli.apply_overrides(&mut config);

    hola_rs_tui::run(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("hola-rs-tui").chain(args.iter().copied()))
    }

    #[test]
    fn no_flags_keep_config_values() {
        let mut config = TuiConfig::default();
        parse(&[]).expect("cli").apply_overrides(&mut config);
        assert_eq!(config.author, None);
        assert_eq!(config.submit_delay, Duration::from_millis(800));
        assert!(config.seed);
    }

    #[test]
    fn flags_override_config() {
        let mut config = TuiConfig {
            author: Some("Config".to_string()),
            ..TuiConfig::default()
        };
        parse(&["--author", "Ana", "--delay-ms", "25", "--no-seed"])
            .expect("cli")
            .apply_overrides(&mut config);
        assert_eq!(config.author.as_deref(), Some("Ana"));
        assert_eq!(config.submit_delay, Duration::from_millis(25));
        assert!(!config.seed);
    }

    #[test]
    fn delay_is_bounded_like_the_config_file() {
        let max = MAX_SUBMIT_DELAY_MS.to_string();
        let cli = parse(&["--delay-ms", &max]).expect("max delay accepted");
        assert_eq!(cli.delay_ms, Some(MAX_SUBMIT_DELAY_MS));

        let over = (MAX_SUBMIT_DELAY_MS + 1).to_string();
        assert!(parse(&["--delay-ms", &over]).is_err());
        assert!(parse(&["--delay-ms", "18446744073709551615"]).is_err());
        assert!(parse(&["--delay-ms", "-1"]).is_err());
    }
}
