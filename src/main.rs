//! Entry point for the language reader.
//!
//! - Parse command-line arguments.
//! - Load user configuration (default `conf/config.toml`).
//! - Build the HTTP client and launch the GUI.

mod app;
mod audio;
mod config;

use crate::app::run_app;
use crate::config::{AppConfig, load_config, serialize_config};
use anyhow::{Context, Result};
use clap::Parser;
use lingo_core::{ApiClient, Language};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Parser)]
#[command(name = "lingo-reader", version, about = "Audio and subtitle reader for language practice")]
struct Cli {
    /// Initial language tab (english, german, french, spanish).
    #[arg(long)]
    lang: Option<String>,
    /// Base URL of the content server; overrides `server.base_url`.
    #[arg(long)]
    server: Option<String>,
    /// Configuration file.
    #[arg(long, default_value = "conf/config.toml")]
    config: PathBuf,
    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    apply_cli_overrides(&mut config, &cli);

    if cli.print_config {
        let rendered = serialize_config(&config).context("Failed to render configuration")?;
        println!("{rendered}");
        return Ok(());
    }

    info!(
        config = %cli.config.display(),
        level = %config.log_level,
        server = %config.server_base_url,
        language = %config.default_language,
        "Starting language reader"
    );

    let api = ApiClient::new(
        &config.server_base_url,
        Duration::from_secs(config.request_timeout_secs.max(1)),
    )
    .context("Failed to create the HTTP client")?;

    install_sigint_handler();
    run_app(config, api).context("Failed to start the GUI")?;
    Ok(())
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(raw) = cli.lang.as_deref() {
        match raw.parse::<Language>() {
            Ok(language) => config.default_language = language,
            Err(err) => warn!(
                fallback = %config.default_language,
                "Ignoring --lang: {err}"
            ),
        }
    }
    if let Some(server) = cli.server.as_ref() {
        config.server_base_url = server.clone();
    }
}

fn install_sigint_handler() {
    if let Err(err) = ctrlc::set_handler(|| SIGINT_REQUESTED.store(true, Ordering::SeqCst)) {
        warn!("Failed to install Ctrl-C handler: {err}");
    }
}

/// Consume a pending Ctrl-C request.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::SeqCst)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with logging.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lingo-reader").chain(args.iter().copied()))
            .expect("cli parses")
    }

    #[test]
    fn lang_flag_selects_initial_language() {
        let mut config = AppConfig::default();
        apply_cli_overrides(&mut config, &cli(&["--lang", "French"]));
        assert_eq!(config.default_language, Language::French);
    }

    #[test]
    fn unknown_lang_keeps_configured_default() {
        let mut config = AppConfig::default();
        config.default_language = Language::German;
        apply_cli_overrides(&mut config, &cli(&["--lang", "latin"]));
        assert_eq!(config.default_language, Language::German);
    }

    #[test]
    fn server_flag_overrides_base_url() {
        let mut config = AppConfig::default();
        let parsed = cli(&["--server", "http://10.0.0.2:8000/", "--config", "other.toml"]);
        apply_cli_overrides(&mut config, &parsed);
        assert_eq!(config.server_base_url, "http://10.0.0.2:8000/");
        assert_eq!(parsed.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn sigint_request_is_consumed_once() {
        SIGINT_REQUESTED.store(true, Ordering::SeqCst);
        assert!(take_sigint_requested());
        assert!(!take_sigint_requested());
    }
}
