mod actions;
mod commands;
mod input;
mod render;

use actions::App;
use anyhow::Context;
use clap::Parser;
use commands::Command;
use env_logger::Env;
use plasmid_client::ApiClient;
use plasmid_core::AppConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "plasmids")]
#[command(about = "Plasmid inventory: bags, samples and checkouts")]
struct Cli {
    /// Config file; defaults to config.toml in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL, overriding the config.
    #[arg(long, global = true)]
    api: Option<String>,
    #[command(subcommand)]
    command: Command,
}

fn load_config(path: Option<PathBuf>, api: Option<String>) -> anyhow::Result<AppConfig> {
    let path = path.unwrap_or_else(|| AppConfig::path(Path::new(".")));
    let mut config = AppConfig::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    if let Some(api) = api {
        config.api.base_url = api;
    }

    let problems = config.validate();
    if problems.is_empty() {
        return Ok(config);
    }
    for problem in &problems {
        log::warn!("config: {problem}, using the default");
    }
    Ok(config.with_defaults_for_invalid())
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(cli.config, cli.api)?;
    let client = ApiClient::new(&config.api)?;
    log::debug!("using backend at {}", client.base_url());
    let app = App { config, client };

    match cli.command {
        Command::Validate { path } => return actions::validate(&path),
        Command::Bags { sort } => app.bags(sort)?,
        Command::Search { query, remote } => app.search(&query, remote)?,
        Command::Add { path } => app.add(&path)?,
        Command::Checkout { id, sample, user } => app.check_out(&id, sample, user)?,
        Command::Checkin { id, sample, volume } => app.check_in(&id, sample, volume)?,
        Command::CheckedOut => app.checked_out()?,
        Command::Health { watch } => app.health(watch)?,
    }
    Ok(true)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
