mod cli;
mod config;
mod inventory;
mod report;
mod storage;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = AppConfig::load(cli.data_dir.clone());

    cli::run(cli.command, &config).await
}
