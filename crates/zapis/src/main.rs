mod action;
mod app;
mod cli;
mod components;
mod config;
mod errors;
mod logging;
mod pages;
mod services;
mod theme;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    crate::errors::init()?;
    crate::config::ensure_data_and_config_dirs_exist()?;

    let config = Config::new(&args)?;
    let _log_guard = crate::logging::init(&config)?;

    let mut app = App::new(args, config)?;
    app.run().await?;
    Ok(())
}
