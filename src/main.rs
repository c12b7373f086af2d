// src/main.rs
use std::path::Path;

use anyhow::{anyhow, Context};
use clap::Parser;

use passforge::core::Config;
use passforge::logging;

mod cli;

use crate::cli::handlers::{self, App};
use crate::cli::{Args, CliCommand};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load();
    if let Some(dir) = &args.data_dir {
        config.data_directory = Some(dir.clone());
    }

    logging::init(&config).context("Failed to initialise logging")?;
    log::debug!("Loaded config: {:?}", config);

    let app = App::new(config, args.json);

    let result = match &args.command {
        Some(CliCommand::Generate {
            length,
            categories,
            output,
        }) => handlers::handle_generate(&app, *length, categories, output),
        Some(CliCommand::Passphrase {
            words,
            separator,
            output,
        }) => handlers::handle_passphrase(&app, *words, separator.as_deref(), output),
        Some(CliCommand::Check {
            password,
            categories,
        }) => handlers::handle_check(&app, password, categories),
        Some(CliCommand::History { action }) => handlers::handle_history(&app, action),
        None => cli::menu::run_cli_menu(&app),
    };

    result.map_err(|e| anyhow!("{}", e))
}
