use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use env_logger::Env;

use cli::Args;
use config::Settings;
use error::RatesError;
use fetcher::PrivatClient;

mod batch;
mod cli;
mod config;
mod error;
mod exchange_rate;
mod exchange_rates;
mod fetcher;
mod formatter;
mod log_file;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(RatesError::Validation(message)) = cli::validate_days(args.days) {
        println!("Error: {}", message);
        return Ok(ExitCode::from(2));
    }

    let settings = Settings::from_env().context("Can't read configuration")?;
    let client = Arc::new(PrivatClient::from_settings(&settings)?);
    let today = Local::now().date_naive();

    cli::execute(client, args, &settings, today)
        .await
        .context("Can't get exchange rates")?;

    Ok(ExitCode::SUCCESS)
}
