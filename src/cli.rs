use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    batch::fetch_range,
    config::Settings,
    error::{RatesError, Result},
    exchange_rate::FormattedRecord,
    fetcher::{CurrencyFilter, DEFAULT_CURRENCIES, RateSource},
    formatter::{LabelMode, format_records},
    log_file::append_records,
};

pub const MAX_DAYS: u32 = 10;

#[derive(Debug, Parser)]
#[command(name = "privat_rates", about = "Get exchange rates from PrivatBank API.")]
pub struct Args {
    /// Number of days to retrieve exchange rates for (up to 10 days).
    pub days: u32,

    /// Comma-separated list of currencies to retrieve.
    #[arg(long, default_value = DEFAULT_CURRENCIES)]
    pub currency: String,

    /// Date each record is labelled with.
    #[arg(long, value_enum, default_value_t = LabelMode::Shifted)]
    pub label_mode: LabelMode,

    /// Log file to append to. Overrides EXCHANGE_LOG_PATH.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn validate_days(days: u32) -> Result<u32> {
    if days > MAX_DAYS {
        return Err(RatesError::Validation(format!(
            "Number of days should not exceed {MAX_DAYS}."
        )));
    }
    if days == 0 {
        return Err(RatesError::Validation(
            "Number of days should be at least 1.".to_string(),
        ));
    }

    Ok(days)
}

/// Validates the arguments, fetches the batch, prints it and appends it to
/// the log. Nothing is fetched, printed or logged when validation fails.
pub async fn execute<S>(
    source: Arc<S>,
    args: Args,
    settings: &Settings,
    today: NaiveDate,
) -> Result<Vec<FormattedRecord>>
where
    S: RateSource + 'static,
{
    let days = validate_days(args.days)?;
    let filter = CurrencyFilter::new(args.currency);

    let rates = fetch_range(source, today, days, &filter, settings.max_concurrency).await?;
    let records = format_records(rates, today, args.label_mode)?;

    let rendered: Vec<String> = records.iter().map(ToString::to_string).collect();
    println!("[{}]", rendered.join(", "));

    let log_path = args.log_file.unwrap_or_else(|| settings.log_path.clone());
    append_records(&log_path, &records).await?;

    Ok(records)
}
