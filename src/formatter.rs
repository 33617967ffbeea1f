use chrono::NaiveDate;
use clap::ValueEnum;

use crate::{
    batch::days_before,
    error::Result,
    exchange_rate::{DailyRates, FormattedRecord},
};

/// How records are labelled once the batch is back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LabelMode {
    /// Record `i` is labelled `today - (i + 1)`, one day before the date its
    /// rates were fetched for. Matches the historical log format.
    #[default]
    Shifted,
    /// Record `i` is labelled with the date its rates were fetched for.
    Fetched,
}

impl LabelMode {
    fn offset(self) -> u64 {
        match self {
            LabelMode::Shifted => 1,
            LabelMode::Fetched => 0,
        }
    }
}

pub fn format_records(
    rates: Vec<DailyRates>,
    today: NaiveDate,
    mode: LabelMode,
) -> Result<Vec<FormattedRecord>> {
    rates
        .into_iter()
        .zip(mode.offset()..)
        .map(|(rates, back)| {
            let date = days_before(today, back)?;
            Ok(FormattedRecord { date, rates })
        })
        .collect()
}
