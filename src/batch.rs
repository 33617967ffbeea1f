use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    error::{RatesError, Result},
    exchange_rate::DailyRates,
    fetcher::{CurrencyFilter, RateSource},
};

pub fn days_before(today: NaiveDate, back: u64) -> Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(back))
        .ok_or(RatesError::DateRange {
            from: today,
            days: back,
        })
}

/// Dates requested from the API: index 0 is today, index 1 yesterday, and so on.
pub fn fetch_dates(today: NaiveDate, days: u32) -> Result<Vec<NaiveDate>> {
    (0..u64::from(days)).map(|back| days_before(today, back)).collect()
}

/// Fetches every date of the batch concurrently and returns the rates in
/// request order, whatever order the requests finish in.
///
/// At most `max_concurrency` requests are in flight. The first failure
/// aborts the remaining requests.
pub async fn fetch_range<S>(
    source: Arc<S>,
    today: NaiveDate,
    days: u32,
    filter: &CurrencyFilter,
    max_concurrency: usize,
) -> Result<Vec<DailyRates>>
where
    S: RateSource + 'static,
{
    let dates = fetch_dates(today, days)?;
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, date) in dates.iter().copied().enumerate() {
        let source = Arc::clone(&source);
        let filter = filter.clone();
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            // The semaphore is never closed, so acquiring only waits.
            let _permit = semaphore.acquire_owned().await;
            (index, date, source.fetch(date, &filter).await)
        });
    }

    log::info!(
        "Requested rates for {} dates (filter {:?})",
        dates.len(),
        filter.as_str()
    );

    let mut slots: Vec<Option<DailyRates>> = vec![None; dates.len()];

    while let Some(joined) = tasks.join_next().await {
        let (index, date, result) = joined?;
        match result {
            Ok(rates) => slots[index] = Some(rates),
            Err(err) => {
                log::error!("Fetching rates for {} failed: {}", date, err);
                return Err(err);
            }
        }
    }

    // Every spawned task reported back, so no slot is empty here.
    Ok(slots.into_iter().flatten().collect())
}
