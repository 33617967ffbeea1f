use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::Error as _;

use crate::{
    config::Settings,
    error::{RatesError, Result},
    exchange_rate::{DailyRates, RateEntry, daily_rates, date_label},
    exchange_rates::{ExchangeRateItem, ExchangeRates},
};

pub const DEFAULT_CURRENCIES: &str = "EUR,USD";

/// Comma-joined currency list as typed on the command line.
///
/// Matching is by substring, not by set membership: a code matches when the
/// raw list contains it, or when one of the listed tokens is part of the code.
/// So `EU` selects `EUR` and `US` selects `USD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFilter(String);

impl CurrencyFilter {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, currency: &str) -> bool {
        if currency.is_empty() {
            return false;
        }

        self.0.contains(currency)
            || self
                .0
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .any(|token| currency.contains(token))
    }
}

impl Default for CurrencyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES)
    }
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self, date: NaiveDate, filter: &CurrencyFilter) -> Result<DailyRates>;
}

#[derive(Debug, Clone)]
pub struct PrivatClient {
    http: Client,
    api_url: String,
}

impl PrivatClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|source| RatesError::Network {
                url: settings.api_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
        })
    }

    pub fn url(&self, date: NaiveDate) -> String {
        get_url(&self.api_url, date)
    }

    async fn load_json(&self, url: &str) -> Result<String> {
        let network = |source| RatesError::Network {
            url: url.to_string(),
            source,
        };

        let resp = self.http.get(url).send().await.map_err(network)?;
        if !resp.status().is_success() {
            return Err(RatesError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        resp.text().await.map_err(network)
    }
}

#[async_trait]
impl RateSource for PrivatClient {
    async fn fetch(&self, date: NaiveDate, filter: &CurrencyFilter) -> Result<DailyRates> {
        let url = self.url(date);
        log::debug!("Fetching {}", url);

        let text = self.load_json(&url).await?;
        let rates = parse_daily_rates(&text, date, filter)?;
        log::debug!("Got {} rates for {}", rates.len(), date_label(date));

        Ok(rates)
    }
}

pub fn get_url(api_url: &str, date: NaiveDate) -> String {
    format!("{}?json&date={}", api_url, date_label(date))
}

pub fn parse_daily_rates(
    text: &str,
    date: NaiveDate,
    filter: &CurrencyFilter,
) -> Result<DailyRates> {
    let parse_error = |source: serde_json::Error| RatesError::Parse {
        date: date_label(date),
        source,
    };

    let body: ExchangeRates = serde_json::from_str(text).map_err(parse_error)?;

    let entries = body
        .exchange_rate
        .into_iter()
        .filter(|item| filter.matches(&item.currency))
        .map(|item| rate_entry(item).map_err(parse_error))
        .collect::<Result<Vec<_>>>()?;

    Ok(daily_rates(entries))
}

/// Rates are only read for selected rows, so a missing field is an error
/// only here.
fn rate_entry(item: ExchangeRateItem) -> std::result::Result<RateEntry, serde_json::Error> {
    let sale = item
        .sale_rate_nb
        .ok_or_else(|| serde_json::Error::missing_field("saleRateNB"))?;
    let purchase = item
        .purchase_rate_nb
        .ok_or_else(|| serde_json::Error::missing_field("purchaseRateNB"))?;

    Ok(RateEntry {
        currency: item.currency,
        sale,
        purchase,
    })
}
