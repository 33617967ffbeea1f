use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

/// Date format used both in request URLs and in record labels.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// National bank sale/purchase pair for one currency on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(with = "rust_decimal::serde::float")]
    pub sale: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateEntry {
    pub currency: String,
    pub sale: Decimal,
    pub purchase: Decimal,
}

impl RateEntry {
    pub fn rate(&self) -> Rate {
        Rate {
            sale: self.sale,
            purchase: self.purchase,
        }
    }
}

/// Currency code to rate, for a single date.
pub type DailyRates = BTreeMap<String, Rate>;

pub fn daily_rates<I>(entries: I) -> DailyRates
where
    I: IntoIterator<Item = RateEntry>,
{
    entries
        .into_iter()
        .map(|entry| {
            let rate = entry.rate();
            (entry.currency, rate)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRecord {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub rates: DailyRates,
}

fn serialize_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

impl fmt::Display for FormattedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&line)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn label_is_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_label(date), "07.03.2024");
    }

    #[test]
    fn later_entry_for_same_currency_wins() {
        let rates = daily_rates(vec![
            RateEntry {
                currency: "USD".to_string(),
                sale: dec("37.0"),
                purchase: dec("36.5"),
            },
            RateEntry {
                currency: "USD".to_string(),
                sale: dec("38.0"),
                purchase: dec("37.5"),
            },
        ]);

        assert_eq!(rates.len(), 1);
        assert_eq!(rates["USD"].sale, dec("38.0"));
    }

    #[test]
    fn record_renders_as_single_json_line() {
        let record = FormattedRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            rates: daily_rates(vec![
                RateEntry {
                    currency: "USD".to_string(),
                    sale: dec("37.0"),
                    purchase: dec("36.5"),
                },
                RateEntry {
                    currency: "EUR".to_string(),
                    sale: dec("41.0"),
                    purchase: dec("40.5"),
                },
            ]),
        };

        assert_eq!(
            record.to_string(),
            r#"{"date":"07.03.2024","rates":{"EUR":{"sale":41.0,"purchase":40.5},"USD":{"sale":37.0,"purchase":36.5}}}"#
        );
    }
}
