use rust_decimal::Decimal;
use serde::Deserialize;

/// One currency row. The rates are only required for the currencies a run
/// asks for, so a row the filter drops may lack them.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ExchangeRateItem {
    #[serde(rename = "currency")]
    pub currency: String,
    #[serde(rename = "saleRateNB")]
    pub sale_rate_nb: Option<Decimal>,
    #[serde(rename = "purchaseRateNB")]
    pub purchase_rate_nb: Option<Decimal>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ExchangeRates {
    #[serde(rename = "exchangeRate")]
    pub exchange_rate: Vec<ExchangeRateItem>,
}
