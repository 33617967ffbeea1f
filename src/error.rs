use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatesError {
    #[error("{0}")]
    Validation(String),

    #[error("Request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Can't download rates from {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Unexpected response for {date}")]
    Parse {
        date: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Can't append to log file {path}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    Config { key: &'static str, value: String },

    #[error("Fetch task did not complete")]
    Task(#[from] tokio::task::JoinError),

    #[error("Can't get date {days} days before {from}")]
    DateRange { from: chrono::NaiveDate, days: u64 },
}

pub type Result<T> = std::result::Result<T, RatesError>;
