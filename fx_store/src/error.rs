use thiserror::Error;

/// Failures while building the table from its source. Fatal at startup.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read rates source: {0}")]
    Io(#[from] std::io::Error),

    #[error("rates source is not a date -> currency -> rate mapping: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures while answering a lookup. Terminal for one request only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no exchange rates for date {0}")]
    DateNotFound(String),

    #[error("currency {0} not listed for the requested date")]
    CurrencyNotFound(String),
}
