use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::LookupError;
use crate::error::StoreError;

/// All rates quoted for one date, keyed by uppercase currency code
pub type DateRates = HashMap<String, f64>;

/// Immutable two-level mapping: date -> currency -> rate.
///
/// Built exactly once at startup and shared read-only across requests;
/// there is no writer after construction and no reload path.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: HashMap<String, DateRates>,
}

impl RateTable {
    /// Deserialize the table from a JSON file.
    ///
    /// The file must hold an object of objects of numbers; anything else is
    /// a [`StoreError::Parse`]. An unreadable file is a [`StoreError::Io`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::open(path.as_ref())?;
        let table: Self = serde_json::from_reader(BufReader::new(file))?;

        tracing::info!("Loaded exchange rates for {} dates from {}", table.len(), path.as_ref().display());

        Ok(table)
    }

    /// Look up rates for a date, optionally narrowed to one currency.
    ///
    /// The currency match is case-insensitive; the result is keyed by the
    /// uppercased code. With no currency the full per-date mapping is
    /// returned.
    pub fn get(&self, date: &str, currency: Option<&str>) -> Result<DateRates, LookupError> {
        let day = self.rates.get(date).ok_or_else(|| LookupError::DateNotFound(date.to_string()))?;

        match currency {
            None => Ok(day.clone()),
            Some(code) => {
                let code = code.to_uppercase();
                let rate = *day.get(&code).ok_or_else(|| LookupError::CurrencyNotFound(code.clone()))?;
                Ok(HashMap::from([(code, rate)]))
            }
        }
    }

    /// Number of dates in the table
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<HashMap<String, DateRates>> for RateTable {
    fn from(rates: HashMap<String, DateRates>) -> Self {
        Self { rates }
    }
}
