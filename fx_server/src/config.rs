use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RATES_FILE: &str = "exchange_rates.json";

/// Startup configuration, read once from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub rates_file: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_values(std::env::var("PORT").ok(), std::env::var("RATES_FILE").ok())
    }

    fn from_values(port: Option<String>, rates_file: Option<String>) -> Self {
        let port = match port.filter(|raw| !raw.is_empty()) {
            Some(raw) => match raw.parse() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!("Ignoring unparseable PORT value {raw:?}. Using default {DEFAULT_PORT}.");
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        let rates_file = rates_file.filter(|raw| !raw.is_empty()).map_or_else(|| PathBuf::from(DEFAULT_RATES_FILE), PathBuf::from);

        Self { port, rates_file }
    }
}
