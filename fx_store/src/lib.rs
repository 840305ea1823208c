//! # fx_store
//!
//! The static exchange-rate table: loaded once from JSON at startup,
//! immutable and shareable across request tasks thereafter.

pub mod error;
pub mod table;

pub use error::LookupError;
pub use error::StoreError;
pub use table::DateRates;
pub use table::RateTable;
