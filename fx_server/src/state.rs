use std::sync::Arc;

use fx_ratelimit::TokenBucket;
use fx_store::RateTable;

/// Admission slots refilled per second once the initial burst is spent
pub const REFILL_PER_SECOND: f64 = 1.0;

/// Back-to-back admissions allowed from a cold limiter
pub const BURST_CAPACITY: u32 = 10;

/// Shared per-process state handed to every request task.
///
/// The table is read-only after construction; the limiter is the only
/// mutable state requests contend on, and it synchronizes internally.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RateTable>,
    pub limiter: Arc<TokenBucket>,
}

impl AppState {
    /// State with the service's compiled-in admission policy
    pub fn new(table: RateTable) -> Self {
        Self::with_limiter(table, TokenBucket::new(BURST_CAPACITY, REFILL_PER_SECOND))
    }

    /// State with a caller-supplied limiter (tests tune the refill rate)
    pub fn with_limiter(table: RateTable, limiter: TokenBucket) -> Self {
        Self { table: Arc::new(table), limiter: Arc::new(limiter) }
    }
}
