use crate::error::Result;

/// Admission-control seam shared by all limiter implementations.
///
/// Every method is non-blocking: a denied acquisition returns immediately
/// rather than waiting for refill. Callers that want to retry do so on
/// their own schedule.
pub trait RateLimiter: Send + Sync {
    /// Try to acquire a specified number of admission slots without blocking
    fn try_acquire(&self, weight: u32) -> Result<()>;

    /// Try to acquire a single slot without blocking
    fn try_acquire_one(&self) -> Result<()> {
        self.try_acquire(1)
    }

    /// Number of slots currently available
    fn available(&self) -> u32;

    /// Maximum burst capacity
    fn capacity(&self) -> u32;

    /// Restore the limiter to its initial, fully-available state
    fn reset(&self);
}
