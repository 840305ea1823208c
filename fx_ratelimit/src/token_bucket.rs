use std::sync::atomic::AtomicU32;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::error::RateLimitError;
use crate::error::Result;
use crate::limiter::RateLimiter;
use crate::time::Clock;

/// Token bucket rate limiter using lock-free atomic operations.
///
/// Tokens refill continuously at a constant rate and accumulate up to the
/// bucket's capacity; each admitted request consumes tokens. A full bucket
/// therefore allows a burst of `capacity` requests, after which admission
/// settles to the refill rate.
///
/// Tokens are tracked in milli-token units so that sub-second refill
/// progress is not lost to integer truncation.
pub struct TokenBucket {
    /// Available milli-tokens
    tokens: AtomicU32,

    /// Timestamp of the last refill, nanoseconds since the bucket's clock epoch
    refilled_at: AtomicU64,

    /// Maximum whole tokens the bucket can hold
    capacity: u32,

    /// Refill rate in milli-tokens per second
    refill_mt_per_sec: u64,

    clock: Clock,
}

// Milli-tokens per token
const MT: u32 = 1000;

const NANOS_PER_SEC: u128 = 1_000_000_000;

impl TokenBucket {
    /// Create a bucket that starts full.
    ///
    /// `rate_per_second` is the steady-state admission rate once the initial
    /// burst of `capacity` tokens is spent.
    ///
    /// # Panics
    /// Panics if `capacity` is zero or `rate_per_second` is not positive.
    pub fn new(capacity: u32, rate_per_second: f64) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        assert!(rate_per_second > 0.0, "Rate must be greater than 0");

        let clock = Clock::new();
        let now = clock.now_nanos();

        Self {
            tokens: AtomicU32::new(capacity * MT),
            refilled_at: AtomicU64::new(now),
            capacity,
            refill_mt_per_sec: (rate_per_second * f64::from(MT)) as u64,
            clock,
        }
    }

    /// Credit tokens for the time elapsed since the last refill.
    ///
    /// Whichever caller wins the CAS on the timestamp owns the right to add
    /// the accrued tokens; everyone else observes the updated count.
    #[inline(always)]
    fn refill(&self) {
        let now = self.clock.now_nanos();
        let last = self.refilled_at.load(Ordering::Relaxed);

        let elapsed = now.saturating_sub(last);
        let accrued = (u128::from(elapsed) * u128::from(self.refill_mt_per_sec) / NANOS_PER_SEC) as u64;
        if accrued == 0 {
            // Too little time has passed to mint even a milli-token; leave
            // the timestamp alone so the fractional progress still counts.
            return;
        }

        if self.refilled_at.compare_exchange(last, now, Ordering::Release, Ordering::Relaxed).is_err() {
            return;
        }

        let cap_mt = self.capacity * MT;
        loop {
            let current = self.tokens.load(Ordering::Acquire);
            let next = current.saturating_add(accrued.min(u64::from(cap_mt)) as u32).min(cap_mt);
            if current == next {
                break;
            }
            match self.tokens.compare_exchange_weak(current, next, Ordering::Release, Ordering::Relaxed) {
                Ok(_) => break,
                Err(_) => continue,
            }
        }
    }
}

impl RateLimiter for TokenBucket {
    #[inline]
    fn try_acquire(&self, weight: u32) -> Result<()> {
        if weight == 0 {
            return Ok(());
        }

        self.refill();

        let needed = weight * MT;
        loop {
            let current = self.tokens.load(Ordering::Acquire);
            if current < needed {
                return Err(RateLimitError::Exceeded);
            }
            match self.tokens.compare_exchange_weak(current, current - needed, Ordering::Release, Ordering::Relaxed) {
                Ok(_) => return Ok(()),
                Err(_) => continue,
            }
        }
    }

    fn available(&self) -> u32 {
        self.refill();
        self.tokens.load(Ordering::Relaxed) / MT
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn reset(&self) {
        let now = self.clock.now_nanos();
        self.tokens.store(self.capacity * MT, Ordering::Release);
        self.refilled_at.store(now, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_starts_full() {
        let bucket = TokenBucket::new(10, 1.0);
        assert_eq!(bucket.capacity(), 10);
        assert_eq!(bucket.available(), 10);
    }

    #[test]
    fn test_try_acquire_decrements() {
        let bucket = TokenBucket::new(10, 1.0);

        assert!(bucket.try_acquire_one().is_ok());
        assert_eq!(bucket.available(), 9);

        assert!(bucket.try_acquire(4).is_ok());
        assert_eq!(bucket.available(), 5);
    }

    #[test]
    fn test_denies_when_empty() {
        let bucket = TokenBucket::new(5, 0.001);

        assert!(bucket.try_acquire(5).is_ok());
        assert!(matches!(bucket.try_acquire_one(), Err(RateLimitError::Exceeded)));
    }

    #[test]
    fn test_burst_then_steady_rate() {
        // 10-deep burst; exhaust it and the 11th acquisition is denied
        let bucket = TokenBucket::new(10, 1.0);
        for _ in 0..10 {
            assert!(bucket.try_acquire_one().is_ok());
        }
        assert!(bucket.try_acquire_one().is_err());
    }

    #[test]
    fn test_refill_over_time() {
        let bucket = TokenBucket::new(100, 100.0);

        assert!(bucket.try_acquire(100).is_ok());
        assert_eq!(bucket.available(), 0);

        std::thread::sleep(Duration::from_millis(200));

        // ~20 tokens should have accrued (100/sec * 0.2sec)
        let available = bucket.available();
        assert!((15..=25).contains(&available), "Expected ~20, got {available}");
    }

    #[test]
    fn test_refill_caps_at_capacity() {
        let bucket = TokenBucket::new(5, 1000.0);

        assert!(bucket.try_acquire(5).is_ok());
        std::thread::sleep(Duration::from_millis(100));

        assert_eq!(bucket.available(), 5);
    }

    #[test]
    fn test_reset() {
        let bucket = TokenBucket::new(10, 1.0);

        assert!(bucket.try_acquire(7).is_ok());
        assert_eq!(bucket.available(), 3);

        bucket.reset();
        assert_eq!(bucket.available(), 10);
    }

    #[test]
    fn test_zero_weight_is_free() {
        let bucket = TokenBucket::new(10, 1.0);
        assert!(bucket.try_acquire(0).is_ok());
        assert_eq!(bucket.available(), 10);
    }

    #[test]
    fn test_concurrent_acquires_never_over_admit() {
        use std::sync::Arc;

        // Refill is negligible over the test's runtime, so exactly
        // `capacity` acquisitions may succeed across all threads.
        let bucket = Arc::new(TokenBucket::new(1000, 0.001));
        let mut handles = vec![];

        for _ in 0..10 {
            let bucket = Arc::clone(&bucket);
            handles.push(std::thread::spawn(move || {
                let mut admitted = 0u32;
                for _ in 0..200 {
                    if bucket.try_acquire_one().is_ok() {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 1000);
    }
}
