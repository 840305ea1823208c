use std::time::Instant;

/// Monotonic clock for limiter bookkeeping.
///
/// Timestamps are nanoseconds relative to the limiter's creation, so they
/// fit in a `u64` and survive being stored in an atomic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    epoch: Instant,
}

impl Clock {
    #[inline(always)]
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }

    /// Nanoseconds elapsed since this clock was created
    #[inline(always)]
    pub fn now_nanos(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = Clock::new();
        let t1 = clock.now_nanos();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let t2 = clock.now_nanos();

        assert!(t2 > t1);
        assert!(t2 - t1 >= 10_000_000);
    }
}
