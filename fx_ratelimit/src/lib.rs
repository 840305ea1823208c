pub mod error;
pub mod limiter;
mod time;
pub mod token_bucket;

pub use error::RateLimitError;
pub use error::Result;
pub use limiter::RateLimiter;
pub use token_bucket::TokenBucket;
