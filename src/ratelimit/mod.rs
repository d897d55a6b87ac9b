//! Rate limiting logic and state management.

mod entry;
mod key;
mod limiter;
mod presets;
mod sweeper;

pub use key::LimitKey;
pub use limiter::{RateLimitConfig, RateLimitResult, RateLimiter};
pub use presets::PresetConfig;
