use std::time::Duration;

pub mod debouncer;
pub use debouncer::*;

/// How long the search text has to stay unchanged before it is searched
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_secs(1);
