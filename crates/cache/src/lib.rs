//! Change detection for incremental judgment runs.

pub mod fingerprint;
pub mod store;

pub use fingerprint::Fingerprint;
pub use store::{CacheEntry, CacheError, VerdictCache};
