//! Cache module for exercise detail payloads
//!
//! Exercise records are persisted through an injected key/value store and
//! treated as authoritative for 24 hours after they were written. Freshness
//! is evaluated lazily when an entry is read; stale entries stay in storage
//! until the next successful fetch overwrites them.

mod clock;
mod manager;
mod store;

pub use clock::{Clock, SystemClock};
pub use manager::{CacheError, DetailCache, DETAIL_TTL};
pub use store::{FileStore, KeyValueStore, StoreError};

// Deterministic doubles for tests, including the integration tests
#[doc(hidden)]
pub use clock::ManualClock;
#[doc(hidden)]
pub use store::MemoryStore;
