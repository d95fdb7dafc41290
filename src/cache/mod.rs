//! Cache module for short-lived API responses
//!
//! This module provides an in-memory response cache with a fixed TTL
//! (time-to-live) per instance. Entries expire lazily: an expired entry is
//! dropped the next time it is read. Repeated reads of the same endpoint can
//! be answered from the cache without another network round trip.

mod manager;

pub use manager::{ResponseCache, DEFAULT_TTL_SECS};
