//! In-memory caching for the aggregation endpoint.
//!
//! This module provides `MemoryCache`, a keyed store whose entries stay
//! valid for 5 minutes, and `AggregateClient`, which serves the
//! server-side team aggregation from that cache when it can.
//!
//! Nothing is persisted; the cache lives as long as its owner.

pub mod aggregate;
pub mod manager;

pub use aggregate::{AggregateClient, AGGREGATE_CACHE_KEY};
pub use manager::{CachedData, MemoryCache, CACHE_TTL_MINUTES};
