//! Release resolution layer
//!
//! This module provides the cache-or-fetch flow that turns a cache key and a
//! release endpoint into the latest published release listing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ CachedFetcher│────▶│ TimedCache  │────▶│ KeyValueStore│
//! │  (resolve)   │     │ (freshness) │     │ (sqlite,mem) │
//! └──────────────┘     └─────────────┘     └──────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  Transport  │
//! │   (http)    │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: Timed cache with a fixed 24 hour freshness window
//! - [`fetcher`]: Cache-first resolution with non-fatal persistence
//! - [`store`]: Key-value store trait
//! - [`stores`]: SQLite and in-memory stores
//! - [`transport`]: Transport trait for fetching release listings
//! - [`transports`]: reqwest-based HTTP transport
//! - [`error`]: Error types for storage, fetching and resolution
//! - [`types`]: Queries and payloads

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod store;
pub mod stores;
pub mod transport;
pub mod transports;
pub mod types;
