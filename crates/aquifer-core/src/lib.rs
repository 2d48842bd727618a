//! Query-cache client for server-side-rendered data fetching.
//!
//! This crate provides:
//! - `QueryKey` / `query_key!` - Ordered primitive-segment cache keys
//! - `QueryClient` - The in-memory query cache with typed reads
//! - `ClientConfig` / `DehydratePolicy` - Stale time and transfer policy
//! - `DehydratedState` - Serializable server-to-client cache snapshots
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use aquifer_core::{query_key, ClientConfig, DehydratePolicy, QueryClient};
//!
//! let client = QueryClient::with_config(
//!     ClientConfig::new()
//!         .with_stale_time(Duration::from_secs(60))
//!         .with_dehydrate(DehydratePolicy::SuccessOrPending),
//! );
//!
//! let product = client
//!     .fetch_query(&query_key!["products", 42], || fetch_product(42))
//!     .await?;
//!
//! let transfer = client.dehydrate().to_json()?;
//! ```

mod client;
mod config;
mod dehydrate;
mod error;
mod key;
mod state;

pub use client::*;
pub use config::*;
pub use dehydrate::*;
pub use error::*;
pub use key::*;
pub use state::*;
