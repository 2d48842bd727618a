//! Public SDK for the aquifer SSR query-cache library.
//!
//! Re-exports the query client and the SSR lifecycle policy:
//!
//! ```rust,ignore
//! use aquifer_sdk::prelude::*;
//!
//! // Server render path.
//! let boundary = PrefetchBoundary::new();
//! let prefetch = boundary.prefetch_query(&query_key!["products", 42], || fetch_product(42));
//! let transfer = boundary.dehydrate().to_json()?;
//!
//! // Browser path.
//! let provider = ClientProvider::mount(ExecutionContext::detect());
//! provider.hydrate(DehydratedState::from_json(&transfer)?);
//! ```

pub use aquifer_core;
pub use aquifer_ssr;

/// Prelude for convenient imports.
pub mod prelude {
    pub use aquifer_core::*;
    pub use aquifer_ssr::*;
}
