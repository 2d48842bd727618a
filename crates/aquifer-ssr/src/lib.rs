//! Cache-client lifecycle policy for server-side rendering.
//!
//! This crate provides:
//! - `acquire_client` - Correctly-scoped query clients: fresh per server
//!   render, one process-wide singleton in the browser
//! - `ClientSlot` - The explicit guarded holder backing the singleton
//! - `ExecutionContext` - Injected server-vs-browser flag
//! - `PrefetchBoundary` / `ClientProvider` - Non-rendering analogs of the
//!   SSR hydration wrapper and client provider
//!
//! # Example
//!
//! ```rust,ignore
//! use aquifer_ssr::{acquire_client, ExecutionContext};
//!
//! // Server render: a fresh client, isolated from other requests.
//! let client = acquire_client(ExecutionContext::Server);
//!
//! // Browser: the same client on every call.
//! let client = acquire_client(ExecutionContext::detect());
//! ```

mod boundary;
mod context;
mod lifecycle;
mod slot;

pub use boundary::*;
pub use context::*;
pub use lifecycle::*;
pub use slot::*;
