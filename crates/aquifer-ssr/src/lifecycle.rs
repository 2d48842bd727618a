//! Cache-client lifecycle policy.
//!
//! Server renders get a brand-new client per acquisition, so no request
//! can observe cache entries from another request. The browser gets one
//! process-wide client, so re-renders and navigations keep their cache
//! hits and fetches started during a suspended initial render are not
//! lost.

use std::sync::Arc;
use std::time::Duration;

use aquifer_core::{ClientConfig, DehydratePolicy, QueryClient};
use tracing::debug;

use crate::context::ExecutionContext;
use crate::slot::ClientSlot;

/// Stale time applied to every client this module constructs. Above zero
/// so the browser does not re-fetch server-rendered data immediately.
pub const SSR_STALE_TIME: Duration = Duration::from_millis(60_000);

/// The one slot backing browser-context acquisitions.
static BROWSER_CLIENT: ClientSlot = ClientSlot::new();

/// Construct a query client with the fixed SSR configuration: 60s stale
/// time, and dehydration that carries pending queries along with
/// successful ones so the browser can pick up in-flight fetches.
pub(crate) fn make_query_client() -> QueryClient {
    QueryClient::with_config(
        ClientConfig::new()
            .with_stale_time(SSR_STALE_TIME)
            .with_dehydrate(DehydratePolicy::SuccessOrPending),
    )
}

/// Acquire a correctly-scoped query client for the given context.
///
/// Server context constructs a fresh client on every call and retains no
/// reference to it. Client context returns the process-wide singleton,
/// constructing it on first call.
pub fn acquire_client(ctx: ExecutionContext) -> Arc<QueryClient> {
    acquire_client_in(&BROWSER_CLIENT, ctx)
}

/// [`acquire_client`] against an explicit slot instead of the process
/// static, for callers that manage their own singleton lifetime (and for
/// tests that need isolation).
pub fn acquire_client_in(slot: &ClientSlot, ctx: ExecutionContext) -> Arc<QueryClient> {
    match ctx {
        ExecutionContext::Server => {
            let client = Arc::new(make_query_client());
            debug!(client_id = client.id(), "acquired server-scoped query client");
            client
        }
        ExecutionContext::Client => slot.get_or_init(make_query_client),
    }
}

/// Empty the process-wide browser slot. Returns whether a client was
/// evicted. Intended for test isolation and hot-reload; production code
/// has no reason to call this.
pub fn reset_browser_client() -> bool {
    BROWSER_CLIENT.reset()
}
