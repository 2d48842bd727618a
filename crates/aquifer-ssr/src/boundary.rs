//! Non-rendering analogs of the two SSR wrapper components: the server
//! prefetch boundary and the client-side provider.

use std::future::Future;
use std::sync::Arc;

use aquifer_core::{DehydratedState, QueryClient, QueryKey};
use serde::Serialize;
use tracing::debug;

use crate::context::ExecutionContext;
use crate::lifecycle::{acquire_client, acquire_client_in, make_query_client};
use crate::slot::ClientSlot;

/// Server-side prefetch boundary.
///
/// Owns a server-scoped query client for one render pass: run one named
/// prefetch against it, then hand the dehydrated cache state to the
/// transfer boundary. Prefetches are fire-and-forget; a snapshot taken
/// before the fetch completes carries the pending entry so the browser
/// can observe the in-flight query.
pub struct PrefetchBoundary {
    client: Arc<QueryClient>,
}

impl PrefetchBoundary {
    /// Acquire a fresh server-scoped client for this boundary.
    pub fn new() -> Self {
        Self {
            client: Arc::new(make_query_client()),
        }
    }

    /// Start the named prefetch. The entry is pending when this returns;
    /// drive the returned future to record the outcome, or drop it to
    /// dehydrate the query in flight.
    pub fn prefetch_query<'a, T, F, Fut>(
        &'a self,
        key: &QueryKey,
        fetcher: F,
    ) -> impl Future<Output = ()> + 'a
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>> + 'a,
    {
        self.client.prefetch_query(key, fetcher)
    }

    /// The boundary's server-scoped client.
    pub fn client(&self) -> &Arc<QueryClient> {
        &self.client
    }

    /// Snapshot the cache for transfer to the client.
    pub fn dehydrate(&self) -> DehydratedState {
        self.client.dehydrate()
    }
}

impl Default for PrefetchBoundary {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-side provider for the shared query client.
///
/// Mounting resolves the handle through the lifecycle policy, so every
/// provider mounted in a browser process hands out the same client, and
/// re-mounting never discards already-fetched data.
pub struct ClientProvider {
    client: Arc<QueryClient>,
}

impl ClientProvider {
    /// Mount a provider in the given context.
    pub fn mount(ctx: ExecutionContext) -> Self {
        Self {
            client: acquire_client(ctx),
        }
    }

    /// Mount against an explicit slot instead of the process static.
    pub fn mount_in(slot: &ClientSlot, ctx: ExecutionContext) -> Self {
        Self {
            client: acquire_client_in(slot, ctx),
        }
    }

    /// Apply a dehydrated snapshot received from the server.
    pub fn hydrate(&self, state: DehydratedState) -> usize {
        let applied = self.client.hydrate(state);
        debug!(client_id = self.client.id(), applied, "provider hydrated transfer state");
        applied
    }

    /// The shared handle this provider supplies to its subtree.
    pub fn client(&self) -> Arc<QueryClient> {
        Arc::clone(&self.client)
    }
}
