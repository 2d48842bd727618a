//! The query-cache client.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::dehydrate::{DehydratedQuery, DehydratedState};
use crate::error::{QueryError, QueryResult};
use crate::key::QueryKey;
use crate::state::{QueryState, QueryStatus};

/// Process-wide counter for client ids.
static CLIENT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A cache of query results keyed by [`QueryKey`].
///
/// Entries carry a status (pending/success/error), an optional JSON
/// payload, and a staleness timestamp checked against the configured
/// stale time. The client itself never fetches anything: fetchers are
/// caller-supplied closures, and concurrent callers that miss on the
/// same key each run their own fetch.
pub struct QueryClient {
    id: u64,
    config: ClientConfig,
    entries: RwLock<HashMap<QueryKey, QueryState>>,
}

impl QueryClient {
    /// Create a client with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let id = CLIENT_COUNTER.fetch_add(1, Ordering::SeqCst);
        debug!(client_id = id, stale_time_ms = config.stale_time.as_millis() as u64, "constructed query client");
        Self {
            id,
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Process-unique id of this client instance.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Record a successful result for a key.
    pub fn set_query_data<T: Serialize>(&self, key: &QueryKey, value: &T) -> QueryResult<()> {
        let payload = serde_json::to_value(value)?;
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.clone(), QueryState::success(payload));
        Ok(())
    }

    /// Typed read of a successful entry's payload.
    pub fn get_query_data<T: DeserializeOwned>(&self, key: &QueryKey) -> QueryResult<T> {
        let entries = self.entries.read().unwrap();
        let data = entries
            .get(key)
            .filter(|state| state.status == QueryStatus::Success)
            .and_then(|state| state.data.clone())
            .ok_or_else(|| QueryError::NoData(key.to_string()))?;
        Ok(serde_json::from_value(data)?)
    }

    /// Raw clone of an entry's state.
    pub fn get_query_state(&self, key: &QueryKey) -> Option<QueryState> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// Transition an entry to pending, keeping any prior payload. Creates
    /// a fresh pending entry if the key is unknown.
    pub fn mark_pending(&self, key: &QueryKey) {
        let mut entries = self.entries.write().unwrap();
        let state = match entries.remove(key) {
            Some(existing) => existing.into_pending(),
            None => QueryState::pending(),
        };
        entries.insert(key.clone(), state);
    }

    /// Record a failed fetch for a key, keeping any prior payload.
    pub fn set_query_error(&self, key: &QueryKey, message: impl Into<String>) {
        let mut entries = self.entries.write().unwrap();
        let state = match entries.remove(key) {
            Some(existing) => existing.into_error(message.into()),
            None => QueryState::error(message),
        };
        entries.insert(key.clone(), state);
    }

    /// Whether the entry for a key is still fresh under the configured
    /// stale time. Unknown keys are not fresh.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .read()
            .unwrap()
            .get(key)
            .map(|state| state.is_fresh(self.config.stale_time))
            .unwrap_or(false)
    }

    /// Whether the entry for a key needs a fetch.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        !self.is_fresh(key)
    }

    /// Fetch a query, serving a fresh cached success without invoking the
    /// fetcher. On a miss or stale entry, marks the entry pending, runs
    /// the fetcher, records the outcome, and propagates it.
    pub async fn fetch_query<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> QueryResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        if self.is_fresh(key) {
            trace!(client_id = self.id, key = %key, "fresh hit, skipping fetch");
            return self.get_query_data(key);
        }

        trace!(client_id = self.id, key = %key, "stale or missing, fetching");
        self.mark_pending(key);

        match fetcher().await {
            Ok(value) => {
                self.set_query_data(key, &value)?;
                Ok(value)
            }
            Err(err) => {
                self.set_query_error(key, err.to_string());
                Err(QueryError::Fetch(err))
            }
        }
    }

    /// Start a prefetch: the entry is marked pending before this function
    /// returns, and the returned future completes the fetch, recording
    /// success or error into the entry instead of propagating.
    ///
    /// Dropping the future without driving it leaves the pending entry in
    /// place, which is what lets a dehydration snapshot carry in-flight
    /// queries to the client. A fresh cached success makes the returned
    /// future a no-op.
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
        let fresh = self.is_fresh(key);
        let key = key.clone();
        let fut = if fresh {
            trace!(client_id = self.id, key = %key, "fresh hit, prefetch is a no-op");
            None
        } else {
            self.mark_pending(&key);
            Some(fetcher())
        };

        async move {
            let Some(fut) = fut else { return };
            match fut.await {
                Ok(value) => {
                    if let Err(err) = self.set_query_data(&key, &value) {
                        self.set_query_error(&key, err.to_string());
                    }
                }
                Err(err) => self.set_query_error(&key, err.to_string()),
            }
        }
    }

    /// Snapshot the entries passing the configured dehydration policy.
    pub fn dehydrate(&self) -> DehydratedState {
        let entries = self.entries.read().unwrap();
        let queries: Vec<DehydratedQuery> = entries
            .iter()
            .filter(|(_, state)| self.config.dehydrate.should_dehydrate(state))
            .map(|(key, state)| DehydratedQuery {
                key: key.clone(),
                state: state.clone(),
            })
            .collect();
        trace!(client_id = self.id, total = entries.len(), dehydrated = queries.len(), "dehydrated cache");
        DehydratedState::new(queries)
    }

    /// Merge a dehydrated snapshot into this client.
    ///
    /// An incoming entry replaces an existing one only when strictly
    /// newer, so hydration never downgrades a local success to a foreign
    /// pending of the same vintage. Returns how many entries were
    /// applied.
    pub fn hydrate(&self, snapshot: DehydratedState) -> usize {
        let mut entries = self.entries.write().unwrap();
        let mut applied = 0;
        for query in snapshot.queries {
            match entries.get(&query.key) {
                Some(existing) if query.state.updated_at <= existing.updated_at => {
                    trace!(client_id = self.id, key = %query.key, "hydration skipped stale entry");
                }
                _ => {
                    entries.insert(query.key, query.state);
                    applied += 1;
                }
            }
        }
        debug!(client_id = self.id, applied, "hydrated cache snapshot");
        applied
    }

    /// Number of entries currently cached.
    pub fn query_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("queries", &self.query_count())
            .finish()
    }
}
