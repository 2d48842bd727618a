//! Process-wide holder for the browser query client.

use std::sync::{Arc, Mutex};

use aquifer_core::QueryClient;
use tracing::debug;

/// An explicit owning container for at most one shared [`QueryClient`].
///
/// Starts uninitialized, is set at most once between resets, and lives
/// for the process. The check-and-set happens under one mutex guard, so
/// even concurrent first callers construct exactly one client.
pub struct ClientSlot {
    inner: Mutex<Option<Arc<QueryClient>>>,
}

impl ClientSlot {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Return the held client, constructing and storing one via `init` if
    /// the slot is empty. The first caller to take the guard wins.
    pub fn get_or_init(&self, init: impl FnOnce() -> QueryClient) -> Arc<QueryClient> {
        let mut slot = self.inner.lock().unwrap();
        match slot.as_ref() {
            Some(client) => {
                debug!(client_id = client.id(), "reusing browser query client");
                Arc::clone(client)
            }
            None => {
                let client = Arc::new(init());
                debug!(client_id = client.id(), "initialized browser query client");
                *slot = Some(Arc::clone(&client));
                client
            }
        }
    }

    /// The held client, if one has been initialized.
    pub fn get(&self) -> Option<Arc<QueryClient>> {
        self.inner.lock().unwrap().clone()
    }

    /// Whether a client has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().unwrap().is_some()
    }

    /// Empty the slot. Returns whether a client was evicted. Existing
    /// handles stay usable; the next `get_or_init` constructs anew.
    pub fn reset(&self) -> bool {
        let evicted = self.inner.lock().unwrap().take();
        if let Some(client) = &evicted {
            debug!(client_id = client.id(), "reset browser query client slot");
        }
        evicted.is_some()
    }
}

impl Default for ClientSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        let slot = ClientSlot::new();

        assert!(!slot.is_initialized());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_first_init_wins() {
        let slot = ClientSlot::new();

        let first = slot.get_or_init(QueryClient::new);
        let second = slot.get_or_init(|| panic!("slot is already initialized"));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn test_get_observes_initialized_client() {
        let slot = ClientSlot::new();
        let client = slot.get_or_init(QueryClient::new);

        let observed = slot.get().unwrap();

        assert!(Arc::ptr_eq(&client, &observed));
    }

    #[test]
    fn test_reset_empties_slot() {
        let slot = ClientSlot::new();
        let before = slot.get_or_init(QueryClient::new);

        assert!(slot.reset());
        assert!(!slot.is_initialized());
        assert!(!slot.reset());

        let after = slot.get_or_init(QueryClient::new);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_concurrent_first_calls_construct_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);
        let slot = Arc::new(ClientSlot::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slot = Arc::clone(&slot);
                std::thread::spawn(move || {
                    slot.get_or_init(|| {
                        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
                        QueryClient::new()
                    })
                })
            })
            .collect();

        let clients: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 1);
        assert!(clients.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
