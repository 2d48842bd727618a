//! Serialized cache snapshots for server-to-client transfer.

use serde::{Deserialize, Serialize};

use crate::key::QueryKey;
use crate::state::{now_millis, QueryState};

/// One dehydrated cache entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DehydratedQuery {
    /// The query key.
    pub key: QueryKey,
    /// The entry state at snapshot time.
    pub state: QueryState,
}

/// A serializable snapshot of the entries that passed the client's
/// dehydration policy, taken on the server and replayed on the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DehydratedState {
    /// Entries included in the snapshot.
    pub queries: Vec<DehydratedQuery>,
    /// When the snapshot was taken, epoch milliseconds.
    pub dehydrated_at: u64,
}

impl DehydratedState {
    /// Create a snapshot from a list of entries.
    pub fn new(queries: Vec<DehydratedQuery>) -> Self {
        Self {
            queries,
            dehydrated_at: now_millis(),
        }
    }

    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether the snapshot carries no entries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Serialize to the JSON wire form embedded in the rendered page.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the JSON wire form back into a snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_key;
    use crate::state::QueryStatus;

    #[test]
    fn test_empty_snapshot() {
        let state = DehydratedState::default();

        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn test_json_wire_form_round_trips() {
        let snapshot = DehydratedState::new(vec![
            DehydratedQuery {
                key: query_key!["products", 42],
                state: QueryState::success(serde_json::json!({"name": "shoe"})),
            },
            DehydratedQuery {
                key: query_key!["inventory", 42],
                state: QueryState::pending(),
            },
        ]);

        let json = snapshot.to_json().unwrap();
        let parsed = DehydratedState::from_json(&json).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.queries[0].key, query_key!["products", 42]);
        assert_eq!(parsed.queries[1].state.status, QueryStatus::Pending);
        assert_eq!(parsed.dehydrated_at, snapshot.dehydrated_at);
    }
}
