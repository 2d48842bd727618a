//! Query entry states and staleness.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Status of a cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    /// Fetch in flight; no terminal result yet.
    Pending,
    /// Terminal successful result.
    Success,
    /// Terminal failed result.
    Error,
}

impl QueryStatus {
    /// Whether the status is a terminal one.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// State of a single cache entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryState {
    /// Current status.
    pub status: QueryStatus,
    /// Last successfully fetched payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error text from the last failed fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the entry last changed status, epoch milliseconds.
    pub updated_at: u64,
}

impl QueryState {
    /// Create a successful entry updated now.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
            updated_at: now_millis(),
        }
    }

    /// Create a pending entry with no payload yet.
    pub fn pending() -> Self {
        Self {
            status: QueryStatus::Pending,
            data: None,
            error: None,
            updated_at: now_millis(),
        }
    }

    /// Create a failed entry.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(message.into()),
            updated_at: now_millis(),
        }
    }

    /// Override the update timestamp.
    pub fn with_updated_at(mut self, at_ms: u64) -> Self {
        self.updated_at = at_ms;
        self
    }

    /// Transition to pending, keeping the last payload visible.
    pub fn into_pending(mut self) -> Self {
        self.status = QueryStatus::Pending;
        self.error = None;
        self.updated_at = now_millis();
        self
    }

    /// Transition to failed, keeping the last payload.
    pub fn into_error(mut self, message: String) -> Self {
        self.status = QueryStatus::Error;
        self.error = Some(message);
        self.updated_at = now_millis();
        self
    }

    /// Whether this entry still counts as fresh at `now_ms`.
    ///
    /// Only successful entries can be fresh; pending and errored entries
    /// always need a fetch.
    pub fn is_fresh_at(&self, stale_time: Duration, now_ms: u64) -> bool {
        self.status == QueryStatus::Success
            && now_ms.saturating_sub(self.updated_at) < stale_time.as_millis() as u64
    }

    /// Whether this entry is fresh right now.
    pub fn is_fresh(&self, stale_time: Duration) -> bool {
        self.is_fresh_at(stale_time, now_millis())
    }

    /// Time since the last status change.
    pub fn age(&self) -> Duration {
        Duration::from_millis(now_millis().saturating_sub(self.updated_at))
    }
}

/// Current time in epoch milliseconds.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_state_holds_payload() {
        let state = QueryState::success(serde_json::json!({"id": 1}));

        assert_eq!(state.status, QueryStatus::Success);
        assert!(state.data.is_some());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_freshness_boundary() {
        let stale_time = Duration::from_millis(60_000);
        let state = QueryState::success(serde_json::json!(1)).with_updated_at(1_000_000);

        assert!(state.is_fresh_at(stale_time, 1_000_000));
        assert!(state.is_fresh_at(stale_time, 1_059_999));
        assert!(!state.is_fresh_at(stale_time, 1_060_000));
    }

    #[test]
    fn test_pending_is_never_fresh() {
        let state = QueryState::pending();

        assert!(!state.is_fresh(Duration::from_secs(60)));
    }

    #[test]
    fn test_error_is_never_fresh() {
        let state = QueryState::error("boom");

        assert!(!state.is_fresh(Duration::from_secs(60)));
    }

    #[test]
    fn test_zero_stale_time_is_immediately_stale() {
        let state = QueryState::success(serde_json::json!(1));

        assert!(!state.is_fresh(Duration::ZERO));
    }

    #[test]
    fn test_into_pending_keeps_data_and_clears_error() {
        let state = QueryState::success(serde_json::json!("cached"))
            .into_error("transient".to_string())
            .into_pending();

        assert_eq!(state.status, QueryStatus::Pending);
        assert_eq!(state.data, Some(serde_json::json!("cached")));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_into_error_keeps_data() {
        let state = QueryState::success(serde_json::json!("cached")).into_error("boom".to_string());

        assert_eq!(state.status, QueryStatus::Error);
        assert_eq!(state.data, Some(serde_json::json!("cached")));
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_status_display_and_terminality() {
        assert_eq!(QueryStatus::Pending.to_string(), "PENDING");
        assert_eq!(QueryStatus::Success.to_string(), "SUCCESS");
        assert_eq!(QueryStatus::Error.to_string(), "ERROR");

        assert!(!QueryStatus::Pending.is_terminal());
        assert!(QueryStatus::Success.is_terminal());
        assert!(QueryStatus::Error.is_terminal());
    }
}
