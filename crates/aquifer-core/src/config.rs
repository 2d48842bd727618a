//! Client configuration and dehydration policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::{QueryState, QueryStatus};

/// Policy deciding which entries are included when a client is dehydrated
/// for transfer to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DehydratePolicy {
    /// Only terminal successful entries are transferred.
    #[default]
    SuccessOnly,
    /// Successful entries plus in-flight pending entries, so the client
    /// can observe fetches the server started but did not finish.
    SuccessOrPending,
}

impl DehydratePolicy {
    /// Whether an entry passes this policy.
    pub fn should_dehydrate(&self, state: &QueryState) -> bool {
        match self {
            Self::SuccessOnly => default_should_dehydrate(state),
            Self::SuccessOrPending => {
                default_should_dehydrate(state) || state.status == QueryStatus::Pending
            }
        }
    }
}

/// The default dehydration rule: include successful entries only.
pub fn default_should_dehydrate(state: &QueryState) -> bool {
    state.status == QueryStatus::Success
}

/// Configuration for a [`QueryClient`](crate::QueryClient).
///
/// The default mirrors a client with no tuning: entries go stale
/// immediately and only successful entries are dehydrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// How long a successful entry is served without re-fetching.
    pub stale_time: Duration,
    /// Which entries survive dehydration.
    pub dehydrate: DehydratePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            dehydrate: DehydratePolicy::SuccessOnly,
        }
    }
}

impl ClientConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stale time.
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    /// Set the dehydration policy.
    pub fn with_dehydrate(mut self, policy: DehydratePolicy) -> Self {
        self.dehydrate = policy;
        self
    }
}
