//! Execution context: server render vs browser.

use std::fmt;

/// Where a client acquisition is running.
///
/// Injected by the caller rather than read from ambient global state, so
/// the lifecycle policy stays testable without a real host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server-side render: one isolated pass per request.
    Server,
    /// Browser: one process per page lifetime.
    Client,
}

impl ExecutionContext {
    /// Map the compile target to a context: wasm32 builds run in the
    /// browser, everything else is a server render.
    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::Client
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::Server
        }
    }

    /// Whether this is a server render pass.
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server)
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Client => write!(f, "client"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(ExecutionContext::Server.to_string(), "server");
        assert_eq!(ExecutionContext::Client.to_string(), "client");
    }

    #[test]
    fn test_is_server() {
        assert!(ExecutionContext::Server.is_server());
        assert!(!ExecutionContext::Client.is_server());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_target_detects_server() {
        assert_eq!(ExecutionContext::detect(), ExecutionContext::Server);
    }
}
