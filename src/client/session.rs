//! Admin session state for greenroom.
//!
//! The academy site keeps its admin bearer token in ambient browser
//! storage; here it is an explicit session object constructed by the caller
//! and handed to the client. Cloning shares the same underlying token, so a
//! login performed through one client handle is visible to all clones.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Shared admin session holding an optional bearer token.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Create a new, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a bearer token after a successful login.
    pub async fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().await;
        *guard = Some(token.into());
    }

    /// Get the current token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Drop the token (logout, or a 401 from the backend).
    pub async fn clear(&self) {
        let mut guard = self.token.write().await;
        *guard = None;
    }

    /// Whether a token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

// The token never appears in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
