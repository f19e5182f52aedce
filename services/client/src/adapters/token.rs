//! services/client/src/adapters/token.rs
//!
//! Token providers implementing the `TokenProvider` port. Acquiring the token
//! (the login flow itself) belongs to the identity provider; these adapters only
//! hand out what they were given.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::info;
use tracker_core::ports::{TokenError, TokenProvider};

/// Hands out a token supplied up front, typically from `TRACKER_ACCESS_TOKEN`.
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    fn current(&self) -> Result<Option<String>, TokenError> {
        self.token
            .read()
            .map(|t| t.clone())
            .map_err(|e| TokenError::Provider(e.to_string()))
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    fn is_authenticated(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }

    async fn access_token(&self) -> Result<String, TokenError> {
        self.current()?.ok_or(TokenError::Missing)
    }

    async fn logout(&self) -> Result<(), TokenError> {
        let mut token = self
            .token
            .write()
            .map_err(|e| TokenError::Provider(e.to_string()))?;
        *token = None;
        info!("Logged out; access token discarded.");
        Ok(())
    }
}
