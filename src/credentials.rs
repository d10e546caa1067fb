//! Credential providers for authenticated API calls.
//!
//! The bearer token lives wherever the host application keeps it (session
//! storage, keychain, env). The client only needs a way to read the current
//! token at request time, so that concern is injected rather than looked up
//! ambiently.

use std::sync::RwLock;

pub trait CredentialProvider: Send + Sync {
    /// Current bearer token, or None if the user is not logged in.
    fn bearer_token(&self) -> Option<String>;
}

/// In-memory token store.
///
/// Useful for testing or for hosts that manage login themselves.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

impl CredentialProvider for MemoryCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }
}

/// Reads the token from an environment variable once per request.
#[derive(Debug)]
pub struct EnvCredentials {
    var: &'static str,
}

impl EnvCredentials {
    pub fn new(var: &'static str) -> Self {
        Self { var }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new("TIMEDESK_TOKEN")
    }
}

impl CredentialProvider for EnvCredentials {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(self.var).ok().filter(|t| !t.is_empty())
    }
}
