//! Credential lookup.
//!
//! Provider secrets are resolved by name through a [`CredentialStore`]. Values stay
//! wrapped in [`SecretString`] and are never logged.

use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::HashMap;
use std::fmt;

/// Resolves a credential key to a secret.
///
/// Returns `None` when the key is unknown or its value is empty; the caller treats
/// that provider as not configured.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by name
    async fn resolve(&self, key: &str) -> Option<SecretString>;
}

/// Reads credentials from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialStore {
    prefix: Option<String>,
}

impl EnvCredentialStore {
    /// Look up keys verbatim
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a prefix to every key before lookup
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn var_name(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key.to_string(),
        }
    }

    /// Whether a non-empty value is present, without exposing it
    #[must_use]
    pub fn is_present(&self, key: &str) -> bool {
        std::env::var(self.var_name(key)).is_ok_and(|v| !v.trim().is_empty())
    }
}

#[async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn resolve(&self, key: &str) -> Option<SecretString> {
        std::env::var(self.var_name(key))
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(SecretString::new)
    }
}

/// In-memory credentials, for embedding and tests
#[derive(Clone, Default)]
pub struct StaticCredentialStore {
    secrets: HashMap<String, SecretString>,
}

impl StaticCredentialStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential
    #[must_use]
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a credential
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.secrets
            .insert(key.into(), SecretString::new(value.into()));
    }

    /// Number of stored credentials
    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl fmt::Debug for StaticCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.secrets.keys().collect();
        keys.sort();
        f.debug_struct("StaticCredentialStore")
            .field("keys", &keys)
            .finish()
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn resolve(&self, key: &str) -> Option<SecretString> {
        use secrecy::ExposeSecret;

        self.secrets
            .get(key)
            .filter(|s| !s.expose_secret().trim().is_empty())
            .cloned()
    }
}
