use std::path::PathBuf;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::store::CredentialStore;

/// Credential resolution configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// Environment variable holding the upstream API key
    #[serde(default = "default_env_var")]
    pub env_var: String,
    /// Path of the persisted credential store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            env_var: default_env_var(),
            store_path: default_store_path(),
        }
    }
}

fn default_env_var() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("config.json")
}

/// A place a credential can come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Field supplied with the request itself
    Request,
    /// Process environment variable
    Environment,
    /// Persisted credential store
    Store,
}

/// The order sources are polled; the most explicit source wins
pub const RESOLUTION_ORDER: [CredentialSource; 3] = [
    CredentialSource::Request,
    CredentialSource::Environment,
    CredentialSource::Store,
];

/// Resolves the single credential used for an upstream call
///
/// Polls each source in [`RESOLUTION_ORDER`]; the first non-empty value
/// wins and no further sources are consulted.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    env_var: String,
    store: Arc<CredentialStore>,
}

impl CredentialResolver {
    pub fn new(config: &CredentialsConfig, store: Arc<CredentialStore>) -> Self {
        Self {
            env_var: config.env_var.clone(),
            store,
        }
    }

    /// Resolve a credential, or `None` when every source is empty
    pub async fn resolve(&self, request_key: Option<&SecretString>) -> Option<SecretString> {
        for source in RESOLUTION_ORDER {
            let key = match source {
                CredentialSource::Request => request_key
                    .filter(|key| !key.expose_secret().is_empty())
                    .cloned(),
                CredentialSource::Environment => std::env::var(&self.env_var)
                    .ok()
                    .filter(|value| !value.is_empty())
                    .map(SecretString::from),
                CredentialSource::Store => self.store.api_key().await,
            };

            if let Some(key) = key {
                tracing::debug!(source = ?source, "credential resolved");
                return Some(key);
            }
        }

        None
    }
}
