use std::io::Write;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Persisted single-key configuration document
///
/// The on-disk shape is `{"api_key": "sk-…"}`, written and read wholesale.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    /// The upstream API credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// File-backed credential store
///
/// Reads go straight to the file. Writes serialize through an async mutex
/// and land via write-to-temp-then-rename, so concurrent writers cannot
/// interleave partial documents and readers never observe a torn file.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored document
    ///
    /// A missing or unreadable file yields the empty document; the store
    /// starts out unconfigured rather than failing the request.
    pub async fn load(&self) -> StoredConfig {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "credential store is corrupt, treating as empty");
                StoredConfig::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredConfig::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read credential store");
                StoredConfig::default()
            }
        }
    }

    /// The stored API key, if present and non-empty
    pub async fn api_key(&self) -> Option<SecretString> {
        self.load()
            .await
            .api_key
            .filter(|key| !key.is_empty())
            .map(SecretString::from)
    }

    /// Persist a new API key, replacing the document atomically
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or the
    /// replacement file cannot be written or renamed into place
    pub async fn save_api_key(&self, api_key: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await;
        document.api_key = Some(api_key.to_string());

        let bytes = serde_json::to_vec(&document)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await??;

        tracing::debug!(path = %self.path.display(), "credential store updated");

        Ok(())
    }
}

/// Write `bytes` to `path` via a temp file in the same directory
fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| anyhow::anyhow!("failed to create temp file in {}: {e}", dir.display()))?;
    file.write_all(bytes)?;
    file.persist(path)
        .map_err(|e| anyhow::anyhow!("failed to replace {}: {e}", path.display()))?;

    Ok(())
}
