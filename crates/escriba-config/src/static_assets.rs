use std::path::PathBuf;

use serde::Deserialize;

/// Static asset serving for the frontend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticAssetsConfig {
    /// Directory containing `index.html` and the frontend bundle
    pub directory: PathBuf,
}
