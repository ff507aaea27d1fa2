use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Uploaded audio staged to a uniquely-named temp file
///
/// The file lives only as long as this guard; dropping it removes the file,
/// so every exit path of a request cleans up without explicit bookkeeping.
/// Unique names mean concurrent uploads of the same filename never collide.
#[derive(Debug)]
pub(crate) struct StagedAudio {
    file: NamedTempFile,
    size: u64,
}

impl StagedAudio {
    /// Write `bytes` to a fresh temp file under `dir`
    ///
    /// Falls back to the system temp directory when no staging directory
    /// is configured.
    pub async fn create(dir: Option<&Path>, bytes: Vec<u8>) -> std::io::Result<Self> {
        let dir: PathBuf = dir.map_or_else(std::env::temp_dir, Path::to_path_buf);

        tokio::task::spawn_blocking(move || {
            let mut file = NamedTempFile::with_suffix_in(".audio", &dir)?;
            file.write_all(&bytes)?;
            file.flush()?;

            Ok(Self {
                file,
                size: bytes.len() as u64,
            })
        })
        .await
        .map_err(std::io::Error::other)?
    }

    /// Size of the staged file in bytes
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Path of the staged file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the staged bytes back for forwarding upstream
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }
}
