//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use escriba_config::{
    CompletionConfig, Config, CredentialsConfig, HealthConfig, ServerConfig, StaticAssetsConfig, TranscriptionConfig,
    UpstreamConfig,
};

/// Environment variable no test ever sets
///
/// Tests exercise the environment source through unit tests in
/// `escriba-config`; integration tests pin the variable to an unset name
/// so parallel test binaries cannot leak credentials into each other.
const UNSET_ENV_VAR: &str = "ESCRIBA_TEST_NEVER_SET";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at a mock upstream
    ///
    /// `dir` hosts the credential store and the staging directory, so a
    /// test can assert that staged files are cleaned up.
    pub fn new(upstream_url: &str, dir: &Path) -> Self {
        let staging_dir = dir.join("staging");
        std::fs::create_dir_all(&staging_dir).expect("staging dir");

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                upstream: UpstreamConfig {
                    base_url: upstream_url.parse().expect("valid URL"),
                    timeout_seconds: 5,
                    transcription: TranscriptionConfig {
                        staging_dir: Some(staging_dir),
                        ..TranscriptionConfig::default()
                    },
                    completion: CompletionConfig::default(),
                },
                credentials: CredentialsConfig {
                    env_var: UNSET_ENV_VAR.to_string(),
                    store_path: dir.join("config.json"),
                },
                static_assets: None,
            },
        }
    }

    /// Staging directory the transcription proxy will use
    pub fn staging_dir(&self) -> PathBuf {
        self.config
            .upstream
            .transcription
            .staging_dir
            .clone()
            .expect("staging dir always set by new()")
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Serve static assets from `dir`
    pub fn with_static_assets(mut self, dir: &Path) -> Self {
        self.config.static_assets = Some(StaticAssetsConfig {
            directory: dir.to_path_buf(),
        });
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
