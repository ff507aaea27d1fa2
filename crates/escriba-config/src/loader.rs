use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if upstream or credential settings are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upstream.timeout_seconds == 0 {
            anyhow::bail!("upstream.timeout_seconds must be greater than 0");
        }

        let temperature = self.upstream.completion.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            anyhow::bail!("upstream.completion.temperature must be between 0.0 and 2.0");
        }

        if self.upstream.completion.max_tokens == 0 {
            anyhow::bail!("upstream.completion.max_tokens must be greater than 0");
        }

        if self.credentials.env_var.is_empty() {
            anyhow::bail!("credentials.env_var must not be empty");
        }

        if self.credentials.store_path.as_os_str().is_empty() {
            anyhow::bail!("credentials.store_path must not be empty");
        }

        Ok(())
    }
}
