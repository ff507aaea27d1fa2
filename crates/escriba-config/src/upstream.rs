use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Upstream OpenAI endpoint configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL for the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Request timeout in seconds for upstream calls
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Transcription (Whisper) parameters
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Template completion (chat) parameters
    #[serde(default)]
    pub completion: CompletionConfig,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            transcription: TranscriptionConfig::default(),
            completion: CompletionConfig::default(),
        }
    }
}

/// Fixed parameters sent with every transcription request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// Whisper model identifier
    #[serde(default = "default_whisper_model")]
    pub model: String,
    /// Target language hint (ISO 639-1); clinical audio is Spanish
    #[serde(default = "default_language")]
    pub language: String,
    /// Directory for staged uploads; system temp dir when unset
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: default_whisper_model(),
            language: default_language(),
            staging_dir: None,
        }
    }
}

/// Fixed parameters sent with every template completion request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    /// Chat model identifier
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// Token ceiling for generated output
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature; low, template filling should stay literal
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    120
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

fn default_language() -> String {
    "es".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_tokens() -> u32 {
    2000
}

#[allow(clippy::missing_const_for_fn)]
fn default_temperature() -> f64 {
    0.3
}
