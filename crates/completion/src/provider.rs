pub(crate) mod openai;

use async_trait::async_trait;
use secrecy::SecretString;

/// Trait for chat completion provider implementations
#[async_trait]
pub(crate) trait CompletionProvider: Send + Sync {
    /// Complete a template prompt, returning the generated text
    async fn complete(&self, prompt: &str, credential: &SecretString) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
