use std::sync::Arc;

use escriba_config::{Config, CredentialResolver, CredentialStore};

use crate::{
    error::CompleteError,
    provider::{CompletionProvider, openai::OpenAiProvider},
    types::{CompletionPayload, CompletionReply},
};

/// Template completion server: validate, resolve credential, forward
pub struct Server {
    provider: Box<dyn CompletionProvider>,
    resolver: CredentialResolver,
}

impl Server {
    /// Complete a template from a dictated prompt
    pub(crate) async fn complete(&self, payload: &CompletionPayload) -> crate::error::Result<CompletionReply> {
        if payload.prompt.is_empty() {
            return Err(CompleteError::EmptyPrompt);
        }

        let credential = self.resolver.resolve(None).await.ok_or(CompleteError::MissingCredential)?;

        let result = self.provider.complete(&payload.prompt, &credential).await?;

        Ok(CompletionReply { success: true, result })
    }
}

/// Builder for constructing the completion server from configuration
pub struct CompletionServerBuilder<'a> {
    config: &'a Config,
    store: Arc<CredentialStore>,
}

impl<'a> CompletionServerBuilder<'a> {
    pub fn new(config: &'a Config, store: Arc<CredentialStore>) -> Self {
        Self { config, store }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let provider = OpenAiProvider::new(&self.config.upstream, &self.config.upstream.completion);

        tracing::debug!(provider = provider.name(), "completion server initialized");

        Ok(Server {
            provider: Box::new(provider),
            resolver: CredentialResolver::new(&self.config.credentials, self.store),
        })
    }
}
