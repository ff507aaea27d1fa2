#![allow(clippy::must_use_candidate)]

pub mod cors;
pub mod credentials;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod static_assets;
pub mod store;
pub mod upstream;

use serde::Deserialize;

pub use cors::*;
pub use credentials::*;
pub use health::*;
pub use server::*;
pub use static_assets::*;
pub use store::*;
pub use upstream::*;

/// Top-level Escriba configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream OpenAI endpoint configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Credential resolution configuration
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Static asset serving for the frontend
    #[serde(default)]
    pub static_assets: Option<StaticAssetsConfig>,
}
