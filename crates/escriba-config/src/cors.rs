use serde::Deserialize;

/// CORS configuration
///
/// The frontend may be served from a different origin during development,
/// so the default is fully permissive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrArray,
    /// Allow credentials
    #[serde(default)]
    pub credentials: bool,
}

/// Either a wildcard "*" or an explicit list of values
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnyOrArray {
    /// A single string; only "*" is meaningful
    Wildcard(String),
    /// Explicit list
    List(Vec<String>),
}

impl AnyOrArray {
    /// Whether this matches any value
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Wildcard(s) if s == "*")
    }
}

impl Default for AnyOrArray {
    fn default() -> Self {
        Self::Wildcard("*".to_string())
    }
}
