// Error types module

use thiserror::Error;

/// Configuration error raised while resolving a URL
///
/// Every failure of the resolution engine is a configuration problem: the
/// caller asked for a source or alias the settings do not describe, or the
/// settings themselves are incomplete. Resolution never partially succeeds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Nothing is configured at all (no domains, no sources)
    #[error("No image sources configured. Please set domains or sources in settings")]
    NotConfigured,

    /// Requested source name is not in the sources table
    #[error("Source '{0}' not found in sources")]
    SourceNotFound(String),

    /// Source exists but has no domains to serve from
    #[error("Source '{0}' has no domains configured")]
    NoDomains(String),

    /// Web proxy sources must be signed
    #[error("Source '{0}' is a web proxy source and requires a sign_key")]
    ProxyWithoutSignKey(String),

    /// Alias requested but the source has no alias table
    #[error("No aliases set. Please set aliases for source '{0}' in settings")]
    NoAliases(String),

    /// Alias requested but not present in the alias table
    #[error("Alias {alias} not found in aliases")]
    AliasNotFound { alias: String, source_name: String },

    /// Settings could not be read or parsed
    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl ConfigurationError {
    pub fn settings(message: impl Into<String>) -> Self {
        ConfigurationError::Settings(message.into())
    }
}
