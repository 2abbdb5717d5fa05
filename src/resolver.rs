//! URL resolution engine
//!
//! The primary entry point: turn a logical image path plus parameters into
//! a delivery URL. Each call runs the same pipeline:
//!
//! ```text
//! registry (source) -> alias merge -> wh expansion -> fm detection
//!     -> domain selection -> assembly + signing
//! ```
//!
//! Resolution is a pure computation over an immutable configuration
//! snapshot. It performs no I/O and either returns a complete URL or fails
//! with a [`ConfigurationError`].

use std::sync::Arc;

use crate::alias::resolve_alias;
use crate::config::Settings;
use crate::constants::DEFAULT_SOURCE_NAME;
use crate::error::ConfigurationError;
use crate::format::detect_format;
use crate::params::{normalize, ParamValue, ParameterSet};
use crate::registry::SourceRegistry;
use crate::shard::{select_domain, DomainSelector, RandomSelector};
use crate::url::{assemble, UrlParts};

/// One resolution call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionRequest {
    /// Relative asset path, or a full external URL for proxy sources
    pub path: String,
    pub alias: Option<String>,
    /// Source name; `""` selects the default source
    pub source: String,
    /// Call-site parameters, which win over alias presets
    pub overrides: ParameterSet,
}

impl ResolutionRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
            source: DEFAULT_SOURCE_NAME.to_string(),
            overrides: ParameterSet::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.overrides.insert(key, value);
        self
    }

    pub fn params(mut self, params: ParameterSet) -> Self {
        self.overrides.merge(&params);
        self
    }
}

/// Resolves requests against a [`SourceRegistry`]
pub struct UrlResolver {
    registry: Arc<SourceRegistry>,
    selector: Box<dyn DomainSelector>,
}

impl UrlResolver {
    /// Resolver over a shared registry, sharding at random
    pub fn new(registry: Arc<SourceRegistry>) -> Self {
        Self {
            registry,
            selector: Box::new(RandomSelector),
        }
    }

    /// Convenience constructor for a private registry built from `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(SourceRegistry::new(settings)))
    }

    /// Replace the shard selection strategy
    pub fn with_selector(mut self, selector: impl DomainSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn registry(&self) -> &Arc<SourceRegistry> {
        &self.registry
    }

    /// Resolve a request into its final URL.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when the source is missing or
    /// incomplete, or when the requested alias cannot be found.
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<String, ConfigurationError> {
        let source = self.registry.resolve(&request.source)?;

        let params = resolve_alias(request.alias.as_deref(), &source, request.overrides.clone())?;
        let params = normalize(params);
        let params = detect_format(&request.path, params, &source);

        let domain = select_domain(self.selector.as_ref(), &source.domains);

        let url = assemble(
            UrlParts {
                scheme: source.scheme(),
                domain,
                path: &request.path,
                sign_key: source.sign_key.as_deref(),
                web_proxy: source.web_proxy,
            },
            params,
        );

        tracing::debug!(
            path = %request.path,
            source = %source.name,
            alias = ?request.alias,
            domain = %domain,
            signed = source.sign_key.is_some(),
            url = %url,
            "Resolved image URL"
        );

        Ok(url)
    }

    /// Shorthand for [`UrlResolver::resolve`] without building a request
    pub fn url(
        &self,
        path: &str,
        alias: Option<&str>,
        source: &str,
        params: ParameterSet,
    ) -> Result<String, ConfigurationError> {
        let request = ResolutionRequest {
            path: path.to_string(),
            alias: alias.map(str::to_string),
            source: source.to_string(),
            overrides: params,
        };
        self.resolve(&request)
    }
}

impl std::fmt::Debug for UrlResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
