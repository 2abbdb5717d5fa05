//! Source configuration types.
//!
//! A *source* describes where and how images are delivered: the domain set
//! (shards), scheme, proxy mode, signing secret and alias presets.
//!
//! # Settings vs Normalized Configuration
//!
//! [`SourceSettings`] is the raw, deserialized shape of one entry under
//! `sources:` in the settings file. [`SourceConfig`] is the normalized shape
//! every later stage works with. Both the legacy top-level keys and the
//! `sources:` table collapse into `SourceConfig` (see
//! [`super::Settings::normalize`]).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DETECT_FORMAT, DEFAULT_HTTPS, DEFAULT_WEB_PROXY};
use crate::error::ConfigurationError;
use crate::params::ParameterSet;

fn default_https() -> bool {
    DEFAULT_HTTPS
}

/// One domain or a list of shards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Domains {
    Single(String),
    Sharded(Vec<String>),
}

impl Domains {
    /// Flatten into an ordered list, dropping blank entries
    pub fn to_vec(&self) -> Vec<String> {
        let domains = match self {
            Domains::Single(domain) => vec![domain.clone()],
            Domains::Sharded(domains) => domains.clone(),
        };
        domains
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect()
    }
}

impl From<&str> for Domains {
    fn from(domain: &str) -> Self {
        Domains::Single(domain.to_string())
    }
}

impl From<String> for Domains {
    fn from(domain: String) -> Self {
        Domains::Single(domain)
    }
}

impl From<Vec<&str>> for Domains {
    fn from(domains: Vec<&str>) -> Self {
        Domains::Sharded(domains.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Domains {
    fn from(domains: Vec<String>) -> Self {
        Domains::Sharded(domains)
    }
}

/// Raw settings for one named source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Domains>,
    #[serde(default = "default_https")]
    pub https: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_key: Option<String>,
    #[serde(default)]
    pub web_proxy: bool,
    #[serde(default)]
    pub detect_format: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<HashMap<String, ParameterSet>>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            domains: None,
            https: DEFAULT_HTTPS,
            sign_key: None,
            web_proxy: DEFAULT_WEB_PROXY,
            detect_format: DEFAULT_DETECT_FORMAT,
            aliases: None,
        }
    }
}

impl SourceSettings {
    pub fn new(domains: impl Into<Domains>) -> Self {
        Self {
            domains: Some(domains.into()),
            ..Default::default()
        }
    }

    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn with_sign_key(mut self, sign_key: impl Into<String>) -> Self {
        self.sign_key = Some(sign_key.into());
        self
    }

    pub fn with_web_proxy(mut self, web_proxy: bool) -> Self {
        self.web_proxy = web_proxy;
        self
    }

    pub fn with_detect_format(mut self, detect_format: bool) -> Self {
        self.detect_format = detect_format;
        self
    }

    pub fn with_alias(mut self, name: impl Into<String>, params: ParameterSet) -> Self {
        self.aliases
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), params);
        self
    }

    /// Normalize into a [`SourceConfig`] registered under `name`
    pub fn to_source_config(&self, name: &str) -> SourceConfig {
        SourceConfig {
            name: name.to_string(),
            domains: self.domains.as_ref().map(Domains::to_vec).unwrap_or_default(),
            https: self.https,
            sign_key: non_empty(self.sign_key.as_deref()),
            web_proxy: self.web_proxy,
            detect_format: self.detect_format,
            aliases: self.aliases.clone().unwrap_or_default(),
        }
    }
}

/// Empty sign keys count as "not configured"
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Normalized source definition
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    /// Unique key; `""` is the default source
    pub name: String,
    /// Ordered shard list
    pub domains: Vec<String>,
    pub https: bool,
    pub sign_key: Option<String>,
    /// Paths are full external URLs fetched through the CDN
    pub web_proxy: bool,
    /// Infer `fm` from the path extension
    pub detect_format: bool,
    pub aliases: HashMap<String, ParameterSet>,
}

impl SourceConfig {
    pub fn new(name: impl Into<String>, domains: impl Into<Domains>) -> Self {
        let name: String = name.into();
        SourceSettings::new(domains).to_source_config(&name)
    }

    pub fn scheme(&self) -> &'static str {
        if self.https {
            "https"
        } else {
            "http"
        }
    }

    /// Check the invariants a source must hold before it is used.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::NoDomains`] if the domain list is empty
    /// - [`ConfigurationError::ProxyWithoutSignKey`] if `web_proxy` is set
    ///   without a `sign_key`
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.domains.is_empty() {
            return Err(ConfigurationError::NoDomains(self.name.clone()));
        }
        if self.web_proxy && self.sign_key.is_none() {
            return Err(ConfigurationError::ProxyWithoutSignKey(self.name.clone()));
        }
        Ok(())
    }
}
