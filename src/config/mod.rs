// Configuration module
//
// Settings are read once into an immutable `Settings` value and normalized
// into a list of `SourceConfig`s. Two shapes are accepted:
//
// - Legacy: top-level `domains`, `https`, `sign_key`, `web_proxy_source`,
//   `detect_format` and `aliases` keys describe the default source.
// - Sources: a `sources:` table keyed by source name ("" is the default).

pub mod source;

pub use source::{Domains, SourceConfig, SourceSettings};

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DETECT_FORMAT, DEFAULT_HTTPS, DEFAULT_SOURCE_NAME, DEFAULT_WEB_PROXY,
};
use crate::error::ConfigurationError;
use crate::params::ParameterSet;

fn default_https() -> bool {
    DEFAULT_HTTPS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Domains>,
    #[serde(default = "default_https")]
    pub https: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_key: Option<String>,
    #[serde(default)]
    pub web_proxy_source: bool,
    #[serde(default)]
    pub detect_format: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<HashMap<String, ParameterSet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<HashMap<String, SourceSettings>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            domains: None,
            https: DEFAULT_HTTPS,
            sign_key: None,
            web_proxy_source: DEFAULT_WEB_PROXY,
            detect_format: DEFAULT_DETECT_FORMAT,
            aliases: None,
            sources: None,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings, replacing `${VAR_NAME}` inside string values with
    /// environment variables.
    ///
    /// Substitution happens on the parsed document, so a value containing
    /// YAML syntax (`#`, quotes, colons) is taken literally. Substituted
    /// values are always strings.
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigurationError> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigurationError::settings(e.to_string()))?;

        // An empty document means "nothing configured", not a parse error
        if yaml.trim().is_empty() {
            return Ok(Settings::default());
        }

        let mut document: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ConfigurationError::settings(e.to_string()))?;
        if document.is_null() {
            return Ok(Settings::default());
        }

        substitute_env(&mut document, &re)?;

        serde_yaml::from_value(document).map_err(|e| ConfigurationError::settings(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::settings(format!("Failed to read settings file: {}", e))
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn with_domains(mut self, domains: impl Into<Domains>) -> Self {
        self.domains = Some(domains.into());
        self
    }

    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn with_sign_key(mut self, sign_key: impl Into<String>) -> Self {
        self.sign_key = Some(sign_key.into());
        self
    }

    pub fn with_web_proxy_source(mut self, web_proxy: bool) -> Self {
        self.web_proxy_source = web_proxy;
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

    pub fn with_source(mut self, name: impl Into<String>, source: SourceSettings) -> Self {
        self.sources
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), source);
        self
    }

    fn has_legacy_config(&self) -> bool {
        self.domains.is_some()
            || self.sign_key.is_some()
            || self.aliases.is_some()
            || self.web_proxy_source
            || self.detect_format
    }

    /// Normalize both settings shapes into a uniform list of sources.
    ///
    /// When a non-empty `sources` table is present it is authoritative and the
    /// legacy keys are ignored. Settings that configure nothing yield an
    /// empty list.
    pub fn normalize(&self) -> Vec<SourceConfig> {
        if let Some(sources) = self.sources.as_ref().filter(|sources| !sources.is_empty()) {
            if self.has_legacy_config() {
                tracing::warn!(
                    sources = sources.len(),
                    "Both sources and legacy top-level keys are set; legacy keys are ignored"
                );
            }
            let mut configs: Vec<SourceConfig> = sources
                .iter()
                .map(|(name, source)| source.to_source_config(name))
                .collect();
            configs.sort_by(|a, b| a.name.cmp(&b.name));
            return configs;
        }

        let Some(domains) = &self.domains else {
            return Vec::new();
        };

        vec![SourceConfig {
            name: DEFAULT_SOURCE_NAME.to_string(),
            domains: domains.to_vec(),
            https: self.https,
            sign_key: source::non_empty(self.sign_key.as_deref()),
            web_proxy: self.web_proxy_source,
            detect_format: self.detect_format,
            aliases: self.aliases.clone().unwrap_or_default(),
        }]
    }
}

/// Replace `${VAR_NAME}` references in every string scalar of `value`
fn substitute_env(value: &mut serde_yaml::Value, re: &Regex) -> Result<(), ConfigurationError> {
    match value {
        serde_yaml::Value::String(text) => {
            if re.is_match(text) {
                *text = expand_env(text, re)?;
            }
        }
        serde_yaml::Value::Sequence(items) => {
            for item in items {
                substitute_env(item, re)?;
            }
        }
        serde_yaml::Value::Mapping(mapping) => {
            for item in mapping.values_mut() {
                substitute_env(item, re)?;
            }
        }
        serde_yaml::Value::Tagged(tagged) => substitute_env(&mut tagged.value, re)?,
        _ => {}
    }
    Ok(())
}

fn expand_env(text: &str, re: &Regex) -> Result<String, ConfigurationError> {
    let mut expanded = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let var_name = &caps[1];
        let value = std::env::var(var_name).map_err(|_| {
            ConfigurationError::settings(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            ))
        })?;
        expanded.push_str(&text[last..whole.start()]);
        expanded.push_str(&value);
        last = whole.end();
    }
    expanded.push_str(&text[last..]);
    Ok(expanded)
}
