// Alias resolution
//
// An alias is a named preset of rendering parameters. Call-site overrides
// always win over alias-defined values; the alias fills in the rest.

use crate::config::SourceConfig;
use crate::error::ConfigurationError;
use crate::params::ParameterSet;

/// Merge the named alias of `source` under `overrides`.
///
/// Without an alias the overrides are returned unchanged.
///
/// # Errors
///
/// - [`ConfigurationError::NoAliases`] if the source has no alias table
/// - [`ConfigurationError::AliasNotFound`] if `alias` is not in the table
pub fn resolve_alias(
    alias: Option<&str>,
    source: &SourceConfig,
    overrides: ParameterSet,
) -> Result<ParameterSet, ConfigurationError> {
    let Some(alias) = alias else {
        return Ok(overrides);
    };

    if source.aliases.is_empty() {
        return Err(ConfigurationError::NoAliases(source.name.clone()));
    }

    let preset = source
        .aliases
        .get(alias)
        .ok_or_else(|| ConfigurationError::AliasNotFound {
            alias: alias.to_string(),
            source_name: source.name.clone(),
        })?;

    tracing::debug!(
        alias = %alias,
        source = %source.name,
        preset_params = preset.len(),
        override_params = overrides.len(),
        "Merging alias preset"
    );

    let mut merged = preset.clone();
    merged.merge(&overrides);
    Ok(merged)
}
