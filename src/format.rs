//! Output format detection
//!
//! Infers the `fm` parameter from the path's file extension. Image bytes are
//! never inspected. Detection only runs when the source enables it and the
//! fully merged parameter set carries no `fm` yet, so an explicit or
//! alias-provided format always wins.

use std::path::Path;

use crate::config::SourceConfig;
use crate::constants::FORMAT_PARAM;
use crate::params::ParameterSet;

/// Map a file extension (case-insensitive) to an `fm` value
pub fn format_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("jpg"),
        "png" => Some("png"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}

/// Extension of the last path segment, ignoring any query or fragment
fn extension_of(path: &str) -> Option<&str> {
    let path = path.split(|c| c == '?' || c == '#').next().unwrap_or(path);
    Path::new(path).extension().and_then(|ext| ext.to_str())
}

/// Add `fm` to `params` when the source asks for detection
pub fn detect_format(path: &str, mut params: ParameterSet, source: &SourceConfig) -> ParameterSet {
    if !source.detect_format || params.contains_key(FORMAT_PARAM) {
        return params;
    }

    if let Some(format) = extension_of(path).and_then(format_for_extension) {
        tracing::debug!(path = %path, format = %format, "Detected output format");
        params.insert(FORMAT_PARAM, format);
    }

    params
}
