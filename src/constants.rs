// Constants module - centralized names and defaults for URL resolution
//
// This module defines the parameter names and configuration defaults used
// throughout the codebase. Keeping them in one place makes the wire format
// (query keys) easy to audit.

// =============================================================================
// Source defaults
// =============================================================================

/// Name of the default (unnamed) source
pub const DEFAULT_SOURCE_NAME: &str = "";

/// Sources use https unless configured otherwise
pub const DEFAULT_HTTPS: bool = true;

/// Sources are plain (non-proxy) unless configured otherwise
pub const DEFAULT_WEB_PROXY: bool = false;

/// Format detection is opt-in
pub const DEFAULT_DETECT_FORMAT: bool = false;

// =============================================================================
// Query parameter names
// =============================================================================

/// Signature parameter appended to signed URLs
pub const SIGNATURE_PARAM: &str = "s";

/// Output format parameter
pub const FORMAT_PARAM: &str = "fm";

/// Width parameter
pub const WIDTH_PARAM: &str = "w";

/// Height parameter
pub const HEIGHT_PARAM: &str = "h";

/// Combined `<width>x<height>` shorthand, expanded before serialization
pub const WH_PARAM: &str = "wh";

// =============================================================================
// Logging defaults
// =============================================================================

/// Filter directive used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";
