// imgix-resolve library
//
// Resolves logical image paths plus alias presets and call-site parameters
// into (optionally signed) imgix delivery URLs.

pub mod alias;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod logging;
pub mod params;
pub mod registry;
pub mod resolver;
pub mod shard;
pub mod url;

pub use config::{Settings, SourceConfig, SourceSettings};
pub use error::ConfigurationError;
pub use params::{ParamValue, ParameterSet};
pub use registry::SourceRegistry;
pub use resolver::{ResolutionRequest, UrlResolver};
pub use shard::{DomainSelector, FixedSelector, RandomSelector};
