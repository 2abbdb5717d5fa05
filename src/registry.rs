// Source registry
//
// Holds the normalized sources as an immutable snapshot behind an ArcSwap.
// Readers load the current snapshot lock-free; a reload builds a complete new
// snapshot and swaps it in, so concurrent callers never observe a partially
// updated configuration.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::{Settings, SourceConfig};
use crate::error::ConfigurationError;

/// Immutable view of every configured source
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    sources: HashMap<String, Arc<SourceConfig>>,
    generation: u64,
}

impl RegistrySnapshot {
    pub fn from_settings(settings: &Settings, generation: u64) -> Self {
        let sources = settings
            .normalize()
            .into_iter()
            .map(|source| (source.name.clone(), Arc::new(source)))
            .collect();
        Self {
            sources,
            generation,
        }
    }

    /// Version of the configuration, incremented on every reload
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn source_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a source by name and check it is usable.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::NotConfigured`] if no source is configured
    /// - [`ConfigurationError::SourceNotFound`] if `name` is unknown
    /// - any error from [`SourceConfig::validate`]
    pub fn resolve(&self, name: &str) -> Result<Arc<SourceConfig>, ConfigurationError> {
        if self.is_empty() {
            return Err(ConfigurationError::NotConfigured);
        }

        let source = self
            .sources
            .get(name)
            .ok_or_else(|| ConfigurationError::SourceNotFound(name.to_string()))?;

        source.validate()?;
        Ok(Arc::clone(source))
    }
}

/// Process-wide, read-mostly registry of sources
pub struct SourceRegistry {
    snapshot: ArcSwap<RegistrySnapshot>,
}

impl SourceRegistry {
    pub fn new(settings: &Settings) -> Self {
        let snapshot = RegistrySnapshot::from_settings(settings, 0);
        tracing::debug!(
            sources = ?snapshot.source_names(),
            "Source registry initialized"
        );
        Self {
            snapshot: ArcSwap::from_pointee(snapshot),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let settings = Settings::from_file(path)?;
        Ok(Self::new(&settings))
    }

    /// Current snapshot; stays valid even if a reload happens meanwhile
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snapshot.load_full()
    }

    pub fn generation(&self) -> u64 {
        self.snapshot.load().generation()
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<SourceConfig>, ConfigurationError> {
        self.snapshot.load().resolve(name)
    }

    /// Replace the configuration with a fresh snapshot built from `settings`
    pub fn reload(&self, settings: &Settings) {
        let fresh = RegistrySnapshot::from_settings(settings, 0);

        let mut installed = None;
        self.snapshot.rcu(|current| {
            let snapshot = Arc::new(RegistrySnapshot {
                sources: fresh.sources.clone(),
                generation: current.generation + 1,
            });
            installed = Some(Arc::clone(&snapshot));
            snapshot
        });

        if let Some(snapshot) = installed {
            tracing::info!(
                generation = snapshot.generation,
                sources = ?snapshot.source_names(),
                "Source registry reloaded"
            );
        }
    }

    /// Reload from a settings file; the current snapshot is kept if loading fails
    pub fn reload_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigurationError> {
        let settings = Settings::from_file(path).map_err(|e| {
            tracing::warn!(error = %e, "Settings reload failed, keeping current configuration");
            e
        })?;
        self.reload(&settings);
        Ok(())
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("snapshot", &self.snapshot.load_full())
            .finish()
    }
}
