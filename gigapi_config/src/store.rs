//! The frozen result of a resolution.

use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use crate::bind::Draft;
use crate::source::SourceOrigin;
use crate::{Config, ConfigError, ConfigResult, Provenance, ResolutionWarning};

static GLOBAL: OnceLock<ConfigStore> = OnceLock::new();

#[derive(Debug)]
struct Resolved {
    config: Config,
    provenance: Provenance,
    warnings: Vec<ResolutionWarning>,
    origin: SourceOrigin,
}

/// Read-only handle to a resolved configuration.
///
/// Cloning is cheap and every clone shares the same tree. The handle
/// dereferences to [`Config`], so fields read as `store.http.port`.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    inner: Arc<Resolved>,
}

impl ConfigStore {
    pub(crate) fn new(draft: Draft, origin: SourceOrigin) -> Self {
        let Draft {
            config,
            provenance,
            warnings,
        } = draft;
        Self {
            inner: Arc::new(Resolved {
                config,
                provenance,
                warnings,
                origin,
            }),
        }
    }

    /// The resolved tree.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Which source supplied each field and layer.
    #[must_use]
    pub fn provenance(&self) -> &Provenance {
        &self.inner.provenance
    }

    /// Problems encountered while resolving, in the order they were raised.
    #[must_use]
    pub fn warnings(&self) -> &[ResolutionWarning] {
        &self.inner.warnings
    }

    /// Sources the tree was resolved from.
    #[must_use]
    pub fn origin(&self) -> &SourceOrigin {
        &self.inner.origin
    }

    /// Render the tree as pretty-printed JSON with secrets omitted.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self.config())
    }

    /// Make this store the process-wide configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyInitialised`] when a store has already
    /// been installed; the installed store is left unchanged.
    pub fn install(self) -> ConfigResult<&'static Self> {
        let mut installed = false;
        let store = GLOBAL.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            Ok(store)
        } else {
            Err(Arc::new(ConfigError::AlreadyInitialised))
        }
    }

    /// The process-wide configuration, once installed.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }
}

impl Deref for ConfigStore {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        self.config()
    }
}
