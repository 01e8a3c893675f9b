//! Entry points wiring the resolution pipeline together.

use camino::Utf8Path;
use tracing::Level;

use crate::bind::bind;
use crate::defaults::{apply_floors, fill_defaults};
use crate::layers::build_layers;
use crate::schema::CONFIG_FIELDS;
use crate::source::{EnvSnapshot, RawSource};
use crate::{ConfigResult, ConfigStore};

/// Runs the resolution pipeline against a chosen environment.
///
/// ```rust
/// use gigapi_config::Resolver;
/// use gigapi_config::source::EnvSnapshot;
///
/// let env: EnvSnapshot = [("HTTP_PORT", "9000")].into_iter().collect();
/// let store = Resolver::new().with_env(env).resolve(None)?;
/// assert_eq!(store.http.port, 9000);
/// # Ok::<(), std::sync::Arc<gigapi_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    env: Option<EnvSnapshot>,
}

impl Resolver {
    /// A resolver reading the process environment.
    #[must_use]
    pub const fn new() -> Self {
        Self { env: None }
    }

    /// Use `env` instead of capturing the process environment.
    #[must_use]
    pub fn with_env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Resolve from the file at `path`, if any, and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::SourceUnavailable`] or
    /// [`crate::ConfigError::SourceUnparsable`] when `path` names a file that
    /// cannot be read or parsed. Problems with individual values are
    /// reported through [`ConfigStore::warnings`] instead.
    pub fn resolve(self, path: Option<&Utf8Path>) -> ConfigResult<ConfigStore> {
        let env = self.env.unwrap_or_else(EnvSnapshot::capture);
        let raw = RawSource::load(path, env)?;

        let mut draft = bind(&raw, CONFIG_FIELDS);
        fill_defaults(&mut draft, CONFIG_FIELDS);
        apply_floors(&mut draft);
        build_layers(&mut draft, raw.env());

        let store = ConfigStore::new(draft, raw.origin().clone());
        if tracing::enabled!(Level::DEBUG) {
            let rendered = store
                .to_json()
                .unwrap_or_else(|err| format!("<unrenderable: {err}>"));
            tracing::debug!(
                origin = %store.origin(),
                warnings = store.warnings().len(),
                config = %rendered,
                "resolved configuration"
            );
        }
        Ok(store)
    }
}

/// Resolve the configuration from `path` and the process environment.
///
/// An empty `path` selects environment-only mode.
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve(path: &str) -> ConfigResult<ConfigStore> {
    let file = (!path.is_empty()).then(|| Utf8Path::new(path));
    Resolver::new().resolve(file)
}

/// Resolve the configuration and install it as the process-wide store.
///
/// # Errors
///
/// Propagates [`resolve`] failures and returns
/// [`crate::ConfigError::AlreadyInitialised`] when called more than once.
pub fn init_config(path: &str) -> ConfigResult<&'static ConfigStore> {
    resolve(path)?.install()
}
