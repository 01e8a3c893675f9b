//! Shorthand constructors for the source-level failures.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use super::ConfigError;

/// Construct a [`ConfigError::SourceUnavailable`] for `path`.
pub(crate) fn source_unavailable(path: &Utf8Path, err: std::io::Error) -> Arc<ConfigError> {
    Arc::new(ConfigError::SourceUnavailable {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Construct a [`ConfigError::SourceUnparsable`] for `path`.
pub(crate) fn source_unparsable(
    path: &Utf8Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ConfigError> {
    Arc::new(ConfigError::SourceUnparsable {
        path: path.to_path_buf(),
        source: err.into(),
    })
}
