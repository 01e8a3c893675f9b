//! Primary error enum for configuration resolution.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Fatal failures that abort configuration resolution.
///
/// Per-field coercion problems are not errors; they surface as
/// [`crate::ResolutionWarning`] values on the resolved store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration file was named but could not be read.
    #[error("configuration file '{path}' is unavailable: {source}")]
    SourceUnavailable {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was read but its contents are malformed.
    #[error("configuration file '{path}' could not be parsed: {source}")]
    SourceUnparsable {
        /// Path whose contents failed to parse.
        path: Utf8PathBuf,
        /// Underlying parser failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The process-wide store was initialised more than once.
    #[error("configuration has already been initialised for this process")]
    AlreadyInitialised,
}
