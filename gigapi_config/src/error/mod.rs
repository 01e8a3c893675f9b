//! Error types produced while resolving configuration.

mod constructors;
mod types;

pub use types::ConfigError;

pub(crate) use constructors::{source_unavailable, source_unparsable};

/// Result alias used by every fallible resolution step.
///
/// Errors are shared behind an [`std::sync::Arc`] so a failed resolution can
/// be reported by the host and inspected by tests without cloning sources.
pub type ConfigResult<T> = Result<T, std::sync::Arc<ConfigError>>;
