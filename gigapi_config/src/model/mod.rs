//! The typed configuration tree handed to the rest of the service.
//!
//! [`Default`] on these types yields the zero-valued tree the binder starts
//! from, not the declared defaults; those live in [`crate::schema`].

mod layer;

use std::fmt;

use serde::Serialize;

pub use layer::{Layer, LayerAuth, LayerKind};

/// Root of the resolved configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Config {
    /// Storage engine settings.
    pub gigapi: GigapiConfig,
    /// HTTP server settings shared by the reader and writer.
    pub http: HttpConfig,
    /// FlightSQL server settings.
    pub flightsql: FlightSqlConfig,
    /// Log level (debug, info, warn, error, fatal).
    pub loglevel: String,
}

/// Settings for the storage engine itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GigapiConfig {
    /// Root folder for all data files.
    pub root: String,
    /// Base timeout between merges, in seconds.
    pub merge_timeout_s: i64,
    /// Timeout before new data is saved to disk, in seconds. Never zero once
    /// resolved.
    pub save_timeout_s: f64,
    /// Disables background merging.
    pub no_merges: bool,
    /// Enables the querier UI.
    pub ui: bool,
    /// Execution mode (readonly, writeonly, compaction, aio).
    pub mode: String,
    /// Metadata index storage.
    pub metadata: MetadataConfig,
    /// Ordered storage tiers. Never empty once resolved.
    pub layers: Vec<Layer>,
}

/// Where the metadata index is kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetadataConfig {
    /// Storage type (`json` or `redis`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Redis URL when `kind` is `redis`, e.g. `redis://localhost:6379/0`.
    pub url: String,
}

/// HTTP listener settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HttpConfig {
    /// Port to listen on.
    pub port: i64,
    /// Host to bind to (`0.0.0.0` for all interfaces).
    pub host: String,
    /// Optional basic authentication.
    pub basic_auth: BasicAuth,
}

/// Basic authentication credentials for the HTTP listener.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicAuth {
    /// User name; empty disables basic authentication.
    pub username: String,
    /// Password. Excluded from `Debug` output and serialized dumps.
    #[serde(skip_serializing)]
    pub password: String,
}

impl BasicAuth {
    /// Returns `true` when a user name has been configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.username.is_empty()
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

/// FlightSQL listener settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FlightSqlConfig {
    /// Port to run the FlightSQL server on.
    pub port: i64,
    /// Enables the FlightSQL server.
    pub enable: bool,
}

/// Placeholder rendered in place of secret values.
pub(crate) const fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}
