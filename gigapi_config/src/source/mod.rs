//! Raw configuration sources: an optional file plus the environment.
//!
//! Nothing here knows about field types. The file is flattened into dotted
//! keys (`gigapi.layers.0.url`) and the environment is captured as a
//! snapshot of literal variable names. [`RawSource::lookup`] applies the
//! precedence rule: an environment variable beats the file value for the
//! same key.

mod env;
mod flatten;
mod parser;
#[cfg(feature = "yaml")]
mod yaml;

use std::collections::BTreeMap;
use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value as JsonValue;

use crate::error::{source_unavailable, source_unparsable};
use crate::schema::env_var_for;
use crate::{ConfigResult, Source};
use flatten::Flattened;

pub use env::EnvSnapshot;
#[cfg(feature = "yaml")]
pub use yaml::SaphyrYaml;

/// Which sources contributed to a resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SourceOrigin {
    /// A configuration file plus the environment.
    File(Utf8PathBuf),
    /// The environment alone.
    EnvironmentOnly,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file '{path}' and environment"),
            Self::EnvironmentOnly => f.write_str("environment only"),
        }
    }
}

/// A raw text value and where it was found.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawValue<'a> {
    /// The text as supplied.
    pub text: &'a str,
    /// The source that supplied it.
    pub source: Source,
    /// Dotted file key or environment variable name, for diagnostics.
    pub location: String,
}

/// File values and the environment snapshot, prior to typing.
#[derive(Clone, Debug)]
pub struct RawSource {
    origin: SourceOrigin,
    file: Flattened,
    env: EnvSnapshot,
}

impl RawSource {
    /// Load the file at `path`, if any, alongside `env`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::SourceUnavailable`] when the file cannot
    /// be read and [`crate::ConfigError::SourceUnparsable`] when its contents
    /// are malformed or not a table.
    pub fn load(path: Option<&Utf8Path>, env: EnvSnapshot) -> ConfigResult<Self> {
        let Some(path) = path else {
            tracing::info!("using environment variables for configuration");
            return Ok(Self::from_env(env));
        };
        let file = load_file(path)?;
        tracing::info!(path = %path, keys = file.values.len(), "using configuration file");
        Ok(Self {
            origin: SourceOrigin::File(path.to_path_buf()),
            file,
            env,
        })
    }

    /// A source backed by the environment alone.
    #[must_use]
    pub const fn from_env(env: EnvSnapshot) -> Self {
        Self {
            origin: SourceOrigin::EnvironmentOnly,
            file: Flattened {
                values: BTreeMap::new(),
                arrays: BTreeMap::new(),
            },
            env,
        }
    }

    /// Which sources were used.
    #[must_use]
    pub const fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    /// The captured environment.
    #[must_use]
    pub const fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    /// Value for the dotted `key`, preferring the environment.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<RawValue<'_>> {
        let name = env_var_for(key);
        if let Some(text) = self.env.get(&name) {
            return Some(RawValue {
                text,
                source: Source::Environment,
                location: name,
            });
        }
        self.file_value(key).map(|text| RawValue {
            text,
            source: Source::File,
            location: key.to_owned(),
        })
    }

    /// Value for the dotted `key` from the file alone.
    #[must_use]
    pub fn file_value(&self, key: &str) -> Option<&str> {
        self.file.values.get(key).map(String::as_str)
    }

    /// Number of elements in the file's array at the dotted `key`, counting
    /// elements that hold no values.
    #[must_use]
    pub fn file_array_len(&self, key: &str) -> Option<usize> {
        self.file.arrays.get(key).copied()
    }
}

fn load_file(path: &Utf8Path) -> ConfigResult<Flattened> {
    let data = std::fs::read_to_string(path).map_err(|err| source_unavailable(path, err))?;
    let figment = parser::parse_config_by_format(path, &data)?;
    let document: JsonValue = figment
        .extract()
        .map_err(|err| source_unparsable(path, err))?;
    if !document.is_object() {
        return Err(source_unparsable(
            path,
            "expected a table at the top level of the document",
        ));
    }
    let mut file = Flattened::default();
    flatten::flatten_into(&document, "", &mut file);
    Ok(file)
}
