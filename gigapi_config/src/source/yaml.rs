//! YAML provider backed by `serde-saphyr`.

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Map, Value as FigmentValue},
};
use serde_saphyr::Options;

/// Figment provider for in-memory YAML documents.
///
/// Booleans follow YAML 1.2, so `yes` and `on` stay strings rather than
/// turning into `true`.
#[derive(Debug, Clone)]
pub struct SaphyrYaml {
    path: Utf8PathBuf,
    contents: String,
}

impl SaphyrYaml {
    /// A provider for `contents`, reporting errors against `path`.
    #[must_use]
    pub fn string(path: impl AsRef<Utf8Path>, contents: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            contents: contents.into(),
        }
    }

    fn parse_value(&self) -> Result<FigmentValue, serde_saphyr::Error> {
        serde_saphyr::from_str_with_options(
            &self.contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
    }
}

impl Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::from("Saphyr YAML", self.path.as_std_path())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let value = self.parse_value().map_err(|err| {
            figment::Error::from(Kind::Message(format!(
                "failed to parse {}: {err}",
                self.path
            )))
        })?;
        // A document without content, such as one holding only comments,
        // is an empty table.
        if matches!(value, FigmentValue::Empty(..)) {
            return Ok(Profile::Default.collect(Dict::new()));
        }
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}
