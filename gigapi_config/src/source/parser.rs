//! Format-specific parsing for configuration files.

use camino::Utf8Path;
use figment::Figment;
#[cfg(any(feature = "toml", feature = "json5"))]
use figment::providers::Format;
#[cfg(feature = "toml")]
use figment::providers::Toml;
#[cfg(feature = "json5")]
use figment_json5::Json5;

use crate::ConfigResult;
use crate::error::source_unparsable;

#[cfg(feature = "yaml")]
use super::yaml::SaphyrYaml;

/// Parse configuration data according to the file extension.
///
/// `.json`/`.json5` use JSON5, `.yaml`/`.yml` use YAML and anything else is
/// read as TOML. Each format is gated behind the cargo feature of the same
/// name.
///
/// # Errors
///
/// Returns [`crate::ConfigError::SourceUnparsable`] when the contents fail
/// to parse or the format's feature is disabled.
pub(super) fn parse_config_by_format(path: &Utf8Path, data: &str) -> ConfigResult<Figment> {
    let ext = path.extension().map(str::to_ascii_lowercase);
    let figment = match ext.as_deref() {
        Some("json" | "json5") => {
            #[cfg(feature = "json5")]
            {
                Figment::from(Json5::string(data))
            }
            #[cfg(not(feature = "json5"))]
            {
                return Err(source_unparsable(
                    path,
                    "json5 feature disabled: enable the 'json5' feature to read this file",
                ));
            }
        }
        Some("yaml" | "yml") => {
            #[cfg(feature = "yaml")]
            {
                Figment::from(SaphyrYaml::string(path, data))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(source_unparsable(
                    path,
                    "yaml feature disabled: enable the 'yaml' feature to read this file",
                ));
            }
        }
        _ => {
            #[cfg(feature = "toml")]
            {
                // Validate up front so the parse error carries this file's path.
                toml::from_str::<toml::Value>(data).map_err(|err| source_unparsable(path, err))?;
                Figment::from(Toml::string(data))
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(source_unparsable(
                    path,
                    "toml feature disabled: enable the 'toml' feature to read this file",
                ));
            }
        }
    };

    Ok(figment)
}
