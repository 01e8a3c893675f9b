//! Non-fatal problems found while resolving configuration.

use thiserror::Error;

use crate::Source;
use crate::schema::FieldKind;

/// A value that could not be applied as written.
///
/// Warnings never abort resolution. Each one is logged when raised and kept
/// on the resolved [`crate::ConfigStore`] for later inspection.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ResolutionWarning {
    /// A supplied value does not parse as its field's kind; the field falls
    /// back to its default.
    #[error("ignoring {origin} value '{value}' for '{key}': expected {expected}")]
    FieldCoercion {
        /// Dotted key or environment variable name.
        key: String,
        /// Text that failed to parse.
        value: String,
        /// Kind the field expects.
        expected: FieldKind,
        /// Where the text came from.
        origin: Source,
    },
    /// A declared default does not parse as its field's kind; the field stays
    /// at its zero value.
    #[error("declared default '{default}' for '{key}' is not a valid {expected}")]
    DefaultCoercion {
        /// Dotted key of the field.
        key: &'static str,
        /// The malformed default literal.
        default: &'static str,
        /// Kind the field expects.
        expected: FieldKind,
    },
    /// A zero or negative value was raised to the field's minimum.
    #[error("'{key}' must be positive; using {floor}")]
    Floored {
        /// Dotted key of the field.
        key: &'static str,
        /// Minimum value applied.
        floor: f64,
    },
}

impl ResolutionWarning {
    /// Log the warning and append it to `sink`.
    pub(crate) fn raise(self, sink: &mut Vec<Self>) {
        tracing::warn!(warning = %self, "configuration warning");
        sink.push(self);
    }
}
