//! Binding of raw source values onto the schema tables.
//!
//! The binder only copies what a source supplied. Fields nobody supplied
//! stay at their zero value for [`crate::defaults`] to complete, and keys
//! outside the schema are ignored.

use crate::schema::{FieldSpec, LAYER_FIELDS, LAYERS_KEY, layer_file_key};
use crate::source::{RawSource, RawValue};
use crate::{Config, Layer, Provenance, ResolutionWarning, Source};

/// A configuration tree part-way through resolution.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    /// The tree, zero wherever nothing has been applied yet.
    pub config: Config,
    /// Origins recorded so far.
    pub provenance: Provenance,
    /// Warnings raised so far.
    pub warnings: Vec<ResolutionWarning>,
}

/// Bind every field in `fields` from `raw`, then bind the file's layer
/// entries.
#[must_use]
pub fn bind(raw: &RawSource, fields: &[FieldSpec<Config>]) -> Draft {
    let mut draft = Draft::default();
    for field in fields {
        let Some(value) = raw.lookup(field.key) else {
            continue;
        };
        if apply_value(&mut draft.config, field, &value, &mut draft.warnings) {
            draft.provenance.record_field(field.key, value.source);
        }
    }
    bind_file_layers(raw, &mut draft);
    draft
}

/// Coerce `value` into `field` of `record`.
///
/// Returns `false`, leaving the field untouched and raising a warning, when
/// the text does not parse.
pub(crate) fn apply_value<T>(
    record: &mut T,
    field: &FieldSpec<T>,
    value: &RawValue<'_>,
    warnings: &mut Vec<ResolutionWarning>,
) -> bool {
    match (field.slot)(record).assign(value.text) {
        Ok(()) => true,
        Err(err) => {
            ResolutionWarning::FieldCoercion {
                key: value.location.clone(),
                value: value.text.to_owned(),
                expected: err.expected,
                origin: value.source,
            }
            .raise(warnings);
            false
        }
    }
}

/// Bind every element of the file's `gigapi.layers` array in index order.
///
/// An element without values still takes its position as a zero layer.
fn bind_file_layers(raw: &RawSource, draft: &mut Draft) {
    for index in 0..raw.file_array_len(LAYERS_KEY).unwrap_or(0) {
        let mut layer = Layer::default();
        for field in LAYER_FIELDS {
            let key = layer_file_key(index, field);
            let Some(text) = raw.file_value(&key) else {
                continue;
            };
            let value = RawValue {
                text,
                source: Source::File,
                location: key,
            };
            apply_value(&mut layer, field, &value, &mut draft.warnings);
        }
        draft.config.gigapi.layers.push(layer);
        draft.provenance.record_layer(index, Source::File);
    }
}
