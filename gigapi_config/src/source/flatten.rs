//! Flattening of parsed documents into dotted keys.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// A document reduced to dotted scalar keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct Flattened {
    /// Scalar text by dotted path.
    pub(super) values: BTreeMap<String, String>,
    /// Element count of every array by dotted path, including arrays whose
    /// elements hold no scalars.
    pub(super) arrays: BTreeMap<String, usize>,
}

/// Write every scalar in `value` into `out` under its dotted path.
///
/// Table keys are lowercased, array elements contribute their index and
/// nulls are skipped so they read as absent.
pub(super) fn flatten_into(value: &JsonValue, prefix: &str, out: &mut Flattened) {
    match value {
        JsonValue::Object(map) => {
            for (key, inner) in map {
                flatten_into(inner, &join(prefix, &key.to_lowercase()), out);
            }
        }
        JsonValue::Array(items) => {
            out.arrays.insert(prefix.to_owned(), items.len());
            for (index, inner) in items.iter().enumerate() {
                flatten_into(inner, &join(prefix, &index.to_string()), out);
            }
        }
        JsonValue::String(text) => {
            out.values.insert(prefix.to_owned(), text.clone());
        }
        JsonValue::Number(number) => {
            out.values.insert(prefix.to_owned(), number.to_string());
        }
        JsonValue::Bool(flag) => {
            out.values.insert(prefix.to_owned(), flag.to_string());
        }
        JsonValue::Null => {}
    }
}
