//! Compile-time schema: one descriptor per leaf field.
//!
//! Each [`FieldSpec`] pairs a dotted key with the field's [`FieldKind`], its
//! declared default literal and an accessor yielding a typed [`FieldSlot`].
//! The binder, default filler and layer builder all walk these tables, so a
//! field is declared exactly once.

mod fields;
mod layer;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::LayerKind;
use crate::duration::parse_duration;

pub use fields::{CONFIG_FIELDS, SAVE_TIMEOUT_KEY};
pub use layer::{
    LAYER_FIELDS, LAYER_NAME_KEY, LAYERS_KEY, layer_env_var, layer_file_key, layer_file_prefix,
};

/// Semantic type of a leaf field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum FieldKind {
    /// Text, passed through unchanged.
    Str,
    /// Signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// `true` only for the exact text `true`.
    Bool,
    /// Compact duration, see [`crate::duration`].
    Duration,
    /// Storage layer type name.
    LayerKind,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "string",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Bool => "boolean",
            Self::Duration => "duration",
            Self::LayerKind => "layer type",
        })
    }
}

/// Text that does not parse as the field's kind.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("expected {expected}: {reason}")]
pub struct CoercionError {
    /// Kind the field expects.
    pub expected: FieldKind,
    /// Parser message.
    pub reason: String,
}

impl CoercionError {
    fn new(expected: FieldKind, reason: impl fmt::Display) -> Self {
        Self {
            expected,
            reason: reason.to_string(),
        }
    }
}

/// Mutable view of one leaf field.
#[derive(Debug)]
pub enum FieldSlot<'a> {
    /// A string field.
    Str(&'a mut String),
    /// An integer field.
    Int(&'a mut i64),
    /// A floating-point field.
    Float(&'a mut f64),
    /// A boolean field.
    Bool(&'a mut bool),
    /// A duration field.
    Duration(&'a mut Duration),
    /// A layer type field.
    LayerKind(&'a mut LayerKind),
}

impl FieldSlot<'_> {
    /// Kind of the underlying field.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Str(_) => FieldKind::Str,
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::Bool(_) => FieldKind::Bool,
            Self::Duration(_) => FieldKind::Duration,
            Self::LayerKind(_) => FieldKind::LayerKind,
        }
    }

    /// Returns `true` when the field holds its type's zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Str(value) => value.is_empty(),
            Self::Int(value) => **value == 0,
            Self::Float(value) => **value == 0.0,
            Self::Bool(value) => !**value,
            Self::Duration(value) => value.is_zero(),
            Self::LayerKind(value) => **value == LayerKind::Unspecified,
        }
    }

    /// Coerce `text` to the field's kind and store it.
    ///
    /// Booleans never fail: anything other than `true` is `false`. On
    /// failure the field is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when `text` is not a valid integer, float
    /// or duration.
    pub fn assign(self, text: &str) -> Result<(), CoercionError> {
        match self {
            Self::Str(value) => text.clone_into(value),
            Self::Int(value) => {
                *value = text
                    .trim()
                    .parse()
                    .map_err(|err| CoercionError::new(FieldKind::Int, err))?;
            }
            Self::Float(value) => {
                let parsed: f64 = text
                    .trim()
                    .parse()
                    .map_err(|err| CoercionError::new(FieldKind::Float, err))?;
                if !parsed.is_finite() {
                    return Err(CoercionError::new(FieldKind::Float, "value is not finite"));
                }
                *value = parsed;
            }
            Self::Bool(value) => *value = text == "true",
            Self::Duration(value) => {
                *value = parse_duration(text)
                    .map_err(|err| CoercionError::new(FieldKind::Duration, err))?;
            }
            Self::LayerKind(value) => *value = LayerKind::parse(text),
        }
        Ok(())
    }
}

/// Descriptor of one leaf field of record type `T`.
pub struct FieldSpec<T> {
    /// Dotted key relative to the record (`http.basic_auth.username`).
    pub key: &'static str,
    /// Kind of the field.
    pub kind: FieldKind,
    /// Declared default in environment-variable text form.
    pub default: Option<&'static str>,
    /// Accessor for the field inside a record.
    pub slot: for<'a> fn(&'a mut T) -> FieldSlot<'a>,
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Environment variable name for a dotted key: `.` becomes `_` and letters
/// are uppercased.
#[must_use]
pub fn env_var_for(key: &str) -> String {
    key.replace('.', "_").to_ascii_uppercase()
}
