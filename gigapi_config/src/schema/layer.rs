//! Field table for [`Layer`] entries and their indexed key families.

use crate::{ENV_NAMESPACE, Layer};

use super::{FieldKind, FieldSlot, FieldSpec, env_var_for};

/// Dotted file key of the layer array.
pub const LAYERS_KEY: &str = "gigapi.layers";

/// Key whose absence ends layer discovery.
pub const LAYER_NAME_KEY: &str = "name";

/// Every leaf of a [`Layer`]. Keys are relative to the layer.
///
/// Layers carry no declared defaults: an absent field stays at its zero
/// value, and a zero TTL means the layer keeps data forever.
pub static LAYER_FIELDS: &[FieldSpec<Layer>] = &[
    FieldSpec {
        key: LAYER_NAME_KEY,
        kind: FieldKind::Str,
        default: None,
        slot: |l| FieldSlot::Str(&mut l.name),
    },
    FieldSpec {
        key: "type",
        kind: FieldKind::LayerKind,
        default: None,
        slot: |l| FieldSlot::LayerKind(&mut l.kind),
    },
    FieldSpec {
        key: "global",
        kind: FieldKind::Bool,
        default: None,
        slot: |l| FieldSlot::Bool(&mut l.global),
    },
    FieldSpec {
        key: "url",
        kind: FieldKind::Str,
        default: None,
        slot: |l| FieldSlot::Str(&mut l.url),
    },
    FieldSpec {
        key: "auth.key",
        kind: FieldKind::Str,
        default: None,
        slot: |l| FieldSlot::Str(&mut l.auth.key),
    },
    FieldSpec {
        key: "auth.secret",
        kind: FieldKind::Str,
        default: None,
        slot: |l| FieldSlot::Str(&mut l.auth.secret),
    },
    FieldSpec {
        key: "ttl",
        kind: FieldKind::Duration,
        default: None,
        slot: |l| FieldSlot::Duration(&mut l.ttl),
    },
];

/// Dotted file-key prefix shared by every field of layer `index`.
#[must_use]
pub fn layer_file_prefix(index: usize) -> String {
    format!("{LAYERS_KEY}.{index}.")
}

/// Dotted file key of `field` in layer `index` (`gigapi.layers.0.url`).
#[must_use]
pub fn layer_file_key(index: usize, field: &FieldSpec<Layer>) -> String {
    format!("{}{}", layer_file_prefix(index), field.key)
}

/// Environment variable of `field` in layer `index`
/// (`GIGAPI_LAYERS_0_AUTH_KEY`).
#[must_use]
pub fn layer_env_var(index: usize, field: &FieldSpec<Layer>) -> String {
    format!("{ENV_NAMESPACE}_LAYERS_{index}_{}", env_var_for(field.key))
}
