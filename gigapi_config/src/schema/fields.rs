//! Field table for the root [`Config`] record.

use crate::Config;

use super::{FieldKind, FieldSlot, FieldSpec};

/// Key of the save interval, floored after defaults are applied.
pub const SAVE_TIMEOUT_KEY: &str = "gigapi.save_timeout_s";

/// Every scalar leaf of [`Config`]. The layer list is described separately
/// by [`super::LAYER_FIELDS`].
pub static CONFIG_FIELDS: &[FieldSpec<Config>] = &[
    FieldSpec {
        key: "gigapi.root",
        kind: FieldKind::Str,
        default: None,
        slot: |c| FieldSlot::Str(&mut c.gigapi.root),
    },
    FieldSpec {
        key: "gigapi.merge_timeout_s",
        kind: FieldKind::Int,
        default: Some("10"),
        slot: |c| FieldSlot::Int(&mut c.gigapi.merge_timeout_s),
    },
    FieldSpec {
        key: SAVE_TIMEOUT_KEY,
        kind: FieldKind::Float,
        default: Some("1"),
        slot: |c| FieldSlot::Float(&mut c.gigapi.save_timeout_s),
    },
    FieldSpec {
        key: "gigapi.no_merges",
        kind: FieldKind::Bool,
        default: Some("false"),
        slot: |c| FieldSlot::Bool(&mut c.gigapi.no_merges),
    },
    FieldSpec {
        key: "gigapi.ui",
        kind: FieldKind::Bool,
        default: Some("true"),
        slot: |c| FieldSlot::Bool(&mut c.gigapi.ui),
    },
    FieldSpec {
        key: "gigapi.mode",
        kind: FieldKind::Str,
        default: Some("aio"),
        slot: |c| FieldSlot::Str(&mut c.gigapi.mode),
    },
    FieldSpec {
        key: "gigapi.metadata.type",
        kind: FieldKind::Str,
        default: Some("json"),
        slot: |c| FieldSlot::Str(&mut c.gigapi.metadata.kind),
    },
    FieldSpec {
        key: "gigapi.metadata.url",
        kind: FieldKind::Str,
        default: None,
        slot: |c| FieldSlot::Str(&mut c.gigapi.metadata.url),
    },
    FieldSpec {
        key: "http.port",
        kind: FieldKind::Int,
        default: Some("7971"),
        slot: |c| FieldSlot::Int(&mut c.http.port),
    },
    FieldSpec {
        key: "http.host",
        kind: FieldKind::Str,
        default: Some("0.0.0.0"),
        slot: |c| FieldSlot::Str(&mut c.http.host),
    },
    FieldSpec {
        key: "http.basic_auth.username",
        kind: FieldKind::Str,
        default: None,
        slot: |c| FieldSlot::Str(&mut c.http.basic_auth.username),
    },
    FieldSpec {
        key: "http.basic_auth.password",
        kind: FieldKind::Str,
        default: None,
        slot: |c| FieldSlot::Str(&mut c.http.basic_auth.password),
    },
    FieldSpec {
        key: "flightsql.port",
        kind: FieldKind::Int,
        default: Some("8082"),
        slot: |c| FieldSlot::Int(&mut c.flightsql.port),
    },
    FieldSpec {
        key: "flightsql.enable",
        kind: FieldKind::Bool,
        default: Some("true"),
        slot: |c| FieldSlot::Bool(&mut c.flightsql.enable),
    },
    FieldSpec {
        key: "loglevel",
        kind: FieldKind::Str,
        default: Some("info"),
        slot: |c| FieldSlot::Str(&mut c.loglevel),
    },
];
