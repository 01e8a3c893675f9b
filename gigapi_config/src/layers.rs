//! Reconstruction of the storage layer list from the environment.
//!
//! Layers are described by groups of `GIGAPI_LAYERS_<index>_<FIELD>`
//! variables. Discovery starts at index `0` and stops at the first index
//! without a `NAME`, so a gap hides every later group. An environment group
//! replaces the file layer at the same index wholesale; groups beyond the
//! file's layers are appended.
//!
//! A TTL of zero means the layer has no retention limit. An unset TTL reads
//! as zero; one that does not parse also reads as zero and raises a warning.

use crate::bind::{Draft, apply_value};
use crate::schema::{LAYER_FIELDS, LAYER_NAME_KEY, layer_env_var};
use crate::source::{EnvSnapshot, RawValue};
use crate::{Layer, ResolutionWarning, Source};

/// Overlay environment layers onto `draft`, then install the fallback layer
/// when the list is still empty.
pub fn build_layers(draft: &mut Draft, env: &EnvSnapshot) {
    for index in 0.. {
        let Some(layer) = env_layer(index, env, &mut draft.warnings) else {
            tracing::debug!(index, "layer discovery stopped");
            break;
        };
        let layers = &mut draft.config.gigapi.layers;
        if let Some(existing) = layers.get_mut(index) {
            *existing = layer;
        } else {
            layers.push(layer);
        }
        draft.provenance.record_layer(index, Source::Environment);
    }

    if draft.config.gigapi.layers.is_empty() {
        let fallback = Layer::fallback(&draft.config.gigapi.root);
        tracing::debug!(url = %fallback.url, "no layers configured; using fallback layer");
        draft.config.gigapi.layers.push(fallback);
        draft.provenance.record_layer(0, Source::Synthetic);
    }
}

/// Layer described by the variable group at `index`, if it has a name.
fn env_layer(
    index: usize,
    env: &EnvSnapshot,
    warnings: &mut Vec<ResolutionWarning>,
) -> Option<Layer> {
    let named = LAYER_FIELDS
        .iter()
        .filter(|field| field.key == LAYER_NAME_KEY)
        .any(|field| env.get(&layer_env_var(index, field)).is_some());
    if !named {
        return None;
    }

    let mut layer = Layer::default();
    for field in LAYER_FIELDS {
        let location = layer_env_var(index, field);
        let Some(text) = env.get(&location) else {
            continue;
        };
        let value = RawValue {
            text,
            source: Source::Environment,
            location,
        };
        apply_value(&mut layer, field, &value, warnings);
    }
    Some(layer)
}

#[cfg(test)]
mod tests {
    use super::build_layers;
    use crate::bind::{Draft, bind};
    use crate::schema::{CONFIG_FIELDS, FieldKind};
    use crate::source::{EnvSnapshot, RawSource};
    use crate::{Layer, LayerKind, ResolutionWarning, Source};
    use rstest::rstest;
    use std::time::Duration;

    fn snapshot(vars: &[(&str, &str)]) -> EnvSnapshot {
        vars.iter().copied().collect()
    }

    fn build(vars: &[(&str, &str)]) -> Draft {
        let env = snapshot(vars);
        let mut draft = bind(&RawSource::from_env(env.clone()), CONFIG_FIELDS);
        build_layers(&mut draft, &env);
        draft
    }

    #[rstest]
    fn contiguous_groups_become_layers_in_order() {
        let draft = build(&[
            ("GIGAPI_LAYERS_0_NAME", "hot"),
            ("GIGAPI_LAYERS_0_TYPE", "fs"),
            ("GIGAPI_LAYERS_0_URL", "file:///data/hot"),
            ("GIGAPI_LAYERS_0_GLOBAL", "false"),
            ("GIGAPI_LAYERS_0_TTL", "10m"),
            ("GIGAPI_LAYERS_1_NAME", "cold"),
            ("GIGAPI_LAYERS_1_TYPE", "s3"),
            ("GIGAPI_LAYERS_1_URL", "s3://localhost:8181/bucket"),
            ("GIGAPI_LAYERS_1_GLOBAL", "true"),
            ("GIGAPI_LAYERS_1_AUTH_KEY", "minio"),
            ("GIGAPI_LAYERS_1_AUTH_SECRET", "minio123"),
        ]);
        let layers = &draft.config.gigapi.layers;
        assert_eq!(layers.len(), 2);
        let [hot, cold] = layers.as_slice() else {
            panic!("expected two layers, got {layers:?}");
        };
        assert_eq!(hot.name, "hot");
        assert_eq!(hot.kind, LayerKind::Filesystem);
        assert!(!hot.global);
        assert_eq!(hot.ttl_limit(), Some(Duration::from_secs(600)));
        assert_eq!(cold.kind, LayerKind::ObjectStore);
        assert!(cold.global);
        assert_eq!(cold.auth.secret, "minio123");
        assert_eq!(cold.ttl_limit(), None);
        assert_eq!(draft.provenance.layer(1), Some(Source::Environment));
    }

    #[rstest]
    fn a_gap_ends_discovery() {
        let draft = build(&[
            ("GIGAPI_LAYERS_0_NAME", "hot"),
            ("GIGAPI_LAYERS_1_URL", "file:///nameless"),
            ("GIGAPI_LAYERS_2_NAME", "unreachable"),
        ]);
        let names: Vec<_> = draft
            .config
            .gigapi
            .layers
            .iter()
            .map(|layer| layer.name.as_str())
            .collect();
        assert_eq!(names, ["hot"]);
    }

    #[rstest]
    fn invalid_ttl_reads_as_unlimited_with_a_warning() {
        let draft = build(&[
            ("GIGAPI_LAYERS_0_NAME", "hot"),
            ("GIGAPI_LAYERS_0_TTL", "ten minutes"),
        ]);
        assert_eq!(
            draft.config.gigapi.layers.first().map(Layer::ttl_limit),
            Some(None)
        );
        assert!(matches!(
            draft.warnings.as_slice(),
            [ResolutionWarning::FieldCoercion { expected: FieldKind::Duration, key, .. }]
                if key == "GIGAPI_LAYERS_0_TTL"
        ));
    }

    #[rstest]
    fn environment_replaces_file_layer_at_same_index() {
        let env = snapshot(&[
            ("GIGAPI_LAYERS_0_NAME", "hot"),
            ("GIGAPI_LAYERS_0_URL", "file:///from/env"),
            ("GIGAPI_LAYERS_1_NAME", "extra"),
        ]);
        let mut draft = Draft::default();
        draft.config.gigapi.layers.push(Layer {
            name: "hot".to_owned(),
            url: "file:///from/file".to_owned(),
            global: true,
            ..Layer::default()
        });
        draft.provenance.record_layer(0, Source::File);

        build_layers(&mut draft, &env);

        let layers = &draft.config.gigapi.layers;
        assert_eq!(layers.len(), 2);
        let first = layers.first();
        assert_eq!(first.map(|l| l.url.as_str()), Some("file:///from/env"));
        assert_eq!(first.map(|l| l.global), Some(false), "no field merge");
        assert_eq!(draft.provenance.layer(0), Some(Source::Environment));
    }

    #[rstest]
    fn empty_list_gets_the_fallback_layer() {
        let draft = build(&[("GIGAPI_ROOT", "data")]);
        assert_eq!(
            draft.config.gigapi.layers,
            vec![Layer {
                name: "default".to_owned(),
                kind: LayerKind::Filesystem,
                global: true,
                url: "data".to_owned(),
                ..Layer::default()
            }]
        );
        assert_eq!(draft.provenance.layer(0), Some(Source::Synthetic));
    }
}
