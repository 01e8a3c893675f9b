//! Declared defaults and the save-interval floor.

use crate::bind::Draft;
use crate::schema::{FieldSpec, SAVE_TIMEOUT_KEY};
use crate::{Config, ResolutionWarning, Source};

/// Smallest save interval, in seconds, the service accepts.
pub const MIN_SAVE_TIMEOUT_S: f64 = 1.0;

/// Replace every field still at its zero value with its declared default.
///
/// Fields explicitly supplied by the file or environment are left alone even
/// when the supplied value is a zero, so `FLIGHTSQL_ENABLE=false` survives a
/// default of `true`. A default that does not parse as its field's kind is
/// skipped with a [`ResolutionWarning::DefaultCoercion`].
pub fn fill_defaults(draft: &mut Draft, fields: &[FieldSpec<Config>]) {
    for field in fields {
        if draft.provenance.is_explicit(field.key) {
            continue;
        }
        let slot = (field.slot)(&mut draft.config);
        if !slot.is_zero() {
            continue;
        }
        let Some(default) = field.default else {
            draft.provenance.record_field(field.key, Source::Default);
            continue;
        };
        match slot.assign(default) {
            Ok(()) => draft.provenance.record_field(field.key, Source::Default),
            Err(err) => ResolutionWarning::DefaultCoercion {
                key: field.key,
                default,
                expected: err.expected,
            }
            .raise(&mut draft.warnings),
        }
    }
}

/// Raise a zero or negative save interval to [`MIN_SAVE_TIMEOUT_S`],
/// whatever supplied it. Non-finite values never reach this point since the
/// binder rejects them.
pub fn apply_floors(draft: &mut Draft) {
    let save_timeout = &mut draft.config.gigapi.save_timeout_s;
    if *save_timeout <= 0.0 {
        *save_timeout = MIN_SAVE_TIMEOUT_S;
        ResolutionWarning::Floored {
            key: SAVE_TIMEOUT_KEY,
            floor: MIN_SAVE_TIMEOUT_S,
        }
        .raise(&mut draft.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::{MIN_SAVE_TIMEOUT_S, apply_floors, fill_defaults};
    use crate::bind::{Draft, bind};
    use crate::schema::{CONFIG_FIELDS, FieldKind, FieldSlot, FieldSpec};
    use crate::source::{EnvSnapshot, RawSource};
    use crate::{Config, ResolutionWarning, Source};
    use rstest::rstest;

    fn resolved(vars: &[(&str, &str)]) -> Draft {
        let raw = RawSource::from_env(vars.iter().copied().collect::<EnvSnapshot>());
        let mut draft = bind(&raw, CONFIG_FIELDS);
        fill_defaults(&mut draft, CONFIG_FIELDS);
        draft
    }

    #[rstest]
    fn fills_every_declared_default() {
        let draft = resolved(&[]);
        let config = &draft.config;
        assert_eq!(config.gigapi.merge_timeout_s, 10);
        assert!(config.gigapi.ui);
        assert!(!config.gigapi.no_merges);
        assert_eq!(config.gigapi.mode, "aio");
        assert_eq!(config.gigapi.metadata.kind, "json");
        assert_eq!(config.http.port, 7971);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.flightsql.port, 8082);
        assert!(config.flightsql.enable);
        assert_eq!(config.loglevel, "info");
        assert_eq!(draft.provenance.field("http.port"), Some(Source::Default));
        assert!(draft.warnings.is_empty());
    }

    #[rstest]
    fn supplied_values_win_over_defaults() {
        let draft = resolved(&[("HTTP_PORT", "9000"), ("LOGLEVEL", "debug")]);
        assert_eq!(draft.config.http.port, 9000);
        assert_eq!(draft.config.loglevel, "debug");
        assert_eq!(draft.provenance.field("http.port"), Some(Source::Environment));
    }

    #[rstest]
    fn explicit_false_is_kept() {
        let draft = resolved(&[("FLIGHTSQL_ENABLE", "false"), ("GIGAPI_UI", "no")]);
        assert!(!draft.config.flightsql.enable);
        assert!(!draft.config.gigapi.ui);
        assert!(draft.provenance.is_explicit("flightsql.enable"));
        assert!(draft.provenance.is_explicit("gigapi.ui"));
    }

    #[rstest]
    fn invalid_integers_fall_back_to_the_default() {
        let draft = resolved(&[("HTTP_PORT", "80 80")]);
        assert_eq!(draft.config.http.port, 7971);
        assert_eq!(draft.provenance.field("http.port"), Some(Source::Default));
        assert!(matches!(
            draft.warnings.as_slice(),
            [ResolutionWarning::FieldCoercion { expected: FieldKind::Int, .. }]
        ));
    }

    #[rstest]
    fn malformed_default_is_skipped_with_a_warning() {
        let table = [FieldSpec::<Config> {
            key: "http.port",
            kind: FieldKind::Int,
            default: Some("ten"),
            slot: |c| FieldSlot::Int(&mut c.http.port),
        }];
        let mut draft = Draft::default();
        fill_defaults(&mut draft, &table);
        assert_eq!(draft.config.http.port, 0);
        assert_eq!(
            draft.warnings,
            vec![ResolutionWarning::DefaultCoercion {
                key: "http.port",
                default: "ten",
                expected: FieldKind::Int,
            }]
        );
    }

    #[rstest]
    #[case(&[], MIN_SAVE_TIMEOUT_S, 0)]
    #[case(&[("GIGAPI_SAVE_TIMEOUT_S", "0")], MIN_SAVE_TIMEOUT_S, 1)]
    #[case(&[("GIGAPI_SAVE_TIMEOUT_S", "-5")], MIN_SAVE_TIMEOUT_S, 1)]
    #[case(&[("GIGAPI_SAVE_TIMEOUT_S", "2.5")], 2.5, 0)]
    fn save_timeout_is_never_zero(
        #[case] vars: &[(&str, &str)],
        #[case] expected: f64,
        #[case] floored: usize,
    ) {
        let mut draft = resolved(vars);
        apply_floors(&mut draft);
        assert_eq!(draft.config.gigapi.save_timeout_s, expected);
        let count = draft
            .warnings
            .iter()
            .filter(|warning| matches!(warning, ResolutionWarning::Floored { .. }))
            .count();
        assert_eq!(count, floored);
    }

    #[rstest]
    #[case("NaN")]
    #[case("inf")]
    fn non_finite_save_timeout_falls_back_to_the_default(#[case] text: &str) {
        let mut draft = resolved(&[("GIGAPI_SAVE_TIMEOUT_S", text)]);
        apply_floors(&mut draft);
        assert_eq!(draft.config.gigapi.save_timeout_s, MIN_SAVE_TIMEOUT_S);
        assert!(matches!(
            draft.warnings.as_slice(),
            [ResolutionWarning::FieldCoercion { expected: FieldKind::Float, key, .. }]
                if key == "GIGAPI_SAVE_TIMEOUT_S"
        ));
    }
}
