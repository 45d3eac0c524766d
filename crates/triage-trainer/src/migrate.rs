//! Offline migration of legacy model artifacts
//!
//! Earlier deployments stored the model in two ad hoc JSON shapes: per-class
//! token counts keyed by token string (no vocabulary table), either nested
//! under a top-level `model` key or bare. The classifier accepts only the
//! canonical versioned schema; this module converts old artifacts offline so
//! no shape sniffing survives on the request path.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;
use triage_classifiers::model::{PriorityModel, DEFAULT_SMOOTHING, SCHEMA_VERSION};
use triage_core::{Error, PriorityClass, Result};

#[derive(Debug, Deserialize)]
struct LegacyWrapper {
    model: LegacyModel,
}

#[derive(Debug, Deserialize)]
struct LegacyModel {
    classes: BTreeMap<String, LegacyClass>,
    total: u64,
    #[serde(default = "default_smoothing")]
    smoothing: f64,
}

#[derive(Debug, Deserialize)]
struct LegacyClass {
    #[serde(default)]
    tokens: BTreeMap<String, u64>,
    docs: u64,
}

fn default_smoothing() -> f64 {
    DEFAULT_SMOOTHING
}

/// Convert a legacy artifact to the canonical schema.
///
/// Tries the nested shape first, then the bare one. Vocabulary indices are
/// assigned in lexical token order, which keeps the migration deterministic.
pub fn migrate(legacy_json: &str) -> Result<PriorityModel> {
    let legacy = parse_legacy(legacy_json)?;

    let mut tokens: BTreeSet<&str> = BTreeSet::new();
    for class in legacy.classes.values() {
        tokens.extend(class.tokens.keys().map(String::as_str));
    }
    let vocabulary: BTreeMap<String, usize> = tokens
        .into_iter()
        .enumerate()
        .map(|(idx, token)| (token.to_string(), idx))
        .collect();

    let mut class_token_counts: BTreeMap<PriorityClass, BTreeMap<usize, u64>> = PriorityClass::ALL
        .iter()
        .map(|&c| (c, BTreeMap::new()))
        .collect();
    let mut class_document_counts: BTreeMap<PriorityClass, u64> =
        PriorityClass::ALL.iter().map(|&c| (c, 0)).collect();

    for (name, legacy_class) in &legacy.classes {
        let class = PriorityClass::parse(name).ok_or_else(|| {
            Error::model_not_trained(format!("legacy artifact has unknown class {name}"))
        })?;

        let counts = class_token_counts.entry(class).or_default();
        for (token, count) in &legacy_class.tokens {
            counts.insert(vocabulary[token], *count);
        }
        class_document_counts.insert(class, legacy_class.docs);
    }

    let model = PriorityModel {
        schema_version: SCHEMA_VERSION,
        vocabulary,
        class_token_counts,
        class_document_counts,
        total_document_count: legacy.total,
        smoothing: legacy.smoothing,
    };
    model.validate()?;

    info!(
        vocabulary = model.vocabulary.len(),
        documents = model.total_document_count,
        "migrated legacy artifact to schema version {SCHEMA_VERSION}"
    );

    Ok(model)
}

fn parse_legacy(json: &str) -> Result<LegacyModel> {
    if let Ok(wrapper) = serde_json::from_str::<LegacyWrapper>(json) {
        return Ok(wrapper.model);
    }
    serde_json::from_str::<LegacyModel>(json).map_err(|e| {
        Error::model_not_trained(format!("artifact matches no known legacy shape: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_classifiers::train;
    use triage_core::TrainingExample;

    const LEGACY_NESTED: &str = r#"{
        "model": {
            "classes": {
                "MEDIUM": { "tokens": { "leak": 2, "meter": 1 }, "docs": 2 },
                "CRITICAL": { "tokens": { "sewage": 3 }, "docs": 1 }
            },
            "total": 3,
            "smoothing": 1.0
        }
    }"#;

    #[test]
    fn test_migrate_nested_shape() {
        let model = migrate(LEGACY_NESTED).unwrap();
        assert_eq!(model.schema_version, SCHEMA_VERSION);
        assert_eq!(model.total_document_count, 3);

        // Lexical vocabulary order: leak=0, meter=1, sewage=2
        assert_eq!(model.vocabulary["leak"], 0);
        assert_eq!(model.vocabulary["meter"], 1);
        assert_eq!(model.vocabulary["sewage"], 2);

        assert_eq!(model.class_token_counts[&PriorityClass::Medium][&0], 2);
        assert_eq!(model.class_token_counts[&PriorityClass::Critical][&2], 3);
        assert_eq!(model.class_document_counts[&PriorityClass::Medium], 2);
        // Classes absent from the legacy artifact are present at zero
        assert_eq!(model.class_document_counts[&PriorityClass::Low], 0);
    }

    #[test]
    fn test_migrate_bare_shape() {
        let bare = r#"{
            "classes": { "HIGH": { "tokens": { "pump": 4 }, "docs": 2 } },
            "total": 2
        }"#;
        let model = migrate(bare).unwrap();
        assert_eq!(model.class_token_counts[&PriorityClass::High][&0], 4);
        assert_eq!(model.smoothing, DEFAULT_SMOOTHING);
    }

    #[test]
    fn test_unknown_class_rejected() {
        let bad = r#"{
            "classes": { "URGENT": { "tokens": {}, "docs": 1 } },
            "total": 1
        }"#;
        assert!(matches!(
            migrate(bad),
            Err(Error::ModelNotTrained(_))
        ));
    }

    #[test]
    fn test_unrecognizable_shape_rejected() {
        assert!(matches!(
            migrate(r#"{ "weights": [1, 2, 3] }"#),
            Err(Error::ModelNotTrained(_))
        ));
    }

    #[test]
    fn test_migrated_model_scores_like_trained_model() {
        // A legacy artifact equivalent to training on this corpus must
        // produce the same counts, modulo vocabulary index assignment.
        let examples = vec![
            TrainingExample::new("leak meter leak", PriorityClass::Medium),
            TrainingExample::new("the of and", PriorityClass::Medium),
            TrainingExample::new("sewage sewage sewage", PriorityClass::Critical),
        ];
        let trained = train(&examples, 1.0).unwrap();
        let migrated = migrate(LEGACY_NESTED).unwrap();

        assert_eq!(trained.total_document_count, migrated.total_document_count);
        assert_eq!(
            trained.class_document_counts,
            migrated.class_document_counts
        );
        for class in PriorityClass::ALL {
            let trained_by_token: BTreeMap<&str, u64> = trained.vocabulary.iter()
                .filter_map(|(token, idx)| {
                    trained.class_token_counts[&class]
                        .get(idx)
                        .map(|&count| (token.as_str(), count))
                })
                .collect();
            let migrated_by_token: BTreeMap<&str, u64> = migrated.vocabulary.iter()
                .filter_map(|(token, idx)| {
                    migrated.class_token_counts[&class]
                        .get(idx)
                        .map(|&count| (token.as_str(), count))
                })
                .collect();
            assert_eq!(trained_by_token, migrated_by_token, "class {class}");
        }
    }
}
