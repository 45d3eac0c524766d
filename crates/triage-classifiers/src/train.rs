//! Offline model training
//!
//! Builds a [`PriorityModel`] from labeled examples. Runs out-of-band
//! (manually or from a scheduled batch job), never on the live request path.

use crate::model::{PriorityModel, SCHEMA_VERSION};
use crate::tokenizer::tokenize;
use std::collections::BTreeMap;
use tracing::info;
use triage_core::{Error, PriorityClass, Result, TrainingExample};

/// Train a model over the corpus.
///
/// Vocabulary indices are assigned in first-seen order and frozen. Examples
/// whose text tokenizes to nothing still count toward the document totals.
/// Fails with [`Error::EmptyCorpus`] when no examples are supplied; a silent
/// partial model would be worse than a loud batch failure.
pub fn train(examples: &[TrainingExample], smoothing: f64) -> Result<PriorityModel> {
    if examples.is_empty() {
        return Err(Error::empty_corpus(
            "no usable training examples after filtering",
        ));
    }

    let mut vocabulary: BTreeMap<String, usize> = BTreeMap::new();
    let mut class_token_counts: BTreeMap<PriorityClass, BTreeMap<usize, u64>> = PriorityClass::ALL
        .iter()
        .map(|&c| (c, BTreeMap::new()))
        .collect();
    let mut class_document_counts: BTreeMap<PriorityClass, u64> =
        PriorityClass::ALL.iter().map(|&c| (c, 0)).collect();

    for example in examples {
        let counts = class_token_counts.entry(example.label).or_default();
        for token in tokenize(&example.text) {
            let next_index = vocabulary.len();
            let index = *vocabulary.entry(token).or_insert(next_index);
            *counts.entry(index).or_insert(0) += 1;
        }
        *class_document_counts.entry(example.label).or_insert(0) += 1;
    }

    let model = PriorityModel {
        schema_version: SCHEMA_VERSION,
        vocabulary,
        class_token_counts,
        class_document_counts,
        total_document_count: examples.len() as u64,
        smoothing,
    };
    model.validate()?;

    info!(
        documents = model.total_document_count,
        vocabulary = model.vocabulary.len(),
        "trained priority model"
    );

    Ok(model)
}
