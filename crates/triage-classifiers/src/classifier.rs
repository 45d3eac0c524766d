//! Online priority classifier
//!
//! Scores a (title, description) pair against the lazily loaded model:
//! Laplace-smoothed Naive Bayes in log space, then the rule-based domain
//! boost, then softmax. Stateless per request once the model is loaded; the
//! one mutable transition (first load) is single-flighted through a
//! `tokio::sync::OnceCell`, and a failed load is not cached, so recovery is
//! automatic once an artifact appears.

use crate::config::ClassifierConfig;
use crate::model::PriorityModel;
use crate::rules::DomainBoost;
use crate::tokenizer::tokenize;
use std::collections::BTreeMap;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::debug;
use triage_core::{PriorityClass, Result};

/// Result of a single classification request. Ephemeral; persistence of
/// feedback belongs to the caller.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Suggested priority class
    pub priority: PriorityClass,

    /// Probability of the suggested class, in [0, 1]
    pub confidence: f64,

    /// Representative tag of the first matched boost rule, if any
    pub matched_rule: Option<String>,

    /// Every matched boost rule tag, for diagnostics
    pub matched_rules: Vec<String>,

    /// Full probability distribution over all four classes; uniform for
    /// input that tokenizes to nothing
    pub distribution: Vec<(PriorityClass, f64)>,

    /// Latency in microseconds
    pub latency_us: u64,
}

/// Model parameters prepared for scoring
struct ScoringModel {
    model: PriorityModel,
    token_totals: BTreeMap<PriorityClass, u64>,
}

impl ScoringModel {
    fn new(model: PriorityModel) -> Self {
        let token_totals = model.token_totals();
        Self {
            model,
            token_totals,
        }
    }

    fn load(config: &ClassifierConfig) -> Result<Self> {
        PriorityModel::load(&config.model_path).map(Self::new)
    }

    /// Raw log-score per class: smoothed log prior plus the summed smoothed
    /// log likelihood of every in-vocabulary token. Out-of-vocabulary tokens
    /// contribute nothing; their uniform smoothing floor cancels under
    /// comparison across classes.
    fn log_scores(&self, tokens: &[String]) -> BTreeMap<PriorityClass, f64> {
        let num_classes = PriorityClass::ALL.len() as f64;
        let vocab_size = self.model.vocabulary.len() as f64;
        let alpha = self.model.smoothing;
        let total_docs = self.model.total_document_count as f64;

        PriorityClass::ALL
            .iter()
            .map(|&class| {
                let docs = self
                    .model
                    .class_document_counts
                    .get(&class)
                    .copied()
                    .unwrap_or(0) as f64;
                let mut score = ((docs + 1.0) / (total_docs + num_classes)).ln();

                let counts = self.model.class_token_counts.get(&class);
                let token_total = self.token_totals.get(&class).copied().unwrap_or(0) as f64;
                let denominator = token_total + alpha * vocab_size;

                for token in tokens {
                    if let Some(idx) = self.model.vocabulary.get(token) {
                        let count =
                            counts.and_then(|m| m.get(idx)).copied().unwrap_or(0) as f64;
                        score += ((count + alpha) / denominator).ln();
                    }
                }

                (class, score)
            })
            .collect()
    }
}

/// Priority classifier service.
///
/// Constructed once per process from a [`ClassifierConfig`] and injected into
/// request handlers; owns its loaded model rather than relying on ambient
/// global state. Once loaded the model is immutable for the process lifetime.
pub struct PriorityClassifier {
    config: ClassifierConfig,
    boost: DomainBoost,
    model: OnceCell<ScoringModel>,
}

impl PriorityClassifier {
    /// Create a classifier that lazily loads its model on first use
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let boost = DomainBoost::new(config.critical_boost, config.high_boost)?;
        Ok(Self {
            config,
            boost,
            model: OnceCell::new(),
        })
    }

    /// Create a classifier over an already-built model, bypassing the
    /// artifact load. Intended for tests with fixture models.
    pub fn with_model(config: ClassifierConfig, model: PriorityModel) -> Result<Self> {
        model.validate()?;
        let boost = DomainBoost::new(config.critical_boost, config.high_boost)?;
        Ok(Self {
            config,
            boost,
            model: OnceCell::new_with(Some(ScoringModel::new(model))),
        })
    }

    /// Classify a (title, description) pair.
    ///
    /// Missing or empty strings are treated as empty text. If nothing
    /// survives tokenization the neutral default (MEDIUM at confidence 0) is
    /// returned without touching the model artifact; a dispatcher still
    /// needs an answer for near-empty input.
    pub async fn classify(&self, title: &str, description: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let mut tokens = tokenize(title);
        tokens.extend(tokenize(description));

        if tokens.is_empty() {
            return Ok(ClassificationResult {
                priority: PriorityClass::Medium,
                confidence: 0.0,
                matched_rule: None,
                matched_rules: Vec::new(),
                // Nothing was scored: a uniform distribution, with confidence
                // pinned to the neutral zero rather than its max
                distribution: PriorityClass::ALL.iter().map(|&c| (c, 0.25)).collect(),
                latency_us: start.elapsed().as_micros() as u64,
            });
        }

        let model = self
            .model
            .get_or_try_init(|| async { ScoringModel::load(&self.config) })
            .await?;

        let mut scores = model.log_scores(&tokens);

        let raw_text = format!("{title} {description}");
        let tags = self.boost.apply(&raw_text, &mut scores);

        let distribution = softmax(&scores);
        let (priority, confidence) = top_class(&distribution);

        debug!(
            %priority,
            confidence,
            matched_rules = tags.len(),
            tokens = tokens.len(),
            "classified incident"
        );

        Ok(ClassificationResult {
            priority,
            confidence,
            matched_rule: tags.first().map(|t| t.to_string()),
            matched_rules: tags.iter().map(|t| t.to_string()).collect(),
            distribution,
            latency_us: start.elapsed().as_micros() as u64,
        })
    }
}

/// Convert raw log-scores into a probability distribution. The maximum
/// log-score is subtracted before exponentiation for numerical stability.
fn softmax(scores: &BTreeMap<PriorityClass, f64>) -> Vec<(PriorityClass, f64)> {
    let max = scores
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<(PriorityClass, f64)> = PriorityClass::ALL
        .iter()
        .map(|&class| {
            let score = scores.get(&class).copied().unwrap_or(f64::NEG_INFINITY);
            (class, (score - max).exp())
        })
        .collect();
    let sum: f64 = exps.iter().map(|(_, e)| e).sum();
    exps.into_iter().map(|(c, e)| (c, e / sum)).collect()
}

/// Deterministic argmax: the first class in ascending severity order wins ties
fn top_class(distribution: &[(PriorityClass, f64)]) -> (PriorityClass, f64) {
    let mut best = distribution[0];
    for &(class, p) in &distribution[1..] {
        if p > best.1 {
            best = (class, p);
        }
    }
    best
}
