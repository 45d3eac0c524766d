//! Latency benchmarks for the priority classifier
//!
//! Classification is a lexical scorer over a small vocabulary and should stay
//! well under a millisecond per call.
//!
//! Run with: cargo bench -p triage-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use triage_classifiers::{train, ClassifierConfig, PriorityClassifier};
use triage_core::{PriorityClass, TrainingExample};

fn fixture_classifier() -> PriorityClassifier {
    let corpus = vec![
        TrainingExample::new("hydrant paint faded on maple avenue", PriorityClass::Low),
        TrainingExample::new("meter box lid cracked near sidewalk", PriorityClass::Low),
        TrainingExample::new("small service leak dripping at curb stop", PriorityClass::Medium),
        TrainingExample::new("slow leak at meter coupling", PriorityClass::Medium),
        TrainingExample::new("low pressure complaint, pump running loud", PriorityClass::High),
        TrainingExample::new("pressure drop across zone, pump vibration", PriorityClass::High),
        TrainingExample::new("sewage smell and contamination at reservoir", PriorityClass::Critical),
        TrainingExample::new("sewage surfacing near intake, contamination risk", PriorityClass::Critical),
    ];
    let model = train(&corpus, 1.0).expect("failed to train fixture model");
    PriorityClassifier::with_model(ClassifierConfig::new("/unused/model.json"), model)
        .expect("failed to build classifier")
}

fn benchmark_classify(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let classifier = fixture_classifier();

    let test_cases = vec![
        ("short_clean", "hydrant paint request", ""),
        ("short_boosted", "boil water advisory issued", "contamination suspected"),
        (
            "medium",
            "low pressure complaint on elm street",
            "customer reports pump noise and pressure drop since this morning",
        ),
        (
            "long",
            "main break at 4th and oak",
            "large leak surfacing across the intersection, road closed, multiple \
             customers without water, pump station 7 tripped offline, crews en route",
        ),
    ];

    let mut group = c.benchmark_group("Priority_Classifier");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, title, description) in test_cases {
        group.bench_with_input(
            BenchmarkId::new("classify", name),
            &(title, description),
            |b, (title, description)| {
                b.iter(|| {
                    rt.block_on(async {
                        classifier
                            .classify(black_box(title), black_box(description))
                            .await
                            .unwrap()
                    })
                });
            },
        );
    }

    group.finish();
}

fn benchmark_tokenizer(c: &mut Criterion) {
    let text = "Sewage overflow reported near pump station 3, contamination risk, \
                multiple streets flooded and road closed at the intersection";

    c.bench_function("tokenize", |b| {
        b.iter(|| triage_classifiers::tokenize(black_box(text)))
    });
}

criterion_group!(benches, benchmark_classify, benchmark_tokenizer);
criterion_main!(benches);
