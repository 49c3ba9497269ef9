use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use strata_analysis::entity::{best_match, variations};
use strata_analysis::{CorrelationEngine, CorrelationOutcome};
use strata_core::config::CorrelationConfig;
use strata_core::types::{DriftArtifact, LayerType, Severity};

fn entity_matching(c: &mut Criterion) {
    let names = [
        ("user", "users"),
        ("userProfile", "user_profiles"),
        ("tbl_order_items", "orderItems"),
        ("categories", "category"),
        ("payment_transactions", "invoices"),
    ];

    c.bench_function("variations", |b| {
        b.iter(|| {
            for (a, _) in &names {
                black_box(variations(black_box(a)));
            }
        })
    });

    c.bench_function("best_match", |b| {
        let pairs: Vec<_> =
            names.iter().map(|(a, t)| (variations(a), variations(t))).collect();
        b.iter(|| {
            for (a, t) in &pairs {
                black_box(best_match(black_box(a), black_box(t)));
            }
        })
    });
}

fn synthetic_artifacts(n: usize) -> Vec<DriftArtifact> {
    let mut artifacts = Vec::with_capacity(n * 2);
    for i in 0..n {
        let mut api = DriftArtifact::new(LayerType::Api, Severity::Low);
        api.endpoints = vec![format!("GET /resource{i}/{{id}}")];
        api.changes = vec![format!("ADDED ENDPOINT: GET /resource{i}/{{id}}")];
        artifacts.push(api);

        let mut db = DriftArtifact::new(LayerType::Database, Severity::Medium);
        db.entities = vec![format!("resource{i}s")];
        db.changes = vec![format!("CREATE TABLE resource{i}s")];
        artifacts.push(db);
    }
    artifacts
}

fn full_pipeline(c: &mut Criterion) {
    let engine = CorrelationEngine::new(CorrelationConfig::default());

    let mut group = c.benchmark_group("engine_run");
    for size in [10usize, 50, 100] {
        let input = synthetic_artifacts(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let outcome: CorrelationOutcome = engine.run(black_box(input.clone()));
                black_box(outcome)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, entity_matching, full_pipeline);
criterion_main!(benches);
