//! Performance benchmarks for the salon estimator.
//!
//! Estimates are recomputed after every selection change, so these targets
//! keep that loop interactive:
//! - Single estimate against the shipped catalog: < 20μs mean
//! - Full session walk-through (level, services, add-ons, duration): < 200μs mean
//! - Estimate over HTTP: < 100μs mean
//! - Batch of 100 HTTP estimates: < 10ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use salon_estimator::api::{AppState, create_router};
use salon_estimator::calculation::calculate_estimate;
use salon_estimator::config::Catalog;
use salon_estimator::models::{Downpayment, SeniorityLevel, Selection};
use salon_estimator::session::EstimateSession;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_catalog() -> Catalog {
    Catalog::load("./config/salon/catalog.yaml").expect("Failed to load catalog")
}

/// Creates a selection with the given number of add-ons.
fn create_selection(add_on_count: usize) -> Selection {
    let add_ons = [
        "addon_thick",
        "addon_long",
        "addon_regrowth",
        "addon_tip_out",
        "addon_basin_bally",
        "addon_scandi",
        "addon_clear_gloss",
        "addon_trim_colour",
        "addon_regrowth_tint",
    ];

    let mut selection = Selection::new();
    selection.set_seniority_level(Some(SeniorityLevel::Senior));
    selection.select_service("transformationPackage", "trans_noosa_blonde");
    selection.select_service("hairCutting", "cut_with_colour");
    selection.set_hourly_duration(Some(Decimal::from(3)));
    for id in add_ons.iter().take(add_on_count) {
        selection.add_add_on(*id);
    }
    selection
}

/// Benchmark: single estimate, varying the number of add-ons.
///
/// Target: < 20μs mean
fn bench_calculate_estimate(c: &mut Criterion) {
    let catalog = load_catalog();
    let mut group = c.benchmark_group("calculate_estimate");

    for add_on_count in [0, 3, 9] {
        let selection = create_selection(add_on_count);
        group.throughput(Throughput::Elements(add_on_count as u64 + 2));
        group.bench_with_input(
            BenchmarkId::from_parameter(add_on_count),
            &selection,
            |b, selection| b.iter(|| calculate_estimate(black_box(&catalog), black_box(selection))),
        );
    }

    group.finish();
}

/// Benchmark: a session driven through a typical booking.
///
/// Target: < 200μs mean
fn bench_session_walkthrough(c: &mut Criterion) {
    let catalog = Arc::new(load_catalog());

    c.bench_function("session_walkthrough", |b| {
        b.iter(|| {
            let mut session = EstimateSession::new(Arc::clone(&catalog)).unwrap();
            session.set_seniority_level(Some(SeniorityLevel::Intermediate)).unwrap();
            session.select_service("foilPackages", "foil_full").unwrap();
            session.select_service("hairCutting", "cut_trim_blowdry").unwrap();
            session.toggle_add_on("addon_thick").unwrap();
            session.toggle_add_on("addon_tip_out").unwrap();
            session
                .set_downpayment(Downpayment::try_from(Decimal::from(100)).unwrap())
                .unwrap();
            black_box(session.estimate().total_cost)
        })
    });
}

fn estimate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/estimate")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Benchmark: estimate over HTTP.
///
/// Target: < 100μs mean
fn bench_http_estimate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_catalog()));
    let body = serde_json::to_string(&create_selection(3)).unwrap();

    c.bench_function("http_estimate", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router.oneshot(estimate_request(&body)).await.unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 100 HTTP estimates with varying add-ons.
///
/// Target: < 10ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_catalog());

    let requests: Vec<String> = (0..100)
        .map(|i| serde_json::to_string(&create_selection(i % 10)).unwrap())
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router.oneshot(estimate_request(body)).await.unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_calculate_estimate,
    bench_session_walkthrough,
    bench_http_estimate,
    bench_batch_100,
);
criterion_main!(benches);
