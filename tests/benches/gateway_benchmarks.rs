//! # Formgate Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | fg-01-access-control | allow-list resolution and policy chain per decision |
//! | fg-03-submission-enrichment | `linked` + `attachments` for one payload |
//! | fg-04-api-gateway | one guarded GET through the full middleware stack |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fg_01_access_control::{
    AccessControlApi, AccessControlService, AccessPolicyConfig, StaticCapabilityEvaluator,
};
use fg_03_submission_enrichment::{
    EnricherDependencies, SubmissionEnricher, SubmissionEnrichmentApi,
};
use fg_tests::integration::fixtures::{
    contact_form, file, gateway, gateway_config, get, scenario_store, send, submission,
    BASE_URL, CLIENT_KEY,
};
use serde_json::json;
use shared_types::{Form, Identity, User};
use std::sync::Arc;
use std::time::Duration;

fn bench_access_decisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("fg-01-access-control");

    for size in [1usize, 10, 100] {
        let store = scenario_store();
        for id in 1000..1000 + size as u64 {
            store.insert_user(User {
                id,
                name: format!("user-{id}"),
                api_key: None,
            });
        }
        let access = AccessControlService::new(
            store,
            Arc::new(StaticCapabilityEvaluator::new()),
            AccessPolicyConfig::default(),
        );
        let form = Form::new("big", "Big").with_allowed_users(1000..1000 + size as u64);
        let last = Identity::api_key(999 + size as u64);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("is_allowed", size), &size, |b, _| {
            b.iter(|| black_box(access.is_allowed(&form, &last).unwrap_or(false)))
        });
    }

    group.finish();
}

fn bench_enrichment(c: &mut Criterion) {
    let mut group = c.benchmark_group("fg-03-submission-enrichment");

    let store = scenario_store();
    let ids: Vec<String> = (200..264).map(|id| id.to_string()).collect();
    for id in &ids {
        store.insert_file(file(id, &format!("{id}.png")));
    }
    let enricher = SubmissionEnricher::new(EnricherDependencies::with_base_url(store, BASE_URL));
    let form = contact_form();

    let single = submission(1, "uuid-a", "contact", 0, json!({"upload": "127"}));
    group.bench_function("enrich_single_file", |b| {
        b.iter(|| black_box(enricher.enrich(&form, &single, &single.data).ok()))
    });

    let gallery = submission(2, "uuid-b", "contact", 0, json!({ "gallery": ids }));
    group.throughput(Throughput::Elements(64));
    group.bench_function("enrich_gallery_64", |b| {
        b.iter(|| black_box(enricher.enrich(&form, &gallery, &gallery.data).ok()))
    });

    group.finish();
}

fn bench_gateway_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("fg-04-api-gateway");
    group.measurement_time(Duration::from_secs(10));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => panic!("failed to build tokio runtime: {err}"),
    };
    let gateway = gateway(scenario_store(), gateway_config());

    group.bench_function("get_enriched_submission", |b| {
        b.iter(|| {
            let router = gateway.router();
            runtime.block_on(async {
                black_box(
                    send(
                        router,
                        get("/forms/contact/submissions/uuid-jan", Some(CLIENT_KEY)),
                    )
                    .await,
                )
            })
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_access_decisions,
    bench_enrichment,
    bench_gateway_request
);
criterion_main!(benches);
