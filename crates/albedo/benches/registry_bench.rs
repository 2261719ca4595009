use albedo::reflection::{reflect, DynamicEndpointSpec, EndpointKeyer, EndpointRegistry, ResponseSpec};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::HashMap;

fn populated_registry(count: usize) -> EndpointRegistry {
    let registry = EndpointRegistry::new();
    let endpoints: Vec<DynamicEndpointSpec> = (0..count)
        .map(|i| DynamicEndpointSpec::new("GET", format!("/api/v1/endpoint{i}?page={i}")))
        .collect();
    registry.register(
        &endpoints,
        ResponseSpec {
            status: 200,
            body: "ok".to_string(),
            ..Default::default()
        },
    );
    registry
}

fn bench_endpoint_key(c: &mut Criterion) {
    let keyer = EndpointKeyer::new();
    c.bench_function("endpoint_key", |b| {
        b.iter(|| keyer.key(black_box("GET"), black_box("/api/v1/endpoint500?page=500")))
    });
}

fn bench_registry_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_lookup");
    group.throughput(Throughput::Elements(1));

    for count in [10, 1_000, 100_000] {
        let registry = populated_registry(count);
        let hit = format!("/api/v1/endpoint{}?page={}", count / 2, count / 2);

        group.bench_with_input(BenchmarkId::new("hit", count), &hit, |b, url| {
            b.iter(|| registry.lookup(black_box("GET"), black_box(url)))
        });
        group.bench_with_input(BenchmarkId::new("miss", count), &count, |b, _| {
            b.iter(|| registry.lookup(black_box("GET"), black_box("/not/configured")))
        });
    }

    group.finish();
}

fn bench_reflect(c: &mut Criterion) {
    let spec = ResponseSpec {
        status: 202,
        headers: HashMap::from([
            ("content-type".to_string(), "application/json".to_string()),
            ("x-request-id".to_string(), "abc".to_string()),
        ]),
        body: "x".repeat(4096),
        ..Default::default()
    };

    c.bench_function("reflect_4k_body", |b| {
        b.iter(|| reflect(black_box(&spec), "GET", "/bench"))
    });
}

criterion_group!(benches, bench_endpoint_key, bench_registry_lookup, bench_reflect);
criterion_main!(benches);
