use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_tomlish::{decode, encode, entity, from_str, to_string, Entity, Graph, Value};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct Series {
    values: Vec<f64>,
}

entity!(User { id: integer, name: string, email: string, active: boolean });
entity!(NestedData { id: integer, metadata: Metadata, tags: [string] });
entity!(Metadata { created: string, updated: string, version: integer });
entity!(Series { values: [float] });

struct Link;
entity!(Link { level: integer, child: Link });

fn sample_user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn sample_nested() -> NestedData {
    NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    }
}

/// A chain of `depth` records, each holding the next under `child`.
fn chain(depth: usize) -> (Graph, serde_tomlish::EntityId) {
    let mut graph = Graph::new();
    let mut current = graph.add_with("Link", [("level", Value::from(depth as i64))]);
    for level in (0..depth).rev() {
        current = graph.add_with(
            "Link",
            [
                ("level", Value::from(level as i64)),
                ("child", Value::from(current)),
            ],
        );
    }
    (graph, current)
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = sample_user();

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "id = 123\nname = \"Alice\"\nemail = \"alice@example.com\"\nactive = true";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_nested(c: &mut Criterion) {
    let data = sample_nested();
    let text = to_string(&data).unwrap();

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });

    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| from_str::<NestedData>(black_box(&text)))
    });
}

fn benchmark_float_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("float_list");

    for size in [10, 100, 1000].iter() {
        let series = Series {
            values: (0..*size).map(|i| f64::from(i) * 1.5).collect(),
        };
        let text = to_string(&series).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &series, |b, s| {
            b.iter(|| to_string(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, t| {
            b.iter(|| from_str::<Series>(black_box(t)))
        });
    }
    group.finish();
}

fn benchmark_deep_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_graph");

    for depth in [4, 16, 64].iter() {
        let (graph, root) = chain(*depth);
        let text = encode(&graph, root).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", depth), &graph, |b, g| {
            b.iter(|| encode(black_box(g), root))
        });
        group.bench_with_input(BenchmarkId::new("decode", depth), &text, |b, t| {
            b.iter(|| decode(black_box(t), Link::schema()))
        });
    }
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = sample_user();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("tomlish_serialize", |b| {
        b.iter(|| serde_tomlish::to_string(black_box(&user)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    let text = serde_tomlish::to_string(&user).unwrap();
    let json_str = serde_json::to_string(&user).unwrap();

    group.bench_function("tomlish_deserialize", |b| {
        b.iter(|| serde_tomlish::from_str::<User>(black_box(&text)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let user = sample_user();

    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&user)).unwrap();
            let _deserialized: User = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_nested,
    benchmark_float_list,
    benchmark_deep_graph,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
