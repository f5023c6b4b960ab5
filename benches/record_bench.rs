use criterion::{Criterion, criterion_group, criterion_main};
use spooky_dyn_record::{DynamicRecord, SpookyValue};
use std::hint::black_box;

// ─── Test Data ──────────────────────────────────────────────────────────────

const BENCH_JSON: &str = r#"{
  "id": "user:abc123",
  "name": "Alice",
  "age": 28,
  "score": 99.5,
  "active": true,
  "metadata": null,
  "tags": ["developer", "rust", "database"],
  "profile": {
    "bio": "Software engineer",
    "settings": { "theme": "dark", "notifications": true }
  }
}"#;

fn make_record() -> DynamicRecord {
    DynamicRecord::from_json(BENCH_JSON).unwrap()
}

/// Two records pointing at each other, plus some payload.
fn make_cycle() -> (DynamicRecord, DynamicRecord) {
    let a = make_record();
    let b = make_record();
    a.set("peer", &b);
    b.set("peer", &a);
    (a, b)
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 1: Field access
// ═══════════════════════════════════════════════════════════════════════════

fn bench_field_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_access");
    let record = make_record();

    group.bench_function("get (hit)", |b| {
        b.iter(|| record.get(black_box("name")).unwrap())
    });

    group.bench_function("get (miss)", |b| {
        b.iter(|| record.get(black_box("email")).is_err())
    });

    group.bench_function("set (overwrite)", |b| {
        b.iter(|| record.set(black_box("age"), SpookyValue::from(29i64)))
    });

    group.bench_function("invoke writer", |b| {
        let args = [SpookyValue::from(30i64)];
        b.iter(|| record.invoke(black_box("age="), &args).unwrap())
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 2: Dump / load
// ═══════════════════════════════════════════════════════════════════════════

fn bench_dump_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump_load");
    let record = make_record();
    let dumped = record.dump();

    group.bench_function("dump", |b| b.iter(|| black_box(&record).dump()));

    group.bench_function("from_fields", |b| {
        b.iter(|| DynamicRecord::from_fields(black_box(dumped.clone())))
    });

    group.bench_function("to_json", |b| b.iter(|| record.to_json().unwrap()));

    group.bench_function("from_json", |b| {
        b.iter(|| DynamicRecord::from_json(black_box(BENCH_JSON)).unwrap())
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 3: Inspect
// ═══════════════════════════════════════════════════════════════════════════

fn bench_inspect(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect");
    let record = make_record();
    let (a, b_rec) = make_cycle();

    group.bench_function("acyclic", |b| b.iter(|| record.inspect().unwrap()));
    group.bench_function("mutual cycle", |b| b.iter(|| a.inspect().unwrap()));
    group.bench_function("equality (mutual cycle)", |b| {
        b.iter(|| black_box(&a) == black_box(&b_rec))
    });

    group.finish();
    a.delete_field("peer").unwrap();
}

// ─── Criterion Main ─────────────────────────────────────────────────────────

criterion_group!(benches, bench_field_access, bench_dump_load, bench_inspect);
criterion_main!(benches);
