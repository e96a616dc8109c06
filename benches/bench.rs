// Criterion benchmarks for Record Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use record_match::core::{levenshtein, DuplicateDetector, HashIndex, PriorityQueue, RatingTree};
use record_match::models::Record;
use std::sync::Arc;

fn create_record(id: usize) -> Arc<Record> {
    Arc::new(
        Record::new()
            .with_id(id.to_string())
            .with_name(format!("First{}", id % 97), format!("Last{}", id))
            .with_email(format!("user{}@example.com", id))
            .with_phone(format!("555-{:04}", id % 10_000))
            .with_score((id % 50) as f64 / 10.0)
            .with_priority((id * 7 % 101) as f64),
    )
}

fn bench_hash_index(c: &mut Criterion) {
    let mut index = HashIndex::new();
    for i in 0..1000 {
        index.set(format!("key{}", i), i);
    }

    c.bench_function("hash_index_get", |b| {
        b.iter(|| index.get(black_box("key500")));
    });
}

fn bench_levenshtein(c: &mut Criterion) {
    c.bench_function("levenshtein_names", |b| {
        b.iter(|| levenshtein(black_box("jonathan doe"), black_box("johnathan dow")));
    });
}

fn bench_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate_detector");

    for record_count in [100, 1000, 5000].iter() {
        let records: Vec<Arc<Record>> = (0..*record_count).map(create_record).collect();

        group.bench_with_input(
            BenchmarkId::new("add_record", record_count),
            record_count,
            |b, _| {
                b.iter(|| {
                    let mut detector = DuplicateDetector::new();
                    for record in &records {
                        detector.add_record(Arc::clone(record));
                    }
                    black_box(detector.stats())
                });
            },
        );

        let mut detector = DuplicateDetector::new();
        for record in &records {
            detector.add_record(Arc::clone(record));
        }
        let query = create_record(record_count + 1);

        group.bench_with_input(
            BenchmarkId::new("find_similar", record_count),
            record_count,
            |b, _| {
                b.iter(|| detector.find_similar(black_box(&query)));
            },
        );
    }

    group.finish();
}

fn bench_rating_tree(c: &mut Criterion) {
    let records: Vec<Arc<Record>> = (0..10_000).map(create_record).collect();

    c.bench_function("rating_tree_insert_10000", |b| {
        b.iter(|| {
            let mut tree = RatingTree::new();
            for (i, record) in records.iter().enumerate() {
                tree.insert(Arc::clone(record), i as f64);
            }
            black_box(tree.height())
        });
    });

    let mut tree = RatingTree::new();
    for (i, record) in records.iter().enumerate() {
        tree.insert(Arc::clone(record), i as f64);
    }

    c.bench_function("rating_tree_search_range", |b| {
        b.iter(|| tree.search_range(black_box(4000.0), black_box(4100.0)).len());
    });
}

fn bench_priority_queue(c: &mut Criterion) {
    let records: Vec<Arc<Record>> = (0..10_000).map(create_record).collect();

    c.bench_function("priority_queue_insert_extract_10000", |b| {
        b.iter(|| {
            let mut queue = PriorityQueue::with_capacity(records.len());
            for record in &records {
                queue.insert(Arc::clone(record), record.priority.unwrap_or(0.0));
            }
            while let Some(record) = queue.extract_max() {
                black_box(record);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_hash_index,
    bench_levenshtein,
    bench_detector,
    bench_rating_tree,
    bench_priority_queue
);

criterion_main!(benches);
