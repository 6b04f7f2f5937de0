// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use crdt_grow_counter::*;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn setup_states(n: usize) -> (ReplicaState, ReplicaState) {
    let a = (0..n)
        .map(|i| (ReplicaId::new(format!("node_{}", i)).unwrap(), i as u64))
        .collect();
    // Half the replicas overlap with `a`.
    let b = (n / 2..n + n / 2)
        .map(|i| (ReplicaId::new(format!("node_{}", i)).unwrap(), (n - i % n) as u64))
        .collect();
    (a, b)
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("ReplicaState Merge");
    for n in [100, 1000].iter() {
        let (a, b) = setup_states(*n);

        group.bench_function(format!("Pure Merge (N={})", n), |bencher| {
            bencher.iter(|| merge(black_box(&a), black_box(&b)))
        });

        group.bench_function(format!("In-Place Merge (N={})", n), |bencher| {
            bencher.iter(|| {
                let mut a_clone = a.clone();
                a_clone.merge_from(black_box(&b));
            })
        });

        let bytes_a = a.to_bytes().unwrap();
        let bytes_b = b.to_bytes().unwrap();

        group.bench_function(format!("Encoded Merge (N={})", n), |bencher| {
            bencher.iter(|| {
                let reader_a = ReplicaStateReader::new(&bytes_a);
                let reader_b = ReplicaStateReader::new(&bytes_b);
                ReplicaState::merge_from_readers(black_box(&[reader_a, reader_b])).unwrap()
            })
        });

        let json_a = serde_json::to_value(&a).unwrap();
        let json_b = serde_json::to_value(&b).unwrap();

        group.bench_function(format!("Full JSON Merge Cycle (N={})", n), |bencher| {
            bencher.iter(|| {
                SerdeBytesBridge::merge_json_values(black_box(&[json_a.clone(), json_b.clone()]))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("Delta Apply");
    let mut origin = ReplicaCounter::new(ReplicaId::new("origin").unwrap());
    let deltas: Vec<Delta> = (0..1000).map(|_| origin.increment()).collect();

    for (label, config) in [
        ("At-Most-Once", ReplicaConfig::default()),
        ("At-Least-Once", ReplicaConfig::at_least_once()),
    ] {
        group.bench_function(format!("{} (1000 deltas)", label), |bencher| {
            bencher.iter(|| {
                let mut counter =
                    ReplicaCounter::with_config(ReplicaId::new("r").unwrap(), config.clone());
                for delta in &deltas {
                    counter.apply(black_box(delta)).unwrap();
                }
                counter.value()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_merge, bench_apply);
criterion_main!(benches);
