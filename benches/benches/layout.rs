// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trademap_hierarchy::Hierarchy;
use trademap_layout::{PackConfig, TreemapConfig, layout_pack, layout_rect};
use trademap_records::{AggregatedTree, TimeRange, TradeRecord, TradeType, reduce};

struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// `fan`^3 leaves over twelve months.
fn records(fan: usize) -> Vec<TradeRecord> {
    let mut rng = Rng(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::new();
    for month in 1..=12 {
        let time = format!("2022.{month:02}");
        for a in 0..fan {
            let region = format!("r{a}");
            for b in 0..fan {
                let country = format!("r{a}c{b}");
                for c in 0..fan {
                    let product = format!("p{c}");
                    let v = rng.next_f64();
                    out.push(TradeRecord::new(
                        [region.as_str(), country.as_str(), product.as_str()],
                        TradeType::Export,
                        &time,
                        v * v * 1e6,
                    ));
                }
            }
        }
    }
    out
}

fn tree_for(fan: usize) -> (AggregatedTree, Hierarchy) {
    let records = records(fan);
    let range = TimeRange::parse("2022.01", Some("2022.12")).expect("valid range");
    let agg = reduce(&records, TradeType::Export, &range);
    let tree = Hierarchy::build(&agg);
    (agg, tree)
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &fan in &[4_usize, 8, 16] {
        let (agg, tree) = tree_for(fan);
        group.throughput(Throughput::Elements(tree.len() as u64));
        group.bench_function(BenchmarkId::new("hierarchy_build", fan), |b| {
            b.iter(|| Hierarchy::build(black_box(&agg)));
        });
        group.bench_function(BenchmarkId::new("treemap", fan), |b| {
            b.iter(|| layout_rect(black_box(&tree), 1600.0, 900.0, &TreemapConfig::default()));
        });
        group.bench_function(BenchmarkId::new("pack", fan), |b| {
            b.iter(|| layout_pack(black_box(&tree), 480.0, 450.0, &PackConfig::default()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
