// Copyright 2026 the Trademap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use trademap_hierarchy::{Hierarchy, NodeId};
use trademap_index::{Backend, FlatVec, QuadTree, SpatialIndex};
use trademap_layout::{TreemapConfig, layout_rect};

const WIDTH: f64 = 1600.0;
const HEIGHT: f64 = 900.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Root children of a flat treemap with `n` skewed values.
fn treemap_children(n: usize) -> Vec<(NodeId, Rect)> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    let names: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
    let tree = Hierarchy::flat(
        "",
        names.iter().map(|name| {
            let v = rng.next_f64();
            (name.as_str(), 1.0 + v * v * 1000.0)
        }),
    );
    let layout = layout_rect(&tree, WIDTH, HEIGHT, &TreemapConfig::default());
    layout.child_rects(&tree, tree.root()).collect()
}

/// Randomly placed, possibly overlapping boxes.
fn random_rects(n: usize) -> Vec<(u32, Rect)> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..n)
        .map(|i| {
            let x0 = rng.next_f64() * WIDTH;
            let y0 = rng.next_f64() * HEIGHT;
            let w = 4.0 + rng.next_f64() * 60.0;
            let h = 4.0 + rng.next_f64() * 60.0;
            (i as u32, Rect::new(x0, y0, x0 + w, y0 + h))
        })
        .collect()
}

fn pointer_samples(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * WIDTH, rng.next_f64() * HEIGHT))
        .collect()
}

fn hover_sweep<K: Copy, B: Backend>(index: &SpatialIndex<K, B>, points: &[Point]) -> usize {
    points
        .iter()
        .filter(|&&pt| index.query(black_box(pt)).is_some())
        .count()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build_treemap");
    for &n in &[16_usize, 128, 1024] {
        let items = treemap_children(n);
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            b.iter(|| SpatialIndex::<NodeId, FlatVec>::build(black_box(items.iter().copied())));
        });
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| {
            b.iter(|| SpatialIndex::<NodeId, QuadTree>::build(black_box(items.iter().copied())));
        });
    }
    group.finish();
}

fn bench_hover_treemap(c: &mut Criterion) {
    let points = pointer_samples(1000);
    let mut group = c.benchmark_group("index_hover_treemap");
    group.throughput(Throughput::Elements(points.len() as u64));
    for &n in &[16_usize, 128, 1024] {
        let items = treemap_children(n);
        let flat = SpatialIndex::<NodeId, FlatVec>::build(items.iter().copied());
        let quad = SpatialIndex::<NodeId, QuadTree>::build(items.iter().copied());
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            b.iter(|| hover_sweep(&flat, &points));
        });
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| {
            b.iter(|| hover_sweep(&quad, &points));
        });
    }
    group.finish();
}

fn bench_hover_random(c: &mut Criterion) {
    let points = pointer_samples(1000);
    let mut group = c.benchmark_group("index_hover_random_overlapping");
    group.throughput(Throughput::Elements(points.len() as u64));
    for &n in &[256_usize, 4096] {
        let items = random_rects(n);
        let flat = SpatialIndex::<u32, FlatVec>::build(items.iter().copied());
        let quad = SpatialIndex::<u32, QuadTree>::build(items.iter().copied());
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            b.iter(|| hover_sweep(&flat, &points));
        });
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| {
            b.iter(|| hover_sweep(&quad, &points));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_hover_treemap, bench_hover_random);
criterion_main!(benches);
