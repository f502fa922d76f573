// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_region::{IntervalSet, Region};

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

/// Checkerboard of `n * n` cells; every other cell is set.
fn checkerboard(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n / 2 + 1);
    for y in 0..n {
        for x in (y % 2..n).step_by(2) {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn random_rects(count: usize, extent: f64, size: f64, seed: u64) -> Vec<Rect> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x0 = (rng.next_f64() * extent).floor();
            let y0 = (rng.next_f64() * extent).floor();
            let w = 1.0 + (rng.next_f64() * size).floor();
            let h = 1.0 + (rng.next_f64() * size).floor();
            Rect::new(x0, y0, x0 + w, y0 + h)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[64usize, 256, 1024] {
        let rects = random_rects(n, 2000.0, 80.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("from_rects_random_n{}", n), |b| {
            b.iter(|| black_box(Region::from_rects(&rects).unwrap()));
        });
    }
    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");
    for &n in &[16usize, 32, 64] {
        let board = Region::from_rects(checkerboard(n, 10.0)).unwrap();
        let shifted = board.translate(5.0, 5.0).unwrap();
        group.throughput(Throughput::Elements(board.count() as u64));
        group.bench_function(format!("union_checkerboard_n{}", n), |b| {
            b.iter(|| black_box(board.union(&shifted)));
        });
        group.bench_function(format!("intersect_checkerboard_n{}", n), |b| {
            b.iter(|| black_box(board.intersect(&shifted)));
        });
        group.bench_function(format!("subtract_checkerboard_n{}", n), |b| {
            b.iter(|| black_box(board.subtract(&shifted)));
        });
        group.bench_function(format!("xor_checkerboard_n{}", n), |b| {
            b.iter(|| black_box(board.xor(&shifted)));
        });
    }
    let a = Region::from_rects(random_rects(512, 2000.0, 80.0, 0xBADC_F00D_1234_5678)).unwrap();
    let b = Region::from_rects(random_rects(512, 2000.0, 80.0, 0xC1A5_7E55_9999_ABCD)).unwrap();
    group.bench_function("does_intersect_random", |bench| {
        bench.iter(|| black_box(a.does_intersect(&b)));
    });
    group.bench_function("relate_random", |bench| {
        bench.iter(|| black_box(a.relate(&b)));
    });
    group.finish();
}

fn bench_damage(c: &mut Criterion) {
    let mut group = c.benchmark_group("damage");
    let frames: Vec<Vec<Rect>> = (0..16)
        .map(|i| random_rects(32, 1000.0, 60.0, 0xFACE_FEED_CAFE_BABE ^ i))
        .collect();
    let viewport = Region::from_rect(Rect::new(0.0, 0.0, 800.0, 600.0)).unwrap();
    group.bench_function("accumulate_and_clip", |b| {
        b.iter_batched(
            Region::empty,
            |mut damage| {
                for frame in &frames {
                    damage = damage.union(&Region::from_rects(frame).unwrap());
                }
                black_box(damage.intersect(&viewport).rects().len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let board = Region::from_rects(checkerboard(64, 10.0)).unwrap();
    let mut rng = Rng::new(0x1234_5678_9ABC_DEF0);
    let points: Vec<(f64, f64)> = (0..1024)
        .map(|_| (rng.next_f64() * 640.0, rng.next_f64() * 640.0))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("is_point_in_checkerboard", |b| {
        b.iter(|| {
            let hits = points.iter().filter(|&&(x, y)| board.is_point_in(x, y)).count();
            black_box(hits)
        });
    });
    group.bench_function("contour_checkerboard", |b| {
        b.iter(|| black_box(board.contour().unwrap().len()));
    });

    let spans: Vec<f64> = (0..2048).map(|i| f64::from(i) * 3.0).collect();
    let set = IntervalSet::from_spans(&spans).unwrap();
    group.bench_function("interval_is_point_in", |b| {
        b.iter(|| {
            let hits = points.iter().filter(|&&(x, _)| set.is_point_in(x * 9.0)).count();
            black_box(hits)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_combine, bench_damage, bench_queries);
criterion_main!(benches);
