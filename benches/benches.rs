use criterion::{
    AxisScale, BenchmarkId, Criterion, PlotConfiguration, criterion_group, criterion_main,
};
use kselect::KSelect;
use std::hint::black_box;
use topset::TopSet;

const K: usize = 16;

/// Generate random data with seeded RNG for reproducibility
fn generate_random_data(size: usize, seed: u64) -> Vec<u32> {
    let mut data = Vec::with_capacity(size);
    let mut rng = seed;
    for _ in 0..size {
        // Simple LCG (Linear Congruential Generator)
        rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
        let value = ((rng >> 16) % 1_000_000_000) as u32;
        data.push(value);
    }
    data
}

/// Generate worst-case data: strictly descending values, so every element
/// is admitted and displaces the current maximum
fn generate_worst_case_data(size: usize) -> Vec<u32> {
    (1..=size as u32).rev().collect()
}

fn benchmark_random_data(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);

    let mut group = c.benchmark_group("random_data");
    group.sample_size(10);
    group.plot_config(plot_config);

    for size in [10_000, 100_000, 1_000_000].iter() {
        let data = black_box(generate_random_data(*size, 42));

        group.bench_with_input(BenchmarkId::new("kselect", size), size, |b, _| {
            b.iter(|| {
                let mut ks = KSelect::new(K);
                for &value in &data {
                    ks.push(black_box(value));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("topset", size), size, |b, _| {
            b.iter(|| {
                let mut top = TopSet::new(K, |a: &u32, b: &u32| b > a);
                for &value in &data {
                    top.insert(black_box(value));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_worst_case(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);

    let mut group = c.benchmark_group("worst_case");
    group.sample_size(10);
    group.plot_config(plot_config);

    for size in [10_000, 100_000, 1_000_000].iter() {
        let data = black_box(generate_worst_case_data(*size));

        group.bench_with_input(BenchmarkId::new("kselect", size), size, |b, _| {
            b.iter(|| {
                let mut ks = KSelect::new(K);
                for &value in &data {
                    ks.push(black_box(value));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("topset", size), size, |b, _| {
            b.iter(|| {
                let mut top = TopSet::new(K, |a: &u32, b: &u32| b > a);
                for &value in &data {
                    top.insert(black_box(value));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_random_data, benchmark_worst_case);
criterion_main!(benches);
