use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use frontier_rs::data::synthetic::synthetic_returns;
use frontier_rs::distributions::seeded_rng;
use frontier_rs::portfolio::FrontierSampler;
use frontier_rs::stats::compute_statistics;

fn bench_sampler(c: &mut Criterion) {
  let mut group = c.benchmark_group("FrontierSampler");

  for n in [3usize, 10, 30] {
    let tickers: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
    let returns = synthetic_returns(&tickers, 251, &mut seeded_rng(Some(7)));
    let stats = compute_statistics(returns.view()).expect("synthetic statistics");
    let sampler = FrontierSampler::new(15_000, 0.02).with_seed(Some(11));

    group.bench_with_input(BenchmarkId::new("15k trials", n), &stats, |b, stats| {
      b.iter(|| black_box(sampler.sample(stats).expect("sample")))
    });
  }

  group.finish();
}

fn bench_statistics(c: &mut Criterion) {
  let tickers: Vec<String> = (0..20).map(|i| format!("T{i}")).collect();
  let returns = synthetic_returns(&tickers, 1259, &mut seeded_rng(Some(3)));

  c.bench_function("compute_statistics 20x1259", |b| {
    b.iter(|| black_box(compute_statistics(returns.view()).expect("statistics")))
  });
}

criterion_group!(benches, bench_sampler, bench_statistics);
criterion_main!(benches);
