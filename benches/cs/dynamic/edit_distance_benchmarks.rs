use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use min_edit_distance::{align, min_edit_distance, Grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_string(rng: &mut StdRng, len: usize) -> Vec<char> {
    (0..len)
        .map(|_| (b'a' + rng.gen_range(0..4)) as char)
        .collect()
}

fn bench_edit_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_distance");
    let mut rng = StdRng::seed_from_u64(7);

    for &len in &[16usize, 128, 512] {
        let target = random_string(&mut rng, len);
        let source = random_string(&mut rng, len);
        let target_str: String = target.iter().collect();
        let source_str: String = source.iter().collect();

        group.bench_with_input(BenchmarkId::new("build", len), &len, |b, _| {
            b.iter(|| Grid::build(black_box(&target), black_box(&source)))
        });

        let grid = Grid::build(&target, &source);
        group.bench_with_input(BenchmarkId::new("align", len), &len, |b, _| {
            b.iter(|| align(black_box(&grid), black_box(&target), black_box(&source)))
        });

        group.bench_with_input(BenchmarkId::new("rolling_rows", len), &len, |b, _| {
            b.iter(|| min_edit_distance(black_box(&target_str), black_box(&source_str)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_edit_distance);
criterion_main!(benches);
