use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dlx_cover::Matrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Placing n non-attacking rooks: one column per board rank and file, one row
/// per square. There are n! covers.
fn rooks(n: usize) -> Matrix {
    let mut matrix = Matrix::new(2 * n).unwrap();
    for rank in 0..n {
        for file in 0..n {
            matrix.add_row(&[rank, n + file]).unwrap();
        }
    }
    matrix
}

/// Perfect matchings of the complete graph on n vertices: every pair is a row.
fn matchings(n: usize) -> Matrix {
    let mut matrix = Matrix::new(n).unwrap();
    for a in 0..n {
        for b in a + 1..n {
            matrix.add_row(&[a, b]).unwrap();
        }
    }
    matrix
}

fn random(columns: usize, rows: usize, seed: u64) -> Matrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut matrix = Matrix::new(columns).unwrap();
    for _ in 0..rows {
        let row: Vec<usize> = (0..columns).filter(|_| rng.gen_bool(0.2)).collect();
        matrix.add_row(&row).unwrap();
    }
    matrix
}

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("dancing_links_count");
    for n in [5, 6, 7] {
        group.bench_with_input(BenchmarkId::new("rooks", n), &n, |b, &n| {
            let mut matrix = rooks(n);
            b.iter(|| black_box(matrix.count_solutions()))
        });
    }
    for n in [8, 10, 12] {
        group.bench_with_input(BenchmarkId::new("matchings", n), &n, |b, &n| {
            let mut matrix = matchings(n);
            b.iter(|| black_box(matrix.count_solutions()))
        });
    }
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("dancing_links_iterate");
    group.bench_function("matchings_10_lazy", |b| {
        let mut matrix = matchings(10);
        b.iter(|| black_box(matrix.solutions().count()))
    });
    group.bench_function("random_24x120_first", |b| {
        let mut matrix = random(24, 120, 7);
        b.iter(|| black_box(matrix.solutions().next()))
    });
    group.finish();
}

fn bench_ingest(c: &mut Criterion) {
    c.bench_function("dancing_links_ingest_rooks_12", |b| {
        b.iter(|| black_box(rooks(12)))
    });
}

criterion_group!(benches, bench_count, bench_iterate, bench_ingest);
criterion_main!(benches);
