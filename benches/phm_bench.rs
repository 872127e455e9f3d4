use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::Rng;

use phui_miner::{Database, PhmConfig, PhmMiner, PhuiCollection, PruningStrategies};

/// Generate a synthetic utility matrix
///
/// Parameters:
/// - num_transactions: Number of transactions
/// - num_items: Total number of possible items
/// - avg_transaction_size: Average items per transaction
/// - max_utility: Largest utility of one item occurrence
fn generate_database(
    num_transactions: usize,
    num_items: usize,
    avg_transaction_size: usize,
    max_utility: u64,
) -> Database {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u64; num_transactions * num_items];

    for tx_idx in 0..num_transactions {
        let random_factor: f64 = rng.r#gen();
        let num_items_in_tx = (avg_transaction_size as f64 * (0.5 + random_factor)).round() as usize;
        let num_items_in_tx = num_items_in_tx.min(num_items);

        for _ in 0..num_items_in_tx {
            let item = rng.gen_range(0..num_items);
            data[tx_idx * num_items + item] = rng.gen_range(1..=max_utility);
        }
    }

    let matrix = Array2::from_shape_vec((num_transactions, num_items), data).unwrap();
    Database::from_utility_matrix(matrix.view())
}

fn total_utility(db: &Database) -> u64 {
    db.iter().map(|t| t.transaction_utility()).sum()
}

fn config_for(db: &Database, utility_ratio: f64) -> PhmConfig {
    PhmConfig::new((total_utility(db) as f64 * utility_ratio) as u64)
        .with_periodicity(1, db.len() / 5)
        .with_average_periodicity(1.0, (db.len() / 10).max(1) as f64)
}

fn mine(db: &Database, config: &PhmConfig) -> usize {
    let mut phuis = PhuiCollection::new();
    PhmMiner::new(config.clone()).mine(db, &mut phuis).unwrap();
    phuis.len()
}

/// Benchmark PHM with different dataset sizes
fn bench_phm_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("phm_scaling");

    let configs = vec![
        ("small_100tx", 100, 20, 5),
        ("medium_500tx", 500, 50, 8),
        ("large_1000tx", 1000, 100, 10),
        ("xlarge_5000tx", 5000, 100, 12),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        let db = generate_database(num_tx, num_items, avg_size, 10);
        let config = config_for(&db, 0.01);

        group.bench_with_input(BenchmarkId::from_parameter(name), &db, |b, db| {
            b.iter(|| mine(black_box(db), black_box(&config)));
        });
    }

    group.finish();
}

/// Benchmark PHM with different minimum utility thresholds
fn bench_phm_min_utility(c: &mut Criterion) {
    let mut group = c.benchmark_group("phm_min_utility");

    let db = generate_database(1000, 50, 8, 10);

    for &ratio in &[0.002, 0.005, 0.01, 0.02, 0.05] {
        let config = config_for(&db, ratio);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:.3}", ratio)), &config, |b, config| {
            b.iter(|| mine(black_box(&db), black_box(config)));
        });
    }

    group.finish();
}

/// Benchmark each pruning strategy on its own
fn bench_phm_pruning(c: &mut Criterion) {
    let mut group = c.benchmark_group("phm_pruning");

    let db = generate_database(1000, 40, 8, 10);
    let base = config_for(&db, 0.005);

    let strategies = vec![
        ("none", PruningStrategies::none()),
        ("la_prune", PruningStrategies { la_prune: true, ..PruningStrategies::none() }),
        ("eucp", PruningStrategies { eucp: true, ..PruningStrategies::none() }),
        ("escp", PruningStrategies { escp: true, ..PruningStrategies::none() }),
        ("all", PruningStrategies::all()),
    ];

    for (name, pruning) in strategies {
        let config = base.clone().with_pruning(pruning);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            b.iter(|| mine(black_box(&db), black_box(config)));
        });
    }

    group.finish();
}

/// Sequential vs parallel search
fn bench_phm_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("phm_parallel");

    let db = generate_database(2000, 60, 10, 10);
    let base = config_for(&db, 0.005);

    for parallel in [false, true] {
        let config = base.clone().with_parallel(parallel);
        group.bench_with_input(BenchmarkId::from_parameter(parallel), &config, |b, config| {
            b.iter(|| mine(black_box(&db), black_box(config)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_phm_scaling,
    bench_phm_min_utility,
    bench_phm_pruning,
    bench_phm_parallel
);
criterion_main!(benches);
