use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use explainable_kmedian::synthetic::{k_clusters, ring_centers};
use explainable_kmedian::*;
use rand::SeedableRng;

fn reference_for(k: usize, cluster_size: usize) -> (Instance, Clustering) {
    let mut rng = SplitRng::seed_from_u64(42);
    let instance = k_clusters(k, cluster_size, 5.0, 100.0, &mut rng).unwrap();
    let reference = FixedCenters::new(ring_centers(k, 100.0))
        .reference_clustering(&instance, Norm::L1)
        .unwrap();
    (instance, reference)
}

fn benchmark_tree_building(c: &mut Criterion) {
    for kind in StrategyKind::ALL {
        let mut group = c.benchmark_group(format!("build/{kind}"));

        for k in [4, 16, 64].iter() {
            let (_, reference) = reference_for(*k, 50);
            let strategy = kind.build(Norm::L1);

            group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, _| {
                b.iter_with_setup(
                    || (reference.clone(), SplitRng::seed_from_u64(7)),
                    |(reference, mut rng)| {
                        let tree = TreeBuilder::new(strategy.as_ref(), Norm::L1)
                            .build(black_box(reference), &mut rng)
                            .unwrap();
                        black_box(tree);
                    },
                );
            });
        }

        group.finish();
    }
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    for size in [10, 50, 200].iter() {
        let (instance, _) = reference_for(8, *size);
        let solver = ExplainableSolver::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let solution = solver.solve(black_box(&instance)).unwrap();
                black_box(solution);
            });
        });
    }

    group.finish();
}

fn benchmark_seeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmedian_plus_plus");
    group.sample_size(20);

    for size in [10, 50, 200].iter() {
        let (instance, _) = reference_for(8, *size);
        let seeder = KMedianPlusPlus::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(seeder.reference_clustering(&instance, Norm::L1).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tree_building,
    benchmark_full_pipeline,
    benchmark_seeding
);
criterion_main!(benches);
