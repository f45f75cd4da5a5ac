use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use regkit_3d::{pointcloud::PointCloud, transforms::axis_angle_to_rotation_matrix};
use regkit_icp::{find_correspondences, fit_transformation, icp, ICPConvergenceCriteria};

fn random_points(num_points: usize) -> Vec<[f64; 3]> {
    (0..num_points)
        .map(|_| rand::random::<[f64; 3]>())
        .collect()
}

fn bench_find_correspondences(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_correspondences");

    for num_points in [100, 500, 1000].iter() {
        group.throughput(criterion::Throughput::Elements(*num_points as u64));

        let source = random_points(*num_points);
        let target = random_points(*num_points);

        group.bench_with_input(
            BenchmarkId::new("brute_force", num_points),
            &(&source, &target),
            |b, (source, target)| b.iter(|| find_correspondences(black_box(source), target)),
        );
    }
}

fn bench_fit_transformation(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_transformation");

    for num_points in [100, 1000, 10000].iter() {
        let source = random_points(*num_points);
        let target = source
            .iter()
            .map(|p| [p[0] + 0.1, p[1] - 0.2, p[2]])
            .collect::<Vec<_>>();

        group.bench_with_input(
            BenchmarkId::new("kabsch", num_points),
            &(&source, &target),
            |b, (source, target)| b.iter(|| fit_transformation(black_box(source), target)),
        );
    }
}

fn bench_icp(c: &mut Criterion) {
    let mut group = c.benchmark_group("icp");
    group.sample_size(10);

    let Ok(rotation) = axis_angle_to_rotation_matrix(&[0.0, 0.0, 1.0], 0.05) else {
        return;
    };

    for num_points in [100, 500].iter() {
        let points = random_points(*num_points);
        let moved = points
            .iter()
            .map(|p| {
                [
                    rotation[0][0] * p[0] + rotation[0][1] * p[1] + 0.01,
                    rotation[1][0] * p[0] + rotation[1][1] * p[1],
                    p[2],
                ]
            })
            .collect::<Vec<_>>();

        let source = PointCloud::new(points);
        let target = PointCloud::new(moved);

        group.bench_with_input(
            BenchmarkId::new("icp", num_points),
            &(&source, &target),
            |b, (source, target)| {
                b.iter(|| icp(black_box(source), target, ICPConvergenceCriteria::default()))
            },
        );
    }
}

criterion_group!(
    benches,
    bench_find_correspondences,
    bench_fit_transformation,
    bench_icp
);
criterion_main!(benches);
