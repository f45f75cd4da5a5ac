use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use regkit_3d::{linalg, transforms::RigidTransform};

fn bench_transform_points3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_points3d");

    for num_points in [1000, 10000, 100000].iter() {
        group.throughput(criterion::Throughput::Elements(*num_points as u64));
        let parameter_string = format!("{}", num_points);

        let src_points = (0..*num_points)
            .map(|_| rand::random::<[f64; 3]>())
            .collect::<Vec<_>>();
        let transform = RigidTransform::new(
            [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
            [1.0, 2.0, 3.0],
        );
        let mut dst_points = vec![[0.0; 3]; src_points.len()];

        group.bench_function(
            BenchmarkId::new("transform_points3d", &parameter_string),
            |b| {
                b.iter(|| {
                    linalg::transform_points3d(
                        black_box(&src_points),
                        &transform.rotation,
                        &transform.translation,
                        &mut dst_points,
                    )
                })
            },
        );

        group.bench_function(
            BenchmarkId::new("transform_point", &parameter_string),
            |b| {
                b.iter(|| {
                    for (dst, src) in dst_points.iter_mut().zip(black_box(&src_points).iter()) {
                        *dst = transform.transform_point(src);
                    }
                })
            },
        );
    }
}

fn bench_matmul33(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul33");

    let a_mat = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
    let b_mat = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
    let mut m_mat = [[0.0; 3]; 3];

    group.bench_function(BenchmarkId::new("matmul33", ""), |b| {
        b.iter(|| {
            linalg::matmul33(black_box(&a_mat), black_box(&b_mat), &mut m_mat);
        });
    });

    group.bench_function(BenchmarkId::new("determinant33", ""), |b| {
        b.iter(|| linalg::determinant33(black_box(&a_mat)));
    });
}

criterion_group!(benches, bench_transform_points3d, bench_matmul33);
criterion_main!(benches);
