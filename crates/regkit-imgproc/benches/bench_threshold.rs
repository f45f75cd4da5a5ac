use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use regkit_image::{Image, ImageSize};
use regkit_imgproc::{histogram::compute_histogram, threshold};

fn bench_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("Threshold");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = ImageSize {
            width: *width,
            height: *height,
        };

        let image_data = (0..image_size.width * image_size.height)
            .map(|_| rand::random::<u8>())
            .collect::<Vec<_>>();
        let image = Image::new(image_size, image_data).unwrap();
        let mut output = Image::from_size_val(image_size, 0u8).unwrap();
        let mut hist = vec![0; 256];

        group.bench_with_input(
            BenchmarkId::new("compute_histogram", &parameter_string),
            &image,
            |b, i| b.iter(|| compute_histogram(black_box(i), &mut hist, 256)),
        );

        group.bench_with_input(
            BenchmarkId::new("otsu_threshold", &parameter_string),
            &image,
            |b, i| b.iter(|| threshold::otsu_threshold(black_box(i))),
        );

        group.bench_with_input(
            BenchmarkId::new("segment_otsu", &parameter_string),
            &image,
            |b, i| b.iter(|| threshold::segment_otsu(black_box(i), &mut output)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_threshold);
criterion_main!(benches);
