use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use imgeval_image::{Image, ImageSize};
use imgeval_metrics::{psnr, ssim, SsimConfig};

fn gradient(size: ImageSize, offset: usize) -> Image<f32, 3> {
    let data = (0..size.width * size.height * 3)
        .map(|i| ((i + offset) % 256) as f32 / 255.0)
        .collect();
    Image::new(size, data).unwrap()
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let image_sizes = vec![(256, 224), (512, 448), (1024, 896)];

    for (width, height) in image_sizes {
        let image_size = ImageSize { width, height };
        let id = format!("{}x{}", width, height);
        let image1 = gradient(image_size, 0);
        let image2 = gradient(image_size, 3);

        group.bench_with_input(
            BenchmarkId::new("psnr", &id),
            &(&image1, &image2),
            |b, i| b.iter(|| psnr(black_box(i.0), black_box(i.1), 1.0)),
        );

        let config = SsimConfig::default();
        group.bench_with_input(
            BenchmarkId::new("ssim", &id),
            &(&image1, &image2),
            |b, i| b.iter(|| ssim(black_box(i.0), black_box(i.1), &config)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
