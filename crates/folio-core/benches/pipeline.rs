//! Benchmarks for the scan and compression pipeline.
//!
//! Run with: cargo bench -p folio-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_core::pipeline::dimensions::scan_jpeg_header;
use folio_core::pipeline::{encode, Hasher};
use folio_core::{format_size, Config, Scanner};
use image::DynamicImage;

fn benchmark_content_hash(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    std::fs::write(&path, vec![0xA5u8; 4 * 1024 * 1024]).unwrap();

    c.bench_function("content_hash_4mib", |b| {
        b.iter(|| {
            let _ = Hasher::content_hash(black_box(&path));
        })
    });
}

fn benchmark_jpeg_header(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1920, 1080);
    let bytes = encode::encode_jpeg(&img, 85).unwrap();

    c.bench_function("jpeg_header_scan", |b| {
        b.iter(|| scan_jpeg_header(black_box(&bytes[..])))
    });
}

fn benchmark_thumbnail(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1920, 1080);

    c.bench_function("thumbnail_300px", |b| {
        b.iter(|| {
            let thumb = encode::fit_within(black_box(img.clone()), 300, 300, None);
            let _ = encode::encode_jpeg(&thumb, 85);
        })
    });
}

fn benchmark_format_size(c: &mut Criterion) {
    c.bench_function("format_size", |b| {
        b.iter(|| format_size(black_box(3_456_789_012)))
    });
}

fn benchmark_scan(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("album")).unwrap();
    for i in 0..20 {
        image::RgbImage::new(64, 48)
            .save(dir.path().join(format!("album/photo_{i:02}.png")))
            .unwrap();
    }

    let mut config = Config::default();
    config.thumbnail.enabled = false;
    let scanner = Scanner::new(dir.path(), &config).unwrap();

    c.bench_function("scan_20_images", |b| b.iter(|| scanner.scan()));
}

criterion_group!(
    benches,
    benchmark_content_hash,
    benchmark_jpeg_header,
    benchmark_thumbnail,
    benchmark_format_size,
    benchmark_scan,
);
criterion_main!(benches);
