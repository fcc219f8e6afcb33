//! Benchmark suite for PRS image decoding
//!
//! This benchmark measures the performance of PRS decompression and helps
//! identify hot paths in the decoder.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use marble_benches::{generate_test_prs_data, sizes};
use marble_types::file::prs::{File, Header};
use std::hint::black_box;

/// Benchmark PRS decompression over synthetic images
fn bench_decompress(c: &mut Criterion) {
	let mut group = c.benchmark_group("prs_decompress");

	let cases = vec![
		("tiny_rgb", sizes::TINY, 3u8, 0x80u8),
		("small_rgb", sizes::SMALL, 3, 0x80),
		("game_rgb", sizes::GAME, 3, 0x80),
		("game_rgba", sizes::GAME, 4, 0x80),
		("game_rgb_flat", sizes::GAME, 3, 0x00),
	];

	for (name, (width, height), bpp, flag) in cases {
		let data = generate_test_prs_data(width, height, bpp, flag);

		let pixels = u64::from(width) * u64::from(height);
		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(BenchmarkId::new("decompress", name), &data, |b, data| {
			b.iter(|| {
				let result = File::from_bytes(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark header parsing separately
fn bench_header_parsing(c: &mut Criterion) {
	let mut group = c.benchmark_group("prs_header");

	let data = generate_test_prs_data(sizes::TINY.0, sizes::TINY.1, 3, 0x80);

	group.bench_function("parse_header", |b| {
		b.iter(|| {
			let result = Header::from_bytes(black_box(&data));
			black_box(result)
		});
	});

	group.finish();
}

criterion_group!(benches, bench_decompress, bench_header_parsing);
criterion_main!(benches);
