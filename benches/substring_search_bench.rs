//! Substring search performance benchmarks
//!
//! Measures the first/last-byte filtered scanner against the naive
//! windows-based search across haystack sizes, needle lengths, and candidate
//! densities, for every tier reachable through configuration.

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use strfind::{SearchConfig, SubstringSearcher};

//==============================================================================
// TEST DATA GENERATION
//==============================================================================

/// Generate a reproducible pseudo-random haystack over a small alphabet
fn generate_haystack(size: usize) -> Vec<u8> {
    (0..size).map(|i| ((i * 17 + 13) % 23) as u8 + b'a').collect()
}

/// Haystack with the needle planted near the end, forcing a full scan
fn haystack_with_needle_at_end(size: usize, needle: &[u8]) -> Vec<u8> {
    let mut haystack = generate_haystack(size);
    let start = size - needle.len();
    haystack[start..].copy_from_slice(needle);
    haystack
}

fn naive_find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

//==============================================================================
// BENCHMARKS
//==============================================================================

/// Scan throughput by haystack size, needle planted at the end
fn bench_find_by_haystack_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("substring_search/haystack_size");
    let needle = b"}needle{";

    let searcher = SubstringSearcher::new();
    let scalar = SubstringSearcher::with_config(&SearchConfig::compat_preset())
        .expect("scalar config is valid");

    for size in [64usize, 256, 1024, 4096, 65536, 1 << 20] {
        let haystack = haystack_with_needle_at_end(size, needle);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("simd", size), &haystack, |b, h| {
            b.iter(|| black_box(searcher.find(black_box(h), black_box(needle))))
        });
        group.bench_with_input(BenchmarkId::new("scalar", size), &haystack, |b, h| {
            b.iter(|| black_box(scalar.find(black_box(h), black_box(needle))))
        });
        group.bench_with_input(BenchmarkId::new("naive", size), &haystack, |b, h| {
            b.iter(|| black_box(naive_find(black_box(h), black_box(needle))))
        });
    }

    group.finish();
}

/// Needle length sweep over a fixed haystack
fn bench_find_by_needle_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("substring_search/needle_length");
    let size = 65536;

    let searcher = SubstringSearcher::new();

    for needle_len in [1usize, 2, 4, 8, 16, 32, 64] {
        let needle: Vec<u8> = (0..needle_len).map(|i| (i % 26) as u8 + b'A').collect();
        let haystack = haystack_with_needle_at_end(size, &needle);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(needle_len),
            &haystack,
            |b, h| b.iter(|| black_box(searcher.find(black_box(h), black_box(&needle)))),
        );
    }

    group.finish();
}

/// Worst case for the filter: every lane is a candidate
fn bench_dense_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("substring_search/dense_candidates");
    let size = 65536;

    let searcher = SubstringSearcher::new();

    // All-'a' haystack with an absent needle whose first/last bytes match
    // everywhere; verification rejects every candidate
    let haystack = vec![b'a'; size];
    let needle = b"aba";
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("all_candidates_rejected", |b| {
        b.iter(|| black_box(searcher.find(black_box(&haystack), black_box(needle))))
    });

    // Sparse case for contrast: needle bytes absent from the haystack
    let needle = b"xyx";
    group.bench_function("no_candidates", |b| {
        b.iter(|| black_box(searcher.find(black_box(&haystack), black_box(needle))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_find_by_haystack_size,
    bench_find_by_needle_length,
    bench_dense_candidates
);
criterion_main!(benches);
