//! Decoding benchmarks
//!
//! Discriminator-first decoding of structured values, and full parsing of
//! description documents in both on-disk formats.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trellis_benchmarks::{
    criterion_config, dependency_document, dependency_set, file_list_document, PACKAGE_COUNTS,
};
use trellis_config::{parse_dependencies, serialize_dependencies, DescriptionFormat};
use trellis_core::types::{DependencySet, FileSelector};

fn bench_dependency_set_from_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_set_from_value");

    for count in PACKAGE_COUNTS {
        group.throughput(Throughput::Elements(count as u64));
        let document = dependency_document(count);

        group.bench_with_input(BenchmarkId::new("packages", count), &document, |b, document| {
            b.iter(|| black_box(DependencySet::from_value(document).unwrap()));
        });
    }

    group.finish();
}

fn bench_file_selectors_from_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_selectors_from_value");

    for count in PACKAGE_COUNTS {
        group.throughput(Throughput::Elements(count as u64));
        let document = file_list_document(count);
        let items = document.as_array().cloned().unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("selectors", count), &items, |b, items| {
            b.iter(|| {
                let decoded: Vec<FileSelector> = items
                    .iter()
                    .map(|item| FileSelector::from_value(item).unwrap())
                    .collect();
                black_box(decoded)
            });
        });
    }

    group.finish();
}

fn bench_parse_description(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_description");

    for format in [DescriptionFormat::Toml, DescriptionFormat::Json] {
        for count in [10, 100] {
            let content = serialize_dependencies(&dependency_set(count), format).unwrap();
            let id = BenchmarkId::new(format!("{:?}", format).to_lowercase(), count);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(id, &content, |b, content| {
                b.iter(|| black_box(parse_dependencies(content, format, "bench").unwrap()));
            });
        }
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_dependency_set_from_value,
        bench_file_selectors_from_value,
        bench_parse_description
}
criterion_main!(benches);
