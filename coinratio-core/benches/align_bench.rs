use coinratio_core::{align_and_ratio, align_by_date, AssetCatalogEntry, PricePoint, PriceSeries, SymbolMap};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const HOUR_MS: i64 = 3_600_000;
const JAN_1: i64 = 1_704_067_200_000;

/// A year of hourly samples.
fn hourly_year(base: f64) -> PriceSeries {
    (0..24 * 365)
        .map(|i| PricePoint::new(JAN_1 + i as i64 * HOUR_MS, base + (i % 97) as f64))
        .collect()
}

/// Catalog sized like the real one, with frequent symbol collisions.
fn catalog() -> Vec<AssetCatalogEntry> {
    (0..15_000)
        .map(|i| {
            AssetCatalogEntry::new(
                format!("asset-{i}-{}", "x".repeat(i % 7)),
                format!("s{}", i % 4_000),
                format!("Asset {i}"),
            )
        })
        .collect()
}

fn bench_symbol_map(c: &mut Criterion) {
    let entries = catalog();
    c.bench_function("symbol_map_15k", |b| {
        b.iter(|| SymbolMap::from_catalog(black_box(&entries)))
    });
}

fn bench_align(c: &mut Criterion) {
    let a = hourly_year(40_000.0);
    let b = hourly_year(2_000.0);

    c.bench_function("align_position_hourly_year", |bch| {
        bch.iter(|| align_and_ratio(black_box(&a), black_box(&b), 90))
    });
    c.bench_function("align_date_hourly_year", |bch| {
        bch.iter(|| align_by_date(black_box(&a), black_box(&b), 90))
    });
}

criterion_group!(benches, bench_symbol_map, bench_align);
criterion_main!(benches);
