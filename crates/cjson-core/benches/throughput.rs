use cjson_core::{parse, to_string_compact, Json};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// A quote table shaped like a market data feed: `rows` objects with a few
/// string, integer and real fields each.
fn quote_table(rows: usize) -> Json {
    let mut table = Json::new_array();
    for i in 0..rows {
        let mut row = Json::new();
        row["symbol"] = format!("SYM{i:05}").into();
        row["volume"] = (i as i64 * 1_000 + 7).into();
        row["price"] = (i as f64 * 0.25 + 10.5).into();
        row["tags"] = Json::from(["equity", "nasdaq"]);
        row["halted"] = (i % 17 == 0).into();
        table.push(row).unwrap();
    }
    table
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for rows in [10, 1_000] {
        let text = quote_table(rows).serialize();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &text, |b, text| {
            b.iter(|| parse(black_box(text)).unwrap());
        });
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let table = quote_table(1_000);
    group.bench_function("indented", |b| b.iter(|| black_box(&table).serialize()));
    group.bench_function("compact", |b| {
        b.iter(|| to_string_compact(black_box(&table)).unwrap())
    });
    group.finish();
}

criterion_group!(throughput, bench_parse, bench_serialize);
criterion_main!(throughput);
