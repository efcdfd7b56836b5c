use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use shopsync_core::{InventoryRecord, serialize};
use shopsync_infra::RawInventoryRow;

fn sample_rows(count: usize) -> Vec<RawInventoryRow> {
    (0..count)
        .map(|i| {
            let record = InventoryRecord::new(
                "Бытовая химия",
                format!("Средство для мытья посуды {i}"),
                format!("БХ-{i:06}"),
                format!("{}.{:02}", 10 + i % 500, i % 100),
                1 + (i % 40) as i64,
            );
            RawInventoryRow::encode(&record).unwrap()
        })
        .collect()
}

/// Legacy code page normalization of scanned rows.
fn bench_row_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_decoding");

    for size in [100usize, 1_000, 10_000] {
        let rows = sample_rows(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let records: Vec<InventoryRecord> = rows
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(i, row)| row.decode(i).unwrap())
                    .collect();
                black_box(records)
            });
        });
    }

    group.finish();
}

/// Document serialization of decoded records.
fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    for size in [100usize, 1_000, 10_000] {
        let records: Vec<InventoryRecord> = sample_rows(size)
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.decode(i).unwrap())
            .collect();
        let bytes = serialize(&records).unwrap().len();

        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| black_box(serialize(records).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_row_decoding, bench_serialization);
criterion_main!(benches);
