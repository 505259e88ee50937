use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, Utc};
use opsboard_core::ItemId;
use opsboard_inventory::{
    on_hand_quantity, weighted_average_cost, InventoryTransaction, ItemRef, TransactionKind,
};

/// Mixed ledger: every fourth entry is a receipt, the rest are demand/adjustments.
fn build_ledger(len: usize) -> Vec<InventoryTransaction> {
    let item = ItemRef::sku(ItemId::new());
    let start = Utc::now() - Duration::days(365);
    (0..len)
        .map(|i| {
            let kind = match i % 4 {
                0 => TransactionKind::Receipt,
                1 => TransactionKind::Sale,
                2 => TransactionKind::Consume,
                _ => TransactionKind::Adjust,
            };
            // shuffle timestamps a little so the sort has work to do
            let offset = ((i * 7919) % len) as i64;
            InventoryTransaction::new(
                item,
                kind,
                (i % 50 + 1) as f64,
                8.5 + (i % 13) as f64 * 0.25,
                start + Duration::minutes(offset),
            )
        })
        .collect()
}

fn bench_weighted_average_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_average_cost");

    for size in [100usize, 1_000, 10_000, 100_000] {
        let ledger = build_ledger(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| weighted_average_cost(black_box(ledger)));
        });
    }

    group.finish();
}

fn bench_on_hand_quantity(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_hand_quantity");

    for size in [1_000usize, 100_000] {
        let ledger = build_ledger(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| on_hand_quantity(black_box(ledger)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_weighted_average_cost, bench_on_hand_quantity);
criterion_main!(benches);
