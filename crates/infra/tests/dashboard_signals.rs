//! End-to-end: ledger rows as a store would hand them over, through the
//! read interface, into dashboard-ready signals.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use opsboard_core::ItemId;
use opsboard_infra::{InMemoryInventorySource, InventorySource, SignalConfig, StockSignalService};
use opsboard_inventory::{
    convert_str, parse_date, InventoryTransaction, ItemRef, Lot, ReorderPolicy, ReorderStatus,
    TransactionKind,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap()
}

fn setup() -> (Arc<InMemoryInventorySource>, ItemRef, ItemRef) {
    opsboard_observability::init();

    let source = Arc::new(InMemoryInventorySource::new());
    let thrive = ItemRef::sku(ItemId::new());
    let pineapple = ItemRef::ingredient(ItemId::new());

    // Initial stock with varying costs, then two weeks of sales.
    source
        .record_all([
            InventoryTransaction::receipt(thrive, 100.0, 9.0, now() - Duration::days(30)).unwrap(),
            InventoryTransaction::receipt(thrive, 100.0, 9.5, now() - Duration::days(15)).unwrap(),
            InventoryTransaction::new(
                thrive,
                TransactionKind::Sale,
                80.0,
                0.0,
                now() - Duration::days(7),
            ),
            InventoryTransaction::new(
                thrive,
                TransactionKind::Return,
                2.0,
                0.0,
                now() - Duration::days(2),
            ),
        ])
        .unwrap();

    // Ingredient received in grams but tracked in kilograms.
    let received_kg = convert_str(12_000.0, "g", "kg").unwrap();
    source
        .record_all([
            InventoryTransaction::receipt(pineapple, received_kg, 8.5, now() - Duration::days(3))
                .unwrap(),
            InventoryTransaction::new(
                pineapple,
                TransactionKind::Consume,
                4.0,
                0.0,
                now() - Duration::days(1),
            ),
        ])
        .unwrap();

    source.set_policy(thrive, ReorderPolicy::new(50.0, 200.0, 25.0));
    source.set_policy(pineapple, ReorderPolicy::new(10.0, 50.0, 5.0).with_lead_time_days(14.0));

    source.add_lot(
        Lot::new(
            thrive,
            "LOT003",
            60.0,
            parse_date("2023-12-10").unwrap(),
            parse_date("2024-01-28").unwrap(),
        )
        .unwrap(),
    );
    source.add_lot(
        Lot::new(
            thrive,
            "LOT004",
            62.0,
            parse_date("2023-12-20").unwrap(),
            parse_date("2024-02-15").unwrap(),
        )
        .unwrap(),
    );

    (source, thrive, pineapple)
}

#[test]
fn dashboard_view_from_in_memory_store() {
    let (source, thrive, pineapple) = setup();
    let service = StockSignalService::new(source.clone(), SignalConfig::default());

    let sku = service.item_signal(&thrive, now()).unwrap();
    assert_eq!(sku.on_hand, 122.0);
    assert_eq!(sku.average_unit_cost, 9.25);
    assert_eq!(sku.reorder_status, ReorderStatus::Good);
    assert_eq!(sku.suggested_order_qty, 0.0);

    let ingredient = service.item_signal(&pineapple, now()).unwrap();
    assert_eq!(ingredient.on_hand, 8.0);
    assert_eq!(ingredient.reorder_status, ReorderStatus::ReorderNow);
    assert_eq!(ingredient.suggested_order_qty, 42.0);

    let flags = service.reorder_flags(now()).unwrap();
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].item, pineapple);

    let expiring: Vec<_> = service
        .expiring_lots(now())
        .into_iter()
        .map(|l| (l.code, l.days_left, l.expiring_soon))
        .collect();
    assert_eq!(
        expiring,
        vec![
            ("LOT003".to_string(), 24, true),
            ("LOT004".to_string(), 42, false),
        ]
    );

    assert_eq!(source.items().len(), 2);
}

#[test]
fn signals_serialize_for_presentation() {
    let (source, thrive, _) = setup();
    let service = StockSignalService::new(source, SignalConfig::default());

    let signal = service.item_signal(&thrive, now()).unwrap();
    let json = serde_json::to_value(&signal).unwrap();
    assert_eq!(json["reorder_status"], "good");
    assert_eq!(json["item"]["kind"], "SKU");
    assert_eq!(json["lots"][0]["band"], "critical");
}
