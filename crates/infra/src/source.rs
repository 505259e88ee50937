//! Narrow read interface over the external inventory store.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use opsboard_core::{DomainError, DomainResult, TransactionId};
use opsboard_inventory::{InventoryTransaction, ItemRef, Lot, ReorderPolicy};

/// Read-only snapshot access used by the stock-signal service.
///
/// Implementations wrap whatever store owns the ledger; the calculator never
/// talks to storage directly.
pub trait InventorySource: Send + Sync {
    /// Every item that has ledger entries, a policy or lots.
    fn items(&self) -> Vec<ItemRef>;
    /// Ledger entries for one item, in recorded order.
    fn transactions(&self, item: &ItemRef) -> Vec<InventoryTransaction>;
    fn reorder_policy(&self, item: &ItemRef) -> Option<ReorderPolicy>;
    fn lots(&self, item: &ItemRef) -> Vec<Lot>;
}

impl<S> InventorySource for Arc<S>
where
    S: InventorySource + ?Sized,
{
    fn items(&self) -> Vec<ItemRef> {
        (**self).items()
    }

    fn transactions(&self, item: &ItemRef) -> Vec<InventoryTransaction> {
        (**self).transactions(item)
    }

    fn reorder_policy(&self, item: &ItemRef) -> Option<ReorderPolicy> {
        (**self).reorder_policy(item)
    }

    fn lots(&self, item: &ItemRef) -> Vec<Lot> {
        (**self).lots(item)
    }
}

#[derive(Debug, Default)]
struct Tables {
    ledger: HashMap<ItemRef, Vec<InventoryTransaction>>,
    recorded: HashSet<TransactionId>,
    policies: HashMap<ItemRef, ReorderPolicy>,
    lots: HashMap<ItemRef, Vec<Lot>>,
}

/// In-memory inventory store for tests/dev.
///
/// The ledger is append-only: recording an entry id twice is a conflict.
#[derive(Debug, Default)]
pub struct InMemoryInventorySource {
    inner: RwLock<Tables>,
}

impl InMemoryInventorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, txn: InventoryTransaction) -> DomainResult<()> {
        let mut tables = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("inventory store lock poisoned"))?;

        if !tables.recorded.insert(txn.id) {
            return Err(DomainError::conflict(format!(
                "transaction {} already recorded",
                txn.id
            )));
        }
        tables.ledger.entry(txn.item).or_default().push(txn);
        Ok(())
    }

    pub fn record_all(
        &self,
        txns: impl IntoIterator<Item = InventoryTransaction>,
    ) -> DomainResult<()> {
        for txn in txns {
            self.record(txn)?;
        }
        Ok(())
    }

    pub fn set_policy(&self, item: ItemRef, policy: ReorderPolicy) {
        if let Ok(mut tables) = self.inner.write() {
            tables.policies.insert(item, policy);
        }
    }

    pub fn add_lot(&self, lot: Lot) {
        if let Ok(mut tables) = self.inner.write() {
            tables.lots.entry(lot.item).or_default().push(lot);
        }
    }
}

impl InventorySource for InMemoryInventorySource {
    fn items(&self) -> Vec<ItemRef> {
        let tables = match self.inner.read() {
            Ok(t) => t,
            Err(_) => return vec![],
        };

        let items: BTreeSet<ItemRef> = tables
            .ledger
            .keys()
            .chain(tables.policies.keys())
            .chain(tables.lots.keys())
            .copied()
            .collect();
        items.into_iter().collect()
    }

    fn transactions(&self, item: &ItemRef) -> Vec<InventoryTransaction> {
        self.inner
            .read()
            .ok()
            .and_then(|t| t.ledger.get(item).cloned())
            .unwrap_or_default()
    }

    fn reorder_policy(&self, item: &ItemRef) -> Option<ReorderPolicy> {
        self.inner.read().ok()?.policies.get(item).cloned()
    }

    fn lots(&self, item: &ItemRef) -> Vec<Lot> {
        self.inner
            .read()
            .ok()
            .and_then(|t| t.lots.get(item).cloned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use opsboard_core::ItemId;
    use opsboard_inventory::TransactionKind;

    #[test]
    fn duplicate_entries_are_conflicts() {
        let source = InMemoryInventorySource::new();
        let item = ItemRef::sku(ItemId::new());
        let txn = InventoryTransaction::receipt(item, 10.0, 2.0, Utc::now()).unwrap();

        source.record(txn.clone()).unwrap();
        let err = source.record(txn).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(source.transactions(&item).len(), 1);
    }

    #[test]
    fn ledger_keeps_recorded_order_per_item() {
        let source = InMemoryInventorySource::new();
        let a = ItemRef::sku(ItemId::new());
        let b = ItemRef::packaging(ItemId::new());
        let now = Utc::now();

        let first = InventoryTransaction::new(a, TransactionKind::Receipt, 5.0, 1.0, now);
        let second =
            InventoryTransaction::new(a, TransactionKind::Sale, 2.0, 0.0, now - Duration::days(1));
        let other = InventoryTransaction::new(b, TransactionKind::Receipt, 1.0, 1.0, now);
        source
            .record_all([first.clone(), second.clone(), other])
            .unwrap();

        let ids: Vec<_> = source.transactions(&a).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn items_union_all_tables_without_duplicates() {
        let source = InMemoryInventorySource::new();
        let with_ledger = ItemRef::sku(ItemId::new());
        let with_policy = ItemRef::ingredient(ItemId::new());
        let now = Utc::now();

        source
            .record(InventoryTransaction::receipt(with_ledger, 1.0, 1.0, now).unwrap())
            .unwrap();
        source.set_policy(with_ledger, ReorderPolicy::new(1.0, 2.0, 0.0));
        source.set_policy(with_policy, ReorderPolicy::new(10.0, 50.0, 5.0));

        let mut expected = vec![with_ledger, with_policy];
        expected.sort();
        assert_eq!(source.items(), expected);
    }

    #[test]
    fn unknown_item_reads_are_empty() {
        let source = InMemoryInventorySource::new();
        let item = ItemRef::sku(ItemId::new());
        assert!(source.transactions(&item).is_empty());
        assert!(source.lots(&item).is_empty());
        assert!(source.reorder_policy(&item).is_none());
    }

    #[test]
    fn shared_source_reads_through_arc() {
        let source = Arc::new(InMemoryInventorySource::new());
        let item = ItemRef::sku(ItemId::new());
        source.set_policy(item, ReorderPolicy::new(1.0, 2.0, 0.0));

        let dynamic: Arc<dyn InventorySource> = source.clone();
        assert!(dynamic.reorder_policy(&item).is_some());
    }
}
