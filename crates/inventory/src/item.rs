use serde::{Deserialize, Serialize};

use opsboard_core::ItemId;

/// Category of a trackable item.
///
/// Ledger entries, reorder policies and lots all point at exactly one item of
/// one of these kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemKind {
    Sku,
    Ingredient,
    Packaging,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Sku => "SKU",
            ItemKind::Ingredient => "INGREDIENT",
            ItemKind::Packaging => "PACKAGING",
        }
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a trackable item (kind + id).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: ItemId,
}

impl ItemRef {
    pub fn new(kind: ItemKind, id: ItemId) -> Self {
        Self { kind, id }
    }

    pub fn sku(id: ItemId) -> Self {
        Self::new(ItemKind::Sku, id)
    }

    pub fn ingredient(id: ItemId) -> Self {
        Self::new(ItemKind::Ingredient, id)
    }

    pub fn packaging(id: ItemId) -> Self {
        Self::new(ItemKind::Packaging, id)
    }
}

impl core::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_upper_case() {
        let json = serde_json::to_string(&ItemKind::Packaging).unwrap();
        assert_eq!(json, "\"PACKAGING\"");
        let back: ItemKind = serde_json::from_str("\"INGREDIENT\"").unwrap();
        assert_eq!(back, ItemKind::Ingredient);
    }

    #[test]
    fn display_includes_kind() {
        let item = ItemRef::sku(ItemId::new());
        assert!(item.to_string().starts_with("SKU "));
    }
}
