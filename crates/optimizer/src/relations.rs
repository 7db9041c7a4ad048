//! Which structure types belong near each other.

use baseiq_core::ItemType;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Directed relatedness between item types, plus the hub type.
///
/// Relations are not symmetrised: `a -> b` says nothing about `b -> a`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelationTable {
    related: BTreeMap<ItemType, Vec<ItemType>>,
    hub: ItemType,
}

impl Default for RelationTable {
    /// The production-chain table with the palbox as hub.
    fn default() -> Self {
        Self::new(ItemType::PALBOX)
            .with_relations(
                ItemType::FOOD_BOX,
                [ItemType::FOOD_PLOT, ItemType::COOKING_POT],
            )
            .with_relations(
                ItemType::FOOD_PLOT,
                [ItemType::FOOD_BOX, ItemType::COOKING_POT],
            )
            .with_relations(
                ItemType::POWER_GENERATOR,
                [ItemType::ACCUMULATOR, ItemType::WORKBENCH],
            )
            .with_relations(
                ItemType::WORKBENCH,
                [ItemType::POWER_GENERATOR, ItemType::STORAGE],
            )
            .with_relations(ItemType::STORAGE, [ItemType::WORKBENCH, ItemType::FURNACE])
    }
}

impl RelationTable {
    /// Creates a table with no relations.
    pub fn new(hub: ItemType) -> Self {
        Self {
            related: BTreeMap::new(),
            hub,
        }
    }

    /// Adds `from -> to` for every type in `to`.
    pub fn with_relations(
        mut self,
        from: ItemType,
        to: impl IntoIterator<Item = ItemType>,
    ) -> Self {
        let entry = self.related.entry(from).or_default();
        for t in to {
            if !entry.contains(&t) {
                entry.push(t);
            }
        }
        self
    }

    /// Types related to `item_type`.
    pub fn related(&self, item_type: &ItemType) -> &[ItemType] {
        self.related.get(item_type).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `to` is in the related set of `from`.
    pub fn is_related(&self, from: &ItemType, to: &ItemType) -> bool {
        self.related(from).contains(to)
    }

    /// The type marking the base anchor.
    pub fn hub_type(&self) -> &ItemType {
        &self.hub
    }

    /// Returns true if `item_type` is the hub type.
    pub fn is_hub(&self, item_type: &ItemType) -> bool {
        *item_type == self.hub
    }
}
