use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;

use crate::models::{FoodStatus, WasteEntry, WasteReport};
use crate::store::InventoryStore;

/// Aggregate terminal-state batches into the waste report. Pure read,
/// recomputed on every call.
///
/// Grouping is case-insensitive under the first-seen display name; ties in
/// value keep first-seen order, so the breakdown is deterministic.
pub fn waste_report(inventory: &InventoryStore) -> WasteReport {
    let mut total = BigDecimal::zero();
    let mut grouped: IndexMap<String, WasteEntry> = IndexMap::new();
    let mut items_saved = 0;

    for item in inventory.items() {
        match item.status {
            FoodStatus::Spoiled | FoodStatus::Expired => {
                total += &item.estimated_value;
                let entry = grouped
                    .entry(item.name.to_lowercase())
                    .or_insert_with(|| WasteEntry {
                        name: item.name.clone(),
                        value: BigDecimal::zero(),
                    });
                entry.value += &item.estimated_value;
            }
            FoodStatus::Consumed => items_saved += 1,
            FoodStatus::Active => {}
        }
    }

    let mut by_name: Vec<WasteEntry> = grouped.into_values().collect();
    by_name.sort_by(|a, b| b.value.cmp(&a.value));

    WasteReport {
        total_waste_value: total,
        items_saved,
        by_name,
    }
}
