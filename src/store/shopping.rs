use uuid::Uuid;

use crate::models::{ReplenishReason, ShoppingListItem, ShoppingPriority};

/// The replenishment list. Derived entries (finished/spoiled/expired) are
/// deduplicated by case-insensitive name; manual entries are appended as-is.
#[derive(Debug, Default)]
pub struct ShoppingListStore {
    entries: Vec<ShoppingListItem>,
}

impl ShoppingListStore {
    pub fn entries(&self) -> &[ShoppingListItem] {
        &self.entries
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.entries.iter().any(|e| e.name.to_lowercase() == needle)
    }

    fn find_by_name_mut(&mut self, name: &str) -> Option<&mut ShoppingListItem> {
        let needle = name.to_lowercase();
        self.entries
            .iter_mut()
            .find(|e| e.name.to_lowercase() == needle)
    }

    /// Append a derived entry unless one already exists for the name.
    /// Returns whether an entry was added.
    pub fn push_replenishment(
        &mut self,
        name: &str,
        unit: &str,
        reason: ReplenishReason,
        priority: ShoppingPriority,
    ) -> bool {
        if self.contains_name(name) {
            return false;
        }
        self.entries.push(ShoppingListItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            suggested_quantity: 1,
            unit: unit.to_string(),
            reason,
            priority,
        });
        true
    }

    /// Spoilage always wins: upgrade an existing same-name entry in place,
    /// or append a fresh urgent one. Never duplicates.
    pub fn upsert_spoiled(&mut self, name: &str, unit: &str) {
        if let Some(entry) = self.find_by_name_mut(name) {
            entry.priority = ShoppingPriority::Urgente;
            entry.reason = ReplenishReason::Spoiled;
            return;
        }
        self.push_replenishment(
            name,
            unit,
            ReplenishReason::Spoiled,
            ShoppingPriority::Urgente,
        );
    }

    /// Manual user addition. No deduplication here, duplicates are allowed.
    pub fn push_manual(&mut self, name: &str) -> ShoppingListItem {
        let entry = ShoppingListItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            suggested_quantity: 1,
            unit: "unidade".to_string(),
            reason: ReplenishReason::Manual,
            priority: ShoppingPriority::Normal,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Change the suggested quantity by `delta`, floored at 1.
    pub fn adjust_quantity(&mut self, id: Uuid, delta: i32) -> Option<&ShoppingListItem> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        let adjusted = i64::from(entry.suggested_quantity) + i64::from(delta);
        entry.suggested_quantity = adjusted.max(1) as u32;
        Some(&*entry)
    }

    pub fn set_priority(
        &mut self,
        id: Uuid,
        priority: ShoppingPriority,
    ) -> Option<&ShoppingListItem> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.priority = priority;
        Some(&*entry)
    }

    /// Remove one entry. Missing ids are ignored (idempotent delete).
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
