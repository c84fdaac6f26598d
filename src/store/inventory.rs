use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::FoodItem;

/// Authoritative collection of food batches. Items are appended and mutated
/// in place, never removed; zero-quantity batches are the consumption and
/// waste history.
#[derive(Debug, Default)]
pub struct InventoryStore {
    items: Vec<FoodItem>,
}

impl InventoryStore {
    pub fn insert_batch(&mut self, batch: Vec<FoodItem>) {
        self.items.extend(batch);
    }

    pub fn get(&self, id: Uuid) -> Option<&FoodItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut FoodItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FoodItem> + '_ {
        self.items.iter_mut()
    }

    /// Consumable batches for a name (case-insensitive, quantity left),
    /// earliest expiry first.
    pub fn match_by_name(&self, name: &str) -> Vec<Uuid> {
        let mut matches: Vec<(Uuid, DateTime<Utc>)> = self
            .items
            .iter()
            .filter(|i| i.current_quantity > BigDecimal::zero() && i.matches_name(name))
            .map(|i| (i.id, i.expiry_date))
            .collect();
        matches.sort_by_key(|(_, expiry)| *expiry);
        matches.into_iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
