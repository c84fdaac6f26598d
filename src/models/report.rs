use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::food::FoodItem;

/// Waste accumulated by one food name.
#[derive(Debug, Clone, Serialize)]
pub struct WasteEntry {
    pub name: String,
    pub value: BigDecimal,
}

/// Snapshot aggregation over terminal-state items. Recomputed on demand,
/// never cached.
#[derive(Debug, Clone, Serialize)]
pub struct WasteReport {
    pub total_waste_value: BigDecimal,
    pub items_saved: usize, // fully consumed batches
    pub by_name: Vec<WasteEntry>,
}

/// Per-pair result of a consumption reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionOutcome {
    pub name: String,
    pub requested: BigDecimal,
    pub consumed: BigDecimal,
    pub drained_batches: usize, // batches that hit exactly zero
    pub unmatched: BigDecimal,  // requested beyond available stock, dropped
}

/// A food batch plus the derived display classification the clients show.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryEntry {
    #[serde(flatten)]
    pub item: FoodItem,
    pub days_left: i64,
    pub near_expiry: bool,
}

impl InventoryEntry {
    pub fn derive(item: FoodItem, now: DateTime<Utc>, alert_days_before: u32) -> Self {
        let days_left = days_until(item.expiry_date, now);
        let near_expiry = days_left > 0 && days_left <= i64::from(alert_days_before);
        Self {
            item,
            days_left,
            near_expiry,
        }
    }
}

/// Whole days remaining, rounded up; zero or negative means overdue.
fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (expiry - now).num_seconds();
    (secs as f64 / 86_400.0).ceil() as i64
}
