use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::{FoodStatus, ReplenishReason, ShoppingPriority};
use crate::store::{InventoryStore, ShoppingListStore};

/// Expire every active batch whose expiry date has passed and queue a
/// replenishment entry for each newly expired name. Both stores are mutated
/// against the single `now` snapshot, and the pass is idempotent: a second
/// run with no clock advance changes nothing.
pub fn sweep_expired(
    inventory: &mut InventoryStore,
    shopping: &mut ShoppingListStore,
    now: DateTime<Utc>,
) -> usize {
    let mut expired = 0;
    for item in inventory.iter_mut() {
        if item.status != FoodStatus::Active
            || item.current_quantity <= BigDecimal::zero()
            || item.expiry_date >= now
        {
            continue;
        }

        item.status = FoodStatus::Expired;
        item.current_quantity = BigDecimal::zero();
        expired += 1;
        info!(name = %item.name, "batch expired");

        shopping.push_replenishment(
            &item.name,
            &item.unit,
            ReplenishReason::Expired,
            ShoppingPriority::Urgente,
        );
    }
    expired
}
