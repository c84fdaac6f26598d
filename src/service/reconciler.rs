use bigdecimal::{BigDecimal, Zero};
use tracing::{debug, warn};

use crate::models::{ConsumptionOutcome, ConsumptionRecord, FoodStatus, ReplenishReason, ShoppingPriority};
use crate::store::{InventoryStore, ShoppingListStore};

/// Apply one batch of consumption records against the store.
///
/// For each (name, quantity) pair: matching batches are consumed earliest
/// expiry first, each giving up `min(current_quantity, remaining)`. A batch
/// that hits exactly zero becomes `Consumed` and queues a deduplicated
/// `finished` entry. Demand beyond available stock is dropped; inventory
/// never goes negative.
pub fn apply_consumption(
    inventory: &mut InventoryStore,
    shopping: &mut ShoppingListStore,
    records: &[ConsumptionRecord],
) -> Vec<ConsumptionOutcome> {
    let mut outcomes = Vec::with_capacity(records.len());

    for record in records {
        if record.quantity <= BigDecimal::zero() {
            warn!(name = %record.name, "skipping non-positive consumption quantity");
            outcomes.push(ConsumptionOutcome {
                name: record.name.clone(),
                requested: record.quantity.clone(),
                consumed: BigDecimal::zero(),
                drained_batches: 0,
                unmatched: BigDecimal::zero(),
            });
            continue;
        }

        // 1. Candidate batches, earliest expiry first.
        let candidates = inventory.match_by_name(&record.name);

        // 2. Walk the ordered batches, decrementing until the demand is met.
        let mut remaining = record.quantity.clone();
        let mut consumed = BigDecimal::zero();
        let mut drained_batches = 0;

        for id in candidates {
            if remaining <= BigDecimal::zero() {
                break;
            }
            let Some(item) = inventory.get_mut(id) else {
                continue;
            };

            let take = if item.current_quantity < remaining {
                item.current_quantity.clone()
            } else {
                remaining.clone()
            };

            item.current_quantity -= &take;
            remaining -= &take;
            consumed += &take;

            // 3. Exactly-drained batches leave the active pool and queue a
            //    replenishment suggestion.
            if item.current_quantity.is_zero() {
                item.status = FoodStatus::Consumed;
                drained_batches += 1;
                let name = item.name.clone();
                let unit = item.unit.clone();
                shopping.push_replenishment(
                    &name,
                    &unit,
                    ReplenishReason::Finished,
                    ShoppingPriority::Normal,
                );
            }
        }

        // 4. Excess demand is deliberately dropped, not an error.
        if remaining > BigDecimal::zero() {
            debug!(name = %record.name, unmatched = %remaining, "consumption exceeded stock, dropping excess");
        }

        outcomes.push(ConsumptionOutcome {
            name: record.name.clone(),
            requested: record.quantity.clone(),
            consumed,
            drained_batches,
            unmatched: remaining,
        });
    }

    outcomes
}
