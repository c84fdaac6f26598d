use std::sync::Arc;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use super::analytics::waste_report;
use super::reconciler::apply_consumption;
use super::sweeper::sweep_expired;
use crate::error::AppError;
use crate::gateway::ExtractionGateway;
use crate::models::{
    AcquisitionInput, AcquisitionSource, ConsumptionOutcome, FoodItem, FoodStatus,
    IdentifiedFood, InventoryEntry, StorageType, UserProfile, WasteReport,
};
use crate::store::AppStore;

/// Inventory operations: acquisition registration, consumption, spoilage,
/// expiry sweeping and the read-side views.
///
/// Every mutation is one write critical section over the shared store, so
/// multi-item walks are never observed half-applied. The gateway is called
/// before the lock is taken, and `extraction_gate` keeps at most one
/// extraction call in flight.
pub struct InventoryService {
    gateway: Arc<dyn ExtractionGateway>,
    store: Arc<RwLock<AppStore>>,
    extraction_gate: Mutex<()>,
}

impl InventoryService {
    pub fn new(gateway: Arc<dyn ExtractionGateway>, store: Arc<RwLock<AppStore>>) -> Self {
        Self {
            gateway,
            store,
            extraction_gate: Mutex::new(()),
        }
    }

    /// Register an acquisition. The whole gateway response lands as one
    /// batch, or not at all: a gateway failure leaves the store untouched.
    pub async fn register_acquisition(
        &self,
        input: AcquisitionInput,
    ) -> Result<Vec<FoodItem>, AppError> {
        if let AcquisitionSource::Text(text) = &input.source {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
        }

        let _inflight = self.extraction_gate.lock().await;

        // 1. Extraction, outside the store lock.
        let records = self.gateway.extract_acquisitions(&input).await?;
        if records.is_empty() {
            info!("gateway confirmed zero acquisition records");
            return Ok(Vec::new());
        }

        // 2. Synthesize the batch against one `now`.
        let now = Utc::now();
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            if record.quantity <= BigDecimal::zero() {
                warn!(name = %record.name, "dropping acquisition record with non-positive quantity");
                continue;
            }
            items.push(synthesize_item(record, input.storage_override, now));
        }

        // 3. Insert and sweep in the same transaction.
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        store.inventory.insert_batch(items.clone());
        let expired = sweep_expired(&mut store.inventory, &mut store.shopping, now);
        drop(guard);

        info!(
            registered = items.len(),
            expired, "acquisition batch registered"
        );
        Ok(items)
    }

    /// Interpret a consumption statement and reconcile it against the store.
    /// Empty input is a no-op that never reaches the gateway.
    pub async fn consume(&self, text: &str) -> Result<Vec<ConsumptionOutcome>, AppError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let _inflight = self.extraction_gate.lock().await;

        let records = self.gateway.extract_consumption(text).await?;
        if records.is_empty() {
            info!("gateway found no consumption records");
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        // Consumption runs against a post-sweep snapshot: overdue batches
        // must not be consumable.
        sweep_expired(&mut store.inventory, &mut store.shopping, now);
        let outcomes = apply_consumption(&mut store.inventory, &mut store.shopping, &records);
        drop(guard);

        info!(pairs = outcomes.len(), "consumption reconciled");
        Ok(outcomes)
    }

    /// Mark a batch as spoiled. A direct user assertion: quantity is zeroed
    /// no matter what it was. Unknown ids are ignored.
    pub async fn mark_spoiled(&self, id: Uuid) -> bool {
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        let Some(item) = store.inventory.get_mut(id) else {
            warn!(%id, "spoilage mark for unknown item, ignoring");
            return false;
        };

        item.current_quantity = BigDecimal::zero();
        item.status = FoodStatus::Spoiled;
        let name = item.name.clone();
        let unit = item.unit.clone();
        info!(name = %name, "batch marked as spoiled");

        store.shopping.upsert_spoiled(&name, &unit);
        true
    }

    /// Run one expiry sweep against the current clock.
    pub async fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut guard = self.store.write().await;
        let store = &mut *guard;
        sweep_expired(&mut store.inventory, &mut store.shopping, now)
    }

    /// Inventory listing with the derived display classification. By default
    /// only visible batches (quantity left, or expired) are returned;
    /// `include_history` exposes the full record.
    pub async fn list_inventory(&self, include_history: bool) -> Vec<InventoryEntry> {
        let now = Utc::now();
        let guard = self.store.read().await;
        let alert_days = guard.profile.alert_days_before;
        guard
            .inventory
            .items()
            .iter()
            .filter(|i| {
                include_history
                    || i.current_quantity > BigDecimal::zero()
                    || i.status == FoodStatus::Expired
            })
            .map(|i| InventoryEntry::derive(i.clone(), now, alert_days))
            .collect()
    }

    pub async fn waste_report(&self) -> WasteReport {
        let guard = self.store.read().await;
        waste_report(&guard.inventory)
    }

    pub async fn profile(&self) -> UserProfile {
        self.store.read().await.profile.clone()
    }

    pub async fn update_profile(&self, profile: UserProfile) -> UserProfile {
        let mut guard = self.store.write().await;
        guard.profile = profile;
        guard.profile.clone()
    }
}

/// Build a fresh batch from one gateway record. The storage override, when
/// present, wins over the gateway's inference. Fractional expiry-day
/// estimates are kept at second granularity.
fn synthesize_item(
    record: IdentifiedFood,
    storage_override: Option<StorageType>,
    now: DateTime<Utc>,
) -> FoodItem {
    let expiry_date = now + Duration::seconds((record.expiry_days * 86_400.0) as i64);
    FoodItem {
        id: Uuid::new_v4(),
        name: record.name,
        initial_quantity: record.quantity.clone(),
        current_quantity: record.quantity,
        unit: record.unit,
        storage_type: storage_override.unwrap_or(record.storage_type),
        expiry_date,
        created_at: now,
        status: FoodStatus::Active,
        estimated_value: record.estimated_price,
    }
}
