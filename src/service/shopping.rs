use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{ShoppingListItem, ShoppingPriority};
use crate::store::AppStore;

/// Direct user mutations of the shopping list, plus the CSV export.
pub struct ShoppingListService {
    store: Arc<RwLock<AppStore>>,
}

impl ShoppingListService {
    pub fn new(store: Arc<RwLock<AppStore>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<ShoppingListItem> {
        self.store.read().await.shopping.entries().to_vec()
    }

    /// Manual addition. Blank names are ignored; duplicates are allowed.
    pub async fn manual_add(&self, name: &str) -> Option<ShoppingListItem> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut guard = self.store.write().await;
        Some(guard.shopping.push_manual(name))
    }

    pub async fn adjust_quantity(
        &self,
        id: Uuid,
        delta: i32,
    ) -> Result<ShoppingListItem, AppError> {
        let mut guard = self.store.write().await;
        guard
            .shopping
            .adjust_quantity(id, delta)
            .cloned()
            .ok_or(AppError::NotFound {
                kind: "shopping list entry",
                id,
            })
    }

    pub async fn set_priority(
        &self,
        id: Uuid,
        priority: ShoppingPriority,
    ) -> Result<ShoppingListItem, AppError> {
        let mut guard = self.store.write().await;
        guard
            .shopping
            .set_priority(id, priority)
            .cloned()
            .ok_or(AppError::NotFound {
                kind: "shopping list entry",
                id,
            })
    }

    /// Delete one entry; unknown ids are a silent no-op.
    pub async fn remove(&self, id: Uuid) {
        let mut guard = self.store.write().await;
        guard.shopping.remove(id);
    }

    /// Destructive bulk clear. Confirmation is the caller's concern.
    pub async fn clear(&self) -> usize {
        let mut guard = self.store.write().await;
        let removed = guard.shopping.clear();
        info!(removed, "shopping list cleared");
        removed
    }

    /// Export the current list as CSV (name, quantity, unit, reason,
    /// priority).
    pub async fn export_csv(&self) -> Result<Vec<u8>, AppError> {
        let entries = self.list().await;
        let mut writer = csv::Writer::from_writer(Vec::new());
        for entry in &entries {
            writer
                .write_record(&[
                    entry.name.clone(),
                    entry.suggested_quantity.to_string(),
                    entry.unit.clone(),
                    entry.reason.to_string(),
                    entry.priority.to_string(),
                ])
                .map_err(|e| AppError::Internal(format!("CSV export failed: {e}")))?;
        }
        writer.flush().map_err(|e| AppError::Internal(format!("CSV export failed: {e}")))?;
        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV export failed: {e}")))
    }
}
