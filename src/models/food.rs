use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Storage location for a food batch. The serde labels are the wire contract:
/// the extraction gateway's response schema enumerates exactly these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageType {
    #[serde(rename = "fora da geladeira")]
    Outside,
    #[serde(rename = "geladeira")]
    Fridge,
    #[serde(rename = "freezer")]
    Freezer,
    #[serde(rename = "despensa")]
    Pantry,
}

impl StorageType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Outside => "fora da geladeira",
            Self::Fridge => "geladeira",
            Self::Freezer => "freezer",
            Self::Pantry => "despensa",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of a food batch. Monotonic: once a batch leaves `Active`
/// it never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "vencido")]
    Expired,
    #[serde(rename = "estragado")]
    Spoiled,
    #[serde(rename = "consumido")]
    Consumed,
}

/// One physical batch of a food product.
///
/// Invariants: `0 <= current_quantity <= initial_quantity`; any non-active
/// status implies `current_quantity == 0`. Batches are never deleted, they
/// stay in the store as history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,              // matching key, compared case-insensitively
    pub initial_quantity: BigDecimal,
    pub current_quantity: BigDecimal,
    pub unit: String,
    pub storage_type: StorageType,
    pub expiry_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub status: FoodStatus,
    pub estimated_value: BigDecimal, // for waste totals only
}

impl FoodItem {
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "premium")]
    Premium,
}

/// Account profile. `plan` is informational, nothing in the core enforces it;
/// `alert_days_before` drives the near-expiry flag on inventory listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub plan: Plan,
    pub alert_days_before: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "João Silva".to_string(),
            plan: Plan::Premium,
            alert_days_before: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_type_uses_wire_labels() {
        let parsed: StorageType = serde_json::from_str("\"geladeira\"").unwrap();
        assert_eq!(parsed, StorageType::Fridge);
        assert_eq!(
            serde_json::to_string(&StorageType::Outside).unwrap(),
            "\"fora da geladeira\""
        );
    }

    #[test]
    fn food_status_uses_wire_labels() {
        assert_eq!(
            serde_json::to_string(&FoodStatus::Expired).unwrap(),
            "\"vencido\""
        );
        let parsed: FoodStatus = serde_json::from_str("\"consumido\"").unwrap();
        assert_eq!(parsed, FoodStatus::Consumed);
    }

    #[test]
    fn name_matching_ignores_case() {
        let item = FoodItem {
            id: Uuid::new_v4(),
            name: "Leite Integral".to_string(),
            initial_quantity: BigDecimal::from(1),
            current_quantity: BigDecimal::from(1),
            unit: "litro".to_string(),
            storage_type: StorageType::Fridge,
            expiry_date: Utc::now(),
            created_at: Utc::now(),
            status: FoodStatus::Active,
            estimated_value: BigDecimal::from(4),
        };
        assert!(item.matches_name("leite integral"));
        assert!(item.matches_name("LEITE INTEGRAL"));
        assert!(!item.matches_name("leite"));
    }
}
