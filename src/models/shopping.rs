use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Why an entry landed on the shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplenishReason {
    Finished,
    Spoiled,
    Manual,
    Expired,
}

impl fmt::Display for ReplenishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Finished => "finished",
            Self::Spoiled => "spoiled",
            Self::Manual => "manual",
            Self::Expired => "expired",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoppingPriority {
    Urgente,
    Normal,
    Baixa,
}

impl fmt::Display for ShoppingPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Urgente => "Urgente",
            Self::Normal => "Normal",
            Self::Baixa => "Baixa",
        };
        f.write_str(s)
    }
}

/// A suggested replenishment entry. Auto-generated entries are deduplicated
/// by case-insensitive name; manual entries may duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub name: String,
    pub suggested_quantity: u32, // >= 1
    pub unit: String,
    pub reason: ReplenishReason,
    pub priority: ShoppingPriority,
}
