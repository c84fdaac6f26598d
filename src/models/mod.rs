pub mod extraction;
pub mod food;
pub mod report;
pub mod shopping;

pub use extraction::{AcquisitionInput, AcquisitionSource, ConsumptionRecord, IdentifiedFood};
pub use food::{FoodItem, FoodStatus, Plan, StorageType, UserProfile};
pub use report::{ConsumptionOutcome, InventoryEntry, WasteEntry, WasteReport};
pub use shopping::{ReplenishReason, ShoppingListItem, ShoppingPriority};
