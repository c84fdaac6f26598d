pub mod analytics;
pub mod inventory;
pub mod reconciler;
pub mod shopping;
pub mod sweeper;

pub use inventory::InventoryService;
pub use shopping::ShoppingListService;
