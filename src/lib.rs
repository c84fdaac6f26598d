pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use error::AppError;
pub use gateway::{ExtractionGateway, GeminiGateway};
pub use service::{InventoryService, ShoppingListService};
pub use store::AppStore;
