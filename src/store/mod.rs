pub mod inventory;
pub mod shopping;

pub use inventory::InventoryStore;
pub use shopping::ShoppingListStore;

use crate::models::UserProfile;

/// The single lock domain of the application: inventory, shopping list and
/// profile live behind one writer so the sweeper and the reconciler mutate
/// both collections in the same logical transaction.
#[derive(Debug, Default)]
pub struct AppStore {
    pub inventory: InventoryStore,
    pub shopping: ShoppingListStore,
    pub profile: UserProfile,
}
