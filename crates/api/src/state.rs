use auth::AuthService;
use catalog::{CatalogStore, InventoryEngine};

/// Application state shared across all handlers.
pub struct AppState {
    pub auth: AuthService,
    pub catalog: CatalogStore,
    pub inventory: InventoryEngine,
}

impl AppState {
    pub fn new(auth: AuthService, catalog: CatalogStore) -> Self {
        let inventory = InventoryEngine::new(catalog.clone());
        Self {
            auth,
            catalog,
            inventory,
        }
    }
}
