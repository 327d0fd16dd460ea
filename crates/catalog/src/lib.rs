//! Sweet catalog: CRUD/search over entries plus the stock state machine.

mod error;
pub mod inventory;
pub mod model;
pub mod store;

pub use error::{CatalogError, Result};
pub use inventory::InventoryEngine;
pub use model::{NewSweet, Sweet, SweetPatch};
pub use store::{ensure_schema, CatalogStore};
