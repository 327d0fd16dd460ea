pub mod auth_handlers;
pub mod error;
pub mod inventory_handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod sweet_handlers;

pub use error::ApiError;
pub use router::router;
pub use state::AppState;
