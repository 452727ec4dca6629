//! API layer - HTTP endpoints and middleware

pub mod api_keys;
pub mod gate;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;
pub mod validate;

pub use router::create_router_with_state;
pub use state::{ApiKeyServiceTrait, AppState};
