//! Reference HTTP service.
//!
//! Serves the station catalog and plans trips with the reference planner,
//! speaking the same JSON contract the engine's clients expect.

mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
