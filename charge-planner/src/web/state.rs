//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::LocalPlanner;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog and the planner that routes over it
    pub planner: Arc<LocalPlanner>,
}

impl AppState {
    pub fn new(planner: LocalPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
