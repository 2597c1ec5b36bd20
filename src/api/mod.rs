// HTTP surface for polling consumers

pub mod handlers;
pub mod router;

use crate::catalog::StationCatalog;
use crate::selection::SelectionCoordinator;
use crate::store::MonitorStore;
use std::sync::Arc;

pub use router::create_router;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MonitorStore>,
    pub catalog: Arc<StationCatalog>,
    pub selection: Arc<SelectionCoordinator>,
}
