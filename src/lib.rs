pub mod api;
pub mod catalog;
pub mod config;
pub mod control;
pub mod ingest;
pub mod selection;
pub mod store;
pub mod telemetry;

pub use api::{create_router, AppState};
pub use catalog::{Station, StationCatalog, StationListing};
pub use config::Config;
pub use control::{ControlError, ControlPlane, ControlResult, XmlRpcControlPlane};
pub use ingest::{apply_frame, IngestError, IngestResult, Subscriber, SubscriberConfig, Topic};
pub use selection::{SelectError, SelectResult, SelectionCoordinator};
pub use store::{MonitorStore, CONSTELLATION_MAX_POINTS, SCOPE_MAX_SAMPLES};
pub use telemetry::{ConstellationState, MonitorSnapshot, ScopeKind, ScopeState, TextState};
