// Station selection
//
// Validate against the catalog, reconfigure the flowgraph, and only then
// record the selection locally. A failure anywhere leaves the local record
// untouched; the flowgraph may have applied the first call, which is
// surfaced to the caller as an error.

use crate::catalog::StationCatalog;
use crate::control::{ControlError, ControlPlane};
use crate::store::MonitorStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Result type for selection operations
pub type SelectResult<T> = Result<T, SelectError>;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("unknown station")]
    UnknownStation(String),

    #[error("{0}")]
    ControlPlane(#[from] ControlError),
}

/// Coordinates the catalog, the flowgraph, and the local selection record.
pub struct SelectionCoordinator {
    catalog: Arc<StationCatalog>,
    control: Arc<dyn ControlPlane>,
    store: Arc<MonitorStore>,
}

impl SelectionCoordinator {
    pub fn new(
        catalog: Arc<StationCatalog>,
        control: Arc<dyn ControlPlane>,
        store: Arc<MonitorStore>,
    ) -> Self {
        Self {
            catalog,
            control,
            store,
        }
    }

    /// Select a station by catalog name.
    ///
    /// The flowgraph is reconfigured with two ordered calls: source file
    /// first, then correlator code. The local record is updated only after
    /// both succeed.
    pub async fn select(&self, name: &str) -> SelectResult<()> {
        let station = self
            .catalog
            .get(name)
            .ok_or_else(|| SelectError::UnknownStation(name.to_string()))?;

        self.control.set_source_file(&station.file).await?;
        self.control.set_station_code(&station.code).await?;

        self.store.set_selected(&station.name);
        info!("selected station {} ({} MHz)", station.name, station.freq);
        Ok(())
    }
}
