// Static station catalog
//
// Fixed at startup: either the built-in demo list or a JSON stations file.
// Selection validates against this catalog; the public listing exposes only
// name and frequency, never the flowgraph parameters.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A tunable station and the flowgraph parameters that select it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    /// Display frequency in MHz.
    pub freq: f64,
    /// Recorded IQ capture the flowgraph replays for this station.
    pub file: String,
    /// RDS correlator bit pattern.
    pub code: String,
}

/// Public listing entry: station identity without flowgraph parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationListing {
    pub name: String,
    pub freq: f64,
}

/// Read-only set of selectable stations.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

impl StationCatalog {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Built-in demo catalog (Paris FM captures).
    pub fn builtin() -> Self {
        Self::new(vec![
            Station {
                name: "France Inter".to_string(),
                freq: 87.8,
                file: "FranceInter95_7_21janv2017.dat".to_string(),
                code: "01100110101001010101010101010110".to_string(),
            },
            Station {
                name: "France Inter (alt)".to_string(),
                freq: 87.8,
                file: "FranceInterALT95_7_21janv2017.dat".to_string(),
                code: "01100110101001010101010101010110".to_string(),
            },
            Station {
                name: "France Musique".to_string(),
                freq: 91.7,
                file: "FranceMusique91_6_21janv2017.dat".to_string(),
                code: "01100110101001010101010101011001".to_string(),
            },
            Station {
                name: "France Bleu Paris".to_string(),
                freq: 107.1,
                file: "FranceBleu102_6_21janv2017.dat".to_string(),
                code: "01100110100101010101010101101001".to_string(),
            },
        ])
    }

    /// Load a catalog from a JSON file holding an array of stations.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading stations file {}", path.display()))?;
        let stations: Vec<Station> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing stations file {}", path.display()))?;
        Ok(Self::new(stations))
    }

    /// Look up a station by exact name.
    pub fn get(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Listing for consumers: name and frequency only.
    pub fn listing(&self) -> Vec<StationListing> {
        self.stations
            .iter()
            .map(|s| StationListing {
                name: s.name.clone(),
                freq: s.freq,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
