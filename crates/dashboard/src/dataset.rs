//! Dataset loading for the dashboard.
//!
//! The engine is ignorant of where its tables come from; this module is the
//! data-loading collaborator that feeds it. Datasets are plain JSON documents
//! so new observation sessions and fleets need no code changes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use park_watch_engine::{FleetRecord, QueueRecord};

/// One observation session plus the reference fleet table.
#[derive(Debug, Deserialize)]
pub struct ParkDataset {
    pub queue: Vec<QueueRecord>,
    pub fleet: Vec<FleetRecord>,
}

/// The bundled observation session (a morning of student group logs),
/// used when no dataset file is supplied.
const SAMPLE_JSON: &str = include_str!("../data/sample.json");

impl ParkDataset {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse dataset {}", path.display()))
    }

    pub fn sample() -> Result<Self> {
        serde_json::from_str(SAMPLE_JSON).context("bundled sample dataset is malformed")
    }
}
