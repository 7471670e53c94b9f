//! Quick-look summary structures.
//!
//! Products reduce their tensors to these plain data structures; rendering
//! them (heatmaps, sliders, animations) is the consumer's business.

use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::Serialize;

/// One time slice of a counts tensor, summed over selected energy bins.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapFrame {
    pub time: DateTime<Utc>,
    /// Center energies (eV) of the bins included in this frame.
    pub energy_ev: Vec<f64>,
    /// Counts, indexed `[elevation, azimuth]`.
    pub values: Array2<f64>,
}

/// Counts per (time, elevation bin), summed over energy and azimuth.
#[derive(Debug, Clone, Serialize)]
pub struct PitchAngleSeries {
    pub times: Vec<DateTime<Utc>>,
    pub elevation_deg: Vec<f64>,
    /// Counts, indexed `[time, elevation]`.
    pub values: Array2<f64>,
}

/// Value range of one moment-table column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
}
