//! The 3D electron distribution function product.

use chrono::{DateTime, Utc};
use ndarray::{s, Array2, Ix2, Ix4};
use swa_common::{Quantity, SwaError, SwaResult};
use tracing::debug;

use cdf_adapter::CdfHandle;

use crate::peek::HeatmapFrame;

/// Descriptor claimed by this product type (exact, case-sensitive).
pub const DESCRIPTOR: &str = "SWA-EAS1-NMc";

/// A full 3D distribution function from sensor head 1.
///
/// Counts indexing is `[time, elevation, energy, azimuth]`.
#[derive(Debug)]
pub struct Distribution3d {
    times: Vec<DateTime<Utc>>,
    elevation: Quantity,
    azimuth: Quantity,
    energy: Quantity,
    counts: Quantity,
}

impl Distribution3d {
    /// Whether `handle` is a 3D EAS distribution function file.
    pub fn matches(handle: &CdfHandle) -> bool {
        handle
            .descriptor()
            .map(|d| d == DESCRIPTOR)
            .unwrap_or(false)
    }

    /// Construct from an open file, validating the shape contract.
    pub fn from_handle(handle: &CdfHandle) -> SwaResult<Self> {
        if !Self::matches(handle) {
            return Err(SwaError::TypeMismatch {
                product: "Distribution3d",
                descriptor: handle.descriptor().unwrap_or_default(),
            });
        }

        let times = handle.get_time("SWA_EAS1_SCET")?;
        let elevation = handle.get_quantity("SWA_EAS_ELEVATION")?;
        let azimuth = handle.get_quantity("SWA_EAS_AZIMUTH")?;
        let energy = handle.get_quantity("SWA_EAS1_ENERGY")?;
        let counts = handle.get_quantity("SWA_EAS1_Data")?;

        let product = Self {
            times,
            elevation,
            azimuth,
            energy,
            counts,
        };
        product.validate_shapes()?;
        debug!(
            sweeps = product.times.len(),
            counts_shape = ?product.counts.shape(),
            "constructed 3D distribution"
        );
        Ok(product)
    }

    fn validate_shapes(&self) -> SwaResult<()> {
        let shape = self.counts.shape();
        if shape.len() != 4 {
            return Err(SwaError::InvalidData(format!(
                "counts tensor must be rank 4 [time, elevation, energy, azimuth], got {:?}",
                shape
            )));
        }
        let (t, e, n, a) = (shape[0], shape[1], shape[2], shape[3]);

        if t != self.times.len() {
            return Err(SwaError::InvalidData(format!(
                "counts time axis {} does not match {} timestamps",
                t,
                self.times.len()
            )));
        }
        // Elevation may be fixed (1D, length E) or swept per time (2D, T x E).
        let elev_bins = *self.elevation.shape().last().unwrap_or(&0);
        if elev_bins != e {
            return Err(SwaError::InvalidData(format!(
                "elevation axis has {} bins, counts expects {}",
                elev_bins, e
            )));
        }
        let energy_bins = *self.energy.shape().last().unwrap_or(&0);
        if energy_bins != n {
            return Err(SwaError::InvalidData(format!(
                "energy axis has {} bins, counts expects {}",
                energy_bins, n
            )));
        }
        if self.azimuth.len() != a {
            return Err(SwaError::InvalidData(format!(
                "azimuth axis has {} bins, counts expects {}",
                self.azimuth.len(),
                a
            )));
        }
        Ok(())
    }

    /// Times of the measurements.
    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    /// Elevation angles of the measurements.
    pub fn elevation(&self) -> &Quantity {
        &self.elevation
    }

    /// Azimuthal angles of the measurements.
    pub fn azimuth(&self) -> &Quantity {
        &self.azimuth
    }

    /// Energies of the measurements, shape `[time, energy_bin]`.
    pub fn energy(&self) -> &Quantity {
        &self.energy
    }

    /// Counts tensor; indexing is `[time, elevation, energy, azimuth]`.
    pub fn counts(&self) -> &Quantity {
        &self.counts
    }

    /// Quick-look summary: one elevation x azimuth heatmap per time step,
    /// counts summed over the requested energy bins.
    pub fn peek(&self, energy_bins: &[usize]) -> SwaResult<Vec<HeatmapFrame>> {
        let counts = self
            .counts
            .values
            .view()
            .into_dimensionality::<Ix4>()
            .map_err(|e| SwaError::InvalidData(e.to_string()))?;
        let energy = self
            .energy
            .values
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| SwaError::InvalidData(e.to_string()))?;

        let (_, e, n, a) = counts.dim();
        if let Some(&bad) = energy_bins.iter().find(|&&b| b >= n) {
            return Err(SwaError::InvalidData(format!(
                "energy bin {} out of range (file has {} bins)",
                bad, n
            )));
        }

        let mut frames = Vec::with_capacity(self.times.len());
        for (t, &time) in self.times.iter().enumerate() {
            let mut values = Array2::zeros((e, a));
            for &bin in energy_bins {
                values += &counts.slice(s![t, .., bin, ..]);
            }
            let energy_ev = energy_bins.iter().map(|&bin| energy[[t, bin]]).collect();
            frames.push(HeatmapFrame {
                time,
                energy_ev,
                values,
            });
        }
        Ok(frames)
    }
}
