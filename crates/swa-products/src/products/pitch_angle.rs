//! The 2D pitch-angle burst product.

use chrono::{DateTime, Utc};
use ndarray::{Array2, ArrayD, Ix4};
use swa_common::{Quantity, SwaError, SwaResult};
use tracing::debug;

use cdf_adapter::CdfHandle;

use crate::peek::PitchAngleSeries;

/// Descriptor claimed by this product type (exact, case-sensitive).
pub const DESCRIPTOR: &str = "SWA-EAS-2DBurstc";

/// A burst-mode 2D pitch-angle product.
///
/// Counts indexing is `[time, elevation, energy, azimuth]`; elevation is
/// typically a single bin, pitch-angle binning having replaced elevation
/// resolution. Per-time auxiliaries record how the instrument was
/// configured for each measurement.
#[derive(Debug)]
pub struct PitchAngleBurst {
    times: Vec<DateTime<Utc>>,
    elevation: Quantity,
    azimuth: Quantity,
    energy: Quantity,
    counts: Quantity,
    mode: ArrayD<f64>,
    validity: ArrayD<f64>,
    eas_used: ArrayD<f64>,
    elevation_used: ArrayD<f64>,
    mag_data: Quantity,
}

impl PitchAngleBurst {
    /// Whether `handle` is an EAS 2D pitch-angle burst file.
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
                product: "PitchAngleBurst",
                descriptor: handle.descriptor().unwrap_or_default(),
            });
        }

        let times = handle.get_time("SWA_EAS_SCET")?;
        let elevation = handle.get_quantity("SWA_EAS_ELEVATION")?;
        let azimuth = handle.get_quantity("SWA_EAS_AZIMUTH")?;
        let energy = handle.get_quantity("SWA_EAS_ENERGY")?;
        let counts = handle.get_quantity("SWA_EAS_BM_Data")?;

        // Instrument configuration per time step; unitless by nature.
        let mode = handle.get_raw("SWA_EAS_Mode")?;
        let validity = handle.get_raw("SWA_EAS_Validity")?;
        let eas_used = handle.get_raw("SWA_EAS_EasUsed")?;
        let elevation_used = handle.get_raw("SWA_EAS_ElevationUsed")?;
        // Magnetic field vector the onboard pitch-angle binning used.
        let mag_data = handle.get_quantity("SWA_EAS_MagDataUsed")?;

        let product = Self {
            times,
            elevation,
            azimuth,
            energy,
            counts,
            mode,
            validity,
            eas_used,
            elevation_used,
            mag_data,
        };
        product.validate_shapes()?;
        debug!(
            sweeps = product.times.len(),
            counts_shape = ?product.counts.shape(),
            "constructed pitch-angle burst product"
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
        let t = self.times.len();
        if shape[0] != t {
            return Err(SwaError::InvalidData(format!(
                "counts time axis {} does not match {} timestamps",
                shape[0], t
            )));
        }
        for (name, aux) in [
            ("SWA_EAS_Mode", &self.mode),
            ("SWA_EAS_Validity", &self.validity),
            ("SWA_EAS_EasUsed", &self.eas_used),
            ("SWA_EAS_ElevationUsed", &self.elevation_used),
        ] {
            if aux.shape().first() != Some(&t) {
                return Err(SwaError::InvalidData(format!(
                    "auxiliary '{}' has {:?} entries for {} timestamps",
                    name,
                    aux.shape().first(),
                    t
                )));
            }
        }
        if self.mag_data.shape().first() != Some(&t) {
            return Err(SwaError::InvalidData(format!(
                "magnetic field data has {:?} entries for {} timestamps",
                self.mag_data.shape().first(),
                t
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

    /// Energies of the measurements.
    pub fn energy(&self) -> &Quantity {
        &self.energy
    }

    /// Counts tensor; indexing is `[time, elevation, energy, azimuth]`.
    pub fn total_counts(&self) -> &Quantity {
        &self.counts
    }

    /// Operating mode per time step.
    pub fn mode(&self) -> &ArrayD<f64> {
        &self.mode
    }

    /// Validity flag per time step.
    pub fn validity(&self) -> &ArrayD<f64> {
        &self.validity
    }

    /// Which physical sensor head produced each time step.
    pub fn eas_used(&self) -> &ArrayD<f64> {
        &self.eas_used
    }

    /// Which elevation bin was selected per time step.
    pub fn elevation_used(&self) -> &ArrayD<f64> {
        &self.elevation_used
    }

    /// Magnetic field vector used for onboard pitch-angle binning.
    pub fn mag_data(&self) -> &Quantity {
        &self.mag_data
    }

    /// Quick-look summary: counts per (time, elevation bin), summed over
    /// energy and azimuth.
    pub fn peek(&self) -> SwaResult<PitchAngleSeries> {
        let counts = self
            .counts
            .values
            .view()
            .into_dimensionality::<Ix4>()
            .map_err(|e| SwaError::InvalidData(e.to_string()))?;
        let (t, e, _, _) = counts.dim();

        let mut values = Array2::zeros((t, e));
        for ((ti, ei, _, _), &count) in counts.indexed_iter() {
            values[[ti, ei]] += count;
        }

        let elevation_deg = self.elevation.values.iter().copied().collect();
        Ok(PitchAngleSeries {
            times: self.times.clone(),
            elevation_deg,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdf_adapter::{CdfHandle, MemoryStore};
    use test_utils::burst_store;

    fn burst() -> PitchAngleBurst {
        PitchAngleBurst::from_handle(&CdfHandle::new(Box::new(burst_store()))).unwrap()
    }

    #[test]
    fn test_shapes_and_auxiliaries() {
        let burst = burst();
        assert_eq!(burst.total_counts().shape(), &[3, 1, 4, 2]);
        assert_eq!(burst.mode().len(), 3);
        assert_eq!(burst.validity().len(), 3);
        assert_eq!(burst.eas_used().len(), 3);
        assert_eq!(burst.elevation_used().len(), 3);
        assert_eq!(burst.mag_data().shape(), &[3, 3]);
    }

    #[test]
    fn test_single_elevation_bin() {
        let burst = burst();
        assert_eq!(burst.elevation().len(), 1);
    }

    #[test]
    fn test_wrong_descriptor_is_type_mismatch() {
        let handle = CdfHandle::new(Box::new(MemoryStore::new().with_descriptor("SWA-EAS1-NMc")));
        let err = PitchAngleBurst::from_handle(&handle).unwrap_err();
        assert!(matches!(err, SwaError::TypeMismatch { .. }));
    }

    #[test]
    fn test_peek_sums_energy_and_azimuth() {
        let series = burst().peek().unwrap();
        assert_eq!(series.values.dim(), (3, 1));
        // t=0 slice of the 0..24 ramp is 0..8; their sum is 28.
        assert_eq!(series.values[[0, 0]], 28.0);
        assert_eq!(series.elevation_deg, vec![0.0]);
    }

    #[test]
    fn test_auxiliary_length_mismatch_rejected() {
        let store = burst_store().with_variable("SWA_EAS_Mode", &[2], vec![1.0, 1.0]);
        let err = PitchAngleBurst::from_handle(&CdfHandle::new(Box::new(store))).unwrap_err();
        assert!(matches!(err, SwaError::InvalidData(_)));
    }
}
