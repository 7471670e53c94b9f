//! Unit- and time-aware adapter over SWA CDF files.
//!
//! The actual CDF decoding is an external capability consumed through the
//! [`CdfStore`] trait; [`CdfHandle`] layers on the operations the data
//! products need: unit-attached arrays, calendar-time axes, and the
//! file-level descriptor.

pub mod dump;
pub mod store;

pub use dump::DumpStore;
pub use store::{CdfStore, MemoryStore, VarData};

use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::ArrayD;
use swa_common::{epochs_to_datetimes, parse_unit, Quantity, SwaError, SwaResult};

/// An opened CDF file with unit- and time-aware accessors.
///
/// Read-only; nothing is cached beyond the store itself.
pub struct CdfHandle {
    store: Box<dyn CdfStore>,
}

impl CdfHandle {
    pub fn new(store: Box<dyn CdfStore>) -> Self {
        Self { store }
    }

    /// Open a file on disk through the `cdfdump` backend.
    pub fn open<P: AsRef<Path>>(path: P) -> SwaResult<Self> {
        Ok(Self::new(Box::new(DumpStore::open(path)?)))
    }

    /// The file-level `Descriptor` global attribute.
    pub fn descriptor(&self) -> SwaResult<String> {
        self.store
            .global_attribute("Descriptor")
            .ok_or_else(|| SwaError::InvalidData("file has no Descriptor attribute".to_string()))
    }

    /// All variable names, in file order.
    pub fn variable_names(&self) -> Vec<String> {
        self.store.variable_names()
    }

    /// A variable's raw numeric array.
    pub fn get_raw(&self, name: &str) -> SwaResult<ArrayD<f64>> {
        Ok(self.store.variable_data(name)?.values)
    }

    /// A variable's data with its `UNITS` attribute resolved to a unit.
    pub fn get_quantity(&self, name: &str) -> SwaResult<Quantity> {
        let data = self.store.variable_data(name)?;
        let unit_str = self
            .store
            .variable_attribute(name, "UNITS")
            .ok_or_else(|| SwaError::UnitParse {
                variable: name.to_string(),
                unit: "<missing UNITS attribute>".to_string(),
            })?;
        let unit = parse_unit(&unit_str).map_err(|e| match e {
            SwaError::UnitParse { unit, .. } => SwaError::UnitParse {
                variable: name.to_string(),
                unit,
            },
            other => other,
        })?;
        Ok(Quantity::new(data.values, unit))
    }

    /// An epoch variable converted to calendar time.
    pub fn get_time(&self, name: &str) -> SwaResult<Vec<DateTime<Utc>>> {
        let data = self.store.variable_data(name)?;
        let epochs = data.epochs.ok_or_else(|| {
            SwaError::TimeConversion(format!("variable '{}' is not an epoch variable", name))
        })?;
        epochs_to_datetimes(&epochs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swa_common::UnitQuantityKind;

    fn handle() -> CdfHandle {
        let store = MemoryStore::new()
            .with_descriptor("SWA-EAS1-NMc")
            .with_epoch_variable("SWA_EAS1_SCET", vec![0, 1_000_000_000])
            .with_variable("SWA_EAS_AZIMUTH", &[2], vec![0.0, 11.25])
            .with_unit("SWA_EAS_AZIMUTH", "Degrees")
            .with_variable("SWA_EAS_Mode", &[2], vec![1.0, 1.0])
            .with_variable("bad_units", &[1], vec![0.0])
            .with_unit("bad_units", "parsecs/zork");
        CdfHandle::new(Box::new(store))
    }

    #[test]
    fn test_descriptor() {
        assert_eq!(handle().descriptor().unwrap(), "SWA-EAS1-NMc");
    }

    #[test]
    fn test_missing_descriptor_errors() {
        let handle = CdfHandle::new(Box::new(MemoryStore::new()));
        assert!(matches!(
            handle.descriptor().unwrap_err(),
            SwaError::InvalidData(_)
        ));
    }

    #[test]
    fn test_get_quantity_attaches_unit() {
        let q = handle().get_quantity("SWA_EAS_AZIMUTH").unwrap();
        assert_eq!(q.unit.kind, UnitQuantityKind::Angle);
        assert_eq!(q.values.as_slice().unwrap(), &[0.0, 11.25]);
    }

    #[test]
    fn test_get_quantity_without_units_attribute_errors() {
        let err = handle().get_quantity("SWA_EAS_Mode").unwrap_err();
        assert!(matches!(err, SwaError::UnitParse { .. }));
    }

    #[test]
    fn test_get_quantity_unparseable_unit_names_variable() {
        match handle().get_quantity("bad_units").unwrap_err() {
            SwaError::UnitParse { variable, unit } => {
                assert_eq!(variable, "bad_units");
                assert_eq!(unit, "parsecs/zork");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_get_time_converts_epochs() {
        let times = handle().get_time("SWA_EAS1_SCET").unwrap();
        assert_eq!(times.len(), 2);
        assert_eq!((times[1] - times[0]).num_seconds(), 1);
    }

    #[test]
    fn test_get_time_on_non_epoch_variable_errors() {
        let err = handle().get_time("SWA_EAS_AZIMUTH").unwrap_err();
        assert!(matches!(err, SwaError::TimeConversion(_)));
    }

    #[test]
    fn test_get_raw_missing_variable() {
        let err = handle().get_raw("SWA_EAS1_Data").unwrap_err();
        assert!(matches!(err, SwaError::VariableNotFound(_)));
    }
}
