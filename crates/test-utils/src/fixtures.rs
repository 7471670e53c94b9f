//! In-memory CDF fixtures for the three EAS product types.
//!
//! Shapes are deliberately small: the 3D distribution uses
//! T=3 times, E=2 elevation bins, N=4 energy bins, A=2 azimuth bins.

use cdf_adapter::MemoryStore;

/// One second in TT2000 nanoseconds.
pub const SECOND_NS: i64 = 1_000_000_000;

/// Fixture time axis: T epochs one second apart, starting at J2000.
pub fn epochs(t: usize) -> Vec<i64> {
    (0..t as i64).map(|i| i * SECOND_NS).collect()
}

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

/// A coherent 3D distribution function file (`SWA-EAS1-NMc`).
///
/// Counts shape is [3, 2, 4, 2] = [time, elevation, energy, azimuth].
pub fn eas3d_store() -> MemoryStore {
    MemoryStore::new()
        .with_descriptor("SWA-EAS1-NMc")
        .with_epoch_variable("SWA_EAS1_SCET", epochs(3))
        .with_variable("SWA_EAS_ELEVATION", &[2], vec![-22.5, 22.5])
        .with_unit("SWA_EAS_ELEVATION", "Degrees")
        .with_variable("SWA_EAS_AZIMUTH", &[2], vec![0.0, 180.0])
        .with_unit("SWA_EAS_AZIMUTH", "Degrees")
        .with_variable(
            "SWA_EAS1_ENERGY",
            &[3, 4],
            vec![
                10.0, 20.0, 40.0, 80.0, //
                10.0, 20.0, 40.0, 80.0, //
                10.0, 20.0, 40.0, 80.0,
            ],
        )
        .with_unit("SWA_EAS1_ENERGY", "ElectronVolts")
        .with_variable("SWA_EAS1_Data", &[3, 2, 4, 2], ramp(48))
        .with_unit("SWA_EAS1_Data", "Counts/Accum")
}

/// A coherent 2D pitch-angle burst file (`SWA-EAS-2DBurstc`).
///
/// Counts shape is [3, 1, 4, 2]; elevation is a single bin because
/// pitch-angle binning replaces elevation resolution.
pub fn burst_store() -> MemoryStore {
    MemoryStore::new()
        .with_descriptor("SWA-EAS-2DBurstc")
        .with_epoch_variable("SWA_EAS_SCET", epochs(3))
        .with_variable("SWA_EAS_ELEVATION", &[1], vec![0.0])
        .with_unit("SWA_EAS_ELEVATION", "Degrees")
        .with_variable("SWA_EAS_AZIMUTH", &[2], vec![0.0, 180.0])
        .with_unit("SWA_EAS_AZIMUTH", "Degrees")
        .with_variable(
            "SWA_EAS_ENERGY",
            &[3, 4],
            vec![
                10.0, 20.0, 40.0, 80.0, //
                10.0, 20.0, 40.0, 80.0, //
                10.0, 20.0, 40.0, 80.0,
            ],
        )
        .with_unit("SWA_EAS_ENERGY", "ElectronVolts")
        .with_variable("SWA_EAS_BM_Data", &[3, 1, 4, 2], ramp(24))
        .with_unit("SWA_EAS_BM_Data", "Total Counts")
        .with_variable("SWA_EAS_Mode", &[3], vec![1.0, 1.0, 1.0])
        .with_variable("SWA_EAS_Validity", &[3], vec![1.0, 1.0, 0.0])
        .with_variable("SWA_EAS_EasUsed", &[3], vec![0.0, 0.0, 1.0])
        .with_variable("SWA_EAS_ElevationUsed", &[3], vec![3.0, 3.0, 4.0])
        .with_variable(
            "SWA_EAS_MagDataUsed",
            &[3, 3],
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        )
        .with_unit("SWA_EAS_MagDataUsed", "nT")
}

/// A partial-moments file (`SWA-EAS-PartMoms`) for sensor head 1.
///
/// Contains one scalar (`_N`), one vector (`_V`), and one tensor (`_P`)
/// variable, plus a head-2 variable and an unknown-code variable that
/// head-1 expansion must skip.
pub fn partmoms_store() -> MemoryStore {
    MemoryStore::new()
        .with_descriptor("SWA-EAS-PartMoms")
        .with_epoch_variable("SWA_EAS1_SCET", epochs(3))
        .with_variable("SWA_EAS1_Density_N", &[3], vec![5.0, 6.0, 7.0])
        .with_unit("SWA_EAS1_Density_N", "cm^-3")
        .with_variable(
            "SWA_EAS1_Velocity_V",
            &[3, 3],
            vec![
                100.0, 0.0, -10.0, //
                110.0, 1.0, -11.0, //
                120.0, 2.0, -12.0,
            ],
        )
        .with_unit("SWA_EAS1_Velocity_V", "km/s")
        .with_variable("SWA_EAS1_Pressure_P", &[3, 6], ramp(18))
        .with_unit("SWA_EAS1_Pressure_P", "nPa")
        .with_variable("SWA_EAS1_Quality_Q", &[3], vec![0.0, 0.0, 0.0])
        .with_variable("SWA_EAS2_Density_N", &[3], vec![9.0, 9.0, 9.0])
        .with_unit("SWA_EAS2_Density_N", "cm^-3")
}
