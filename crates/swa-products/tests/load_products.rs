//! End-to-end product loading through the public dispatch API.

use cdf_adapter::{CdfHandle, MemoryStore};
use swa_common::SwaError;
use swa_products::{load_handle, Product, ProductKind};
use test_utils::{eas3d_store, epochs, partmoms_store};

#[test]
fn distribution_file_yields_fully_populated_product() {
    let handle = CdfHandle::new(Box::new(eas3d_store()));
    let product = load_handle(&handle).unwrap();
    assert_eq!(product.kind(), ProductKind::Distribution3d);
    assert_eq!(product.descriptor(), "SWA-EAS1-NMc");

    let Product::Distribution3d(dist) = product else {
        panic!("expected a 3D distribution");
    };
    assert_eq!(dist.times().len(), 3);
    assert_eq!(dist.elevation().len(), 2);
    assert_eq!(dist.azimuth().len(), 2);
    assert_eq!(dist.energy().shape(), &[3, 4]);
    assert_eq!(dist.counts().shape(), &[3, 2, 4, 2]);
}

#[test]
fn loading_the_same_fixture_twice_is_deterministic() {
    let first = load_handle(&CdfHandle::new(Box::new(eas3d_store()))).unwrap();
    let second = load_handle(&CdfHandle::new(Box::new(eas3d_store()))).unwrap();
    let (Product::Distribution3d(a), Product::Distribution3d(b)) = (first, second) else {
        panic!("expected 3D distributions");
    };
    assert_eq!(a.times(), b.times());
    assert_eq!(a.counts(), b.counts());
    assert_eq!(a.energy(), b.energy());
}

#[test]
fn partial_moments_expand_to_ten_columns() {
    // Density (N) -> 1 column, Velocity (V) -> 3, Pressure (P) -> 6.
    let store = MemoryStore::new()
        .with_descriptor("SWA-EAS-PartMoms")
        .with_epoch_variable("SWA_EAS1_SCET", epochs(2))
        .with_variable("SWA_EAS1_Density_N", &[2], vec![5.0, 6.0])
        .with_unit("SWA_EAS1_Density_N", "cm^-3")
        .with_variable("SWA_EAS1_Velocity_V", &[2, 3], vec![1.0; 6])
        .with_unit("SWA_EAS1_Velocity_V", "km/s")
        .with_variable("SWA_EAS1_Pressure_P", &[2, 6], vec![2.0; 12])
        .with_unit("SWA_EAS1_Pressure_P", "nPa");

    let product = load_handle(&CdfHandle::new(Box::new(store))).unwrap();
    let Product::PartialMoments(moments) = product else {
        panic!("expected partial moments");
    };

    assert_eq!(moments.table().num_columns(), 10);
    assert!(moments.skipped().is_empty());
    for column in moments.table().columns() {
        let expected_unit = if column.name.contains("Density") {
            "cm^-3"
        } else if column.name.contains("Velocity") {
            "km/s"
        } else {
            "nPa"
        };
        assert_eq!(column.unit.symbol, expected_unit);
    }
}

#[test]
fn unknown_rank_codes_drop_out_quietly_but_visibly() {
    let product = load_handle(&CdfHandle::new(Box::new(partmoms_store()))).unwrap();
    let Product::PartialMoments(moments) = product else {
        panic!("expected partial moments");
    };
    assert_eq!(moments.skipped(), &["SWA_EAS1_Quality_Q".to_string()]);
}

#[test]
fn unknown_descriptor_reports_it_verbatim() {
    let handle = CdfHandle::new(Box::new(MemoryStore::new().with_descriptor("MAG-OBS-Normal")));
    match load_handle(&handle).unwrap_err() {
        SwaError::NoMatchingProduct { descriptor } => assert_eq!(descriptor, "MAG-OBS-Normal"),
        other => panic!("unexpected error: {:?}", other),
    }
}
