//! The concrete EAS data product types.

pub mod distribution;
pub mod partial_moments;
pub mod pitch_angle;

pub use distribution::Distribution3d;
pub use partial_moments::{PartialMoments, SensorHead};
pub use pitch_angle::PitchAngleBurst;

use serde::{Deserialize, Serialize};
use swa_common::{SwaError, SwaResult};

/// Tag identifying which product type a file was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    Distribution3d,
    PitchAngleBurst,
    PartialMoments,
}

/// A constructed data product: an immutable snapshot of one file.
#[derive(Debug)]
pub enum Product {
    Distribution3d(Distribution3d),
    PitchAngleBurst(PitchAngleBurst),
    PartialMoments(PartialMoments),
}

impl Product {
    pub fn kind(&self) -> ProductKind {
        match self {
            Product::Distribution3d(_) => ProductKind::Distribution3d,
            Product::PitchAngleBurst(_) => ProductKind::PitchAngleBurst,
            Product::PartialMoments(_) => ProductKind::PartialMoments,
        }
    }

    /// The file descriptor string this product type claims.
    pub fn descriptor(&self) -> &'static str {
        match self {
            Product::Distribution3d(_) => distribution::DESCRIPTOR,
            Product::PitchAngleBurst(_) => pitch_angle::DESCRIPTOR,
            Product::PartialMoments(_) => partial_moments::DESCRIPTOR,
        }
    }

    /// Temporal concatenation of two products.
    ///
    /// Not implemented; fails explicitly rather than producing a silent
    /// partial merge.
    pub fn concat(self, _other: Product) -> SwaResult<Product> {
        Err(SwaError::Unsupported("temporal product concatenation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdf_adapter::CdfHandle;
    use test_utils::eas3d_store;

    #[test]
    fn test_concat_is_unsupported() {
        let a = Distribution3d::from_handle(&CdfHandle::new(Box::new(eas3d_store()))).unwrap();
        let b = Distribution3d::from_handle(&CdfHandle::new(Box::new(eas3d_store()))).unwrap();
        let err = Product::Distribution3d(a)
            .concat(Product::Distribution3d(b))
            .unwrap_err();
        assert!(matches!(err, SwaError::Unsupported(_)));
    }
}
