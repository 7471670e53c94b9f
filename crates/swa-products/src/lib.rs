//! Typed data products for the Solar Orbiter SWA/EAS electron analyzer.
//!
//! An EAS CDF file carries a global `Descriptor` attribute naming which
//! instrument data product it contains. This crate classifies files by that
//! descriptor, constructs a typed product with unit-attached axes, and
//! exposes quick-look summaries for visualization consumers.
//!
//! # Architecture
//!
//! ```text
//! load(path)
//!      │
//!      ├─► CdfHandle::open (cdf-adapter)
//!      │
//!      ├─► Registry::matches(handle)
//!      │         │
//!      │         ├─► exactly one descriptor: construct the product
//!      │         ├─► zero: NoMatchingProduct
//!      │         └─► several: AmbiguousProduct
//!      │
//!      └─► Product (Distribution3d | PitchAngleBurst | PartialMoments)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use swa_products::{load, Product};
//!
//! match load("solo_L1_swa-eas1-nm3d_20200601.cdf")? {
//!     Product::Distribution3d(dist) => {
//!         println!("{} sweeps, counts shape {:?}", dist.times().len(), dist.counts().shape());
//!     }
//!     other => println!("not a 3D distribution: {:?}", other.kind()),
//! }
//! ```

pub mod dispatch;
pub mod peek;
pub mod products;
pub mod registry;

pub use dispatch::{load, load_handle, load_handle_with};
pub use peek::{ColumnSummary, HeatmapFrame, PitchAngleSeries};
pub use products::{
    Distribution3d, PartialMoments, PitchAngleBurst, Product, ProductKind, SensorHead,
};
pub use registry::{init_registry, registry, ProductDescriptor, Registry};
