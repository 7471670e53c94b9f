//! Dispatch factory: file path (or handle) to typed product.

use std::path::Path;

use cdf_adapter::CdfHandle;
use swa_common::{SwaError, SwaResult};
use tracing::{debug, instrument};

use crate::products::Product;
use crate::registry::{registry, Registry};

/// Load a data product from a CDF file on disk.
///
/// The sole path-based entry point: opens the file through the adapter,
/// asks the process-wide registry which product type claims it, and
/// constructs that type. No caching; every call re-reads the file.
pub fn load<P: AsRef<Path>>(path: P) -> SwaResult<Product> {
    let handle = CdfHandle::open(path.as_ref())?;
    load_handle(&handle)
}

/// Dispatch an already-open handle against the process-wide registry.
pub fn load_handle(handle: &CdfHandle) -> SwaResult<Product> {
    load_handle_with(registry(), handle)
}

/// Dispatch against an explicit registry.
///
/// Exactly one registered predicate must claim the file; zero matches and
/// multiple matches are both errors, never silently resolved.
#[instrument(skip_all)]
pub fn load_handle_with(registry: &Registry, handle: &CdfHandle) -> SwaResult<Product> {
    let descriptor = handle.descriptor()?;
    let matches = registry.matches(handle);
    match matches.as_slice() {
        [only] => {
            debug!(descriptor = %descriptor, product = only.name, "dispatching file");
            (only.construct)(handle)
        }
        [] => Err(SwaError::NoMatchingProduct { descriptor }),
        several => Err(SwaError::AmbiguousProduct {
            names: several.iter().map(|d| d.name.to_string()).collect(),
        }),
    }
}
