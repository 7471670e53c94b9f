//! Registry of known product types.
//!
//! Registration is explicit and static: `Registry::builtin` pairs each
//! product type's match predicate with its constructor, and the
//! process-wide instance is populated exactly once. There is no runtime
//! mutation after population, so concurrent readers need no locking.

use std::sync::OnceLock;

use cdf_adapter::CdfHandle;
use swa_common::SwaResult;

use crate::products::{Distribution3d, PartialMoments, PitchAngleBurst, Product, ProductKind};

/// One registered product type: its predicate and its constructor.
#[derive(Clone)]
pub struct ProductDescriptor {
    pub kind: ProductKind,
    pub name: &'static str,
    /// Pure predicate: does this product type claim the file?
    pub matches: fn(&CdfHandle) -> bool,
    pub construct: fn(&CdfHandle) -> SwaResult<Product>,
}

impl std::fmt::Debug for ProductDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductDescriptor")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish()
    }
}

/// Append-only list of product type descriptors.
///
/// Registration performs no de-duplication: overlapping predicates are a
/// registration bug, surfaced at dispatch time as `AmbiguousProduct`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<ProductDescriptor>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The three EAS product types, in fixed registration order.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(ProductDescriptor {
            kind: ProductKind::Distribution3d,
            name: "Distribution3d",
            matches: Distribution3d::matches,
            construct: |handle| Distribution3d::from_handle(handle).map(Product::Distribution3d),
        });
        registry.register(ProductDescriptor {
            kind: ProductKind::PitchAngleBurst,
            name: "PitchAngleBurst",
            matches: PitchAngleBurst::matches,
            construct: |handle| PitchAngleBurst::from_handle(handle).map(Product::PitchAngleBurst),
        });
        registry.register(ProductDescriptor {
            kind: ProductKind::PartialMoments,
            name: "PartialMoments",
            matches: PartialMoments::matches,
            construct: |handle| PartialMoments::from_handle(handle).map(Product::PartialMoments),
        });
        registry
    }

    /// Append a descriptor. Order is registration order.
    pub fn register(&mut self, descriptor: ProductDescriptor) {
        self.entries.push(descriptor);
    }

    /// All descriptors whose predicate claims `handle`, in registration
    /// order. Pure; no side effects.
    pub fn matches(&self, handle: &CdfHandle) -> Vec<&ProductDescriptor> {
        self.entries
            .iter()
            .filter(|d| (d.matches)(handle))
            .collect()
    }

    pub fn entries(&self) -> &[ProductDescriptor] {
        &self.entries
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Populate the process-wide registry with the built-in product types.
///
/// Call once before any concurrent `load` calls; later calls return the
/// already-populated registry.
pub fn init_registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::builtin)
}

/// The process-wide registry, populating it on first use.
pub fn registry() -> &'static Registry {
    init_registry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdf_adapter::{CdfHandle, MemoryStore};
    use test_utils::{burst_store, eas3d_store, partmoms_store};

    #[test]
    fn test_builtin_registration_order() {
        let registry = Registry::builtin();
        let kinds: Vec<ProductKind> = registry.entries().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ProductKind::Distribution3d,
                ProductKind::PitchAngleBurst,
                ProductKind::PartialMoments,
            ]
        );
    }

    #[test]
    fn test_builtin_predicates_are_mutually_exclusive() {
        let registry = Registry::builtin();
        for store in [eas3d_store(), burst_store(), partmoms_store()] {
            let handle = CdfHandle::new(Box::new(store));
            assert_eq!(registry.matches(&handle).len(), 1);
        }
    }

    #[test]
    fn test_unknown_descriptor_matches_nothing() {
        let registry = Registry::builtin();
        let handle = CdfHandle::new(Box::new(
            MemoryStore::new().with_descriptor("SWA-PAS-GrndMom"),
        ));
        assert!(registry.matches(&handle).is_empty());
    }

    #[test]
    fn test_register_allows_duplicates() {
        // No de-duplication at registration; overlap surfaces at dispatch.
        let mut registry = Registry::builtin();
        let duplicate = registry.entries()[0].clone();
        registry.register(duplicate);
        let handle = CdfHandle::new(Box::new(eas3d_store()));
        assert_eq!(registry.matches(&handle).len(), 2);
    }

    #[test]
    fn test_process_registry_is_stable() {
        let first = init_registry() as *const Registry;
        let second = registry() as *const Registry;
        assert_eq!(first, second);
    }
}
