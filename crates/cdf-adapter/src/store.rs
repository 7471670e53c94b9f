//! The raw CDF capability: variables, attributes, and an in-memory impl.
//!
//! Binary CDF parsing is delegated to an external facility; everything in
//! this workspace consumes it through the [`CdfStore`] trait.

use std::collections::HashMap;

use ndarray::ArrayD;
use swa_common::{SwaError, SwaResult};

/// Raw payload of one variable.
///
/// Epoch-typed variables additionally carry the native TT2000 integers so
/// time conversion does not round-trip through f64.
#[derive(Debug, Clone)]
pub struct VarData {
    pub values: ArrayD<f64>,
    pub epochs: Option<Vec<i64>>,
}

/// Low-level access to an opened CDF file.
///
/// A store is read-only and stateless from the caller's perspective: all
/// I/O has happened by the time the store exists.
pub trait CdfStore {
    /// Look up a global attribute by name.
    fn global_attribute(&self, name: &str) -> Option<String>;

    /// All variable names, in file order.
    fn variable_names(&self) -> Vec<String>;

    /// Raw numeric data for one variable.
    fn variable_data(&self, name: &str) -> SwaResult<VarData>;

    /// Look up one attribute of one variable.
    fn variable_attribute(&self, name: &str, attr: &str) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
struct VarEntry {
    data: ArrayD<f64>,
    epochs: Option<Vec<i64>>,
    attributes: HashMap<String, String>,
}

/// In-memory [`CdfStore`] with a builder API.
///
/// Backs the `cdfdump` reader and every test fixture.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    globals: HashMap<String, String>,
    variables: HashMap<String, VarEntry>,
    // Insertion order of variables; file order matters to prefix scans.
    order: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file-level `Descriptor` global attribute.
    pub fn with_descriptor(self, descriptor: &str) -> Self {
        self.with_global("Descriptor", descriptor)
    }

    pub fn with_global(mut self, name: &str, value: &str) -> Self {
        self.globals.insert(name.to_string(), value.to_string());
        self
    }

    /// Add a numeric variable with the given shape.
    ///
    /// # Panics
    /// Panics if `values.len()` does not match the product of `shape`;
    /// fixture construction is programmer error territory.
    pub fn with_variable(mut self, name: &str, shape: &[usize], values: Vec<f64>) -> Self {
        let data = ArrayD::from_shape_vec(shape.to_vec(), values)
            .unwrap_or_else(|e| panic!("bad fixture shape for '{}': {}", name, e));
        self.insert(name, data, None);
        self
    }

    /// Add an epoch (TT2000) variable.
    pub fn with_epoch_variable(mut self, name: &str, epochs: Vec<i64>) -> Self {
        let values =
            ArrayD::from_shape_vec(vec![epochs.len()], epochs.iter().map(|&e| e as f64).collect())
                .unwrap_or_else(|e| panic!("bad fixture epochs for '{}': {}", name, e));
        self.insert(name, values, Some(epochs));
        self
    }

    /// Attach a `UNITS` attribute to an existing variable.
    ///
    /// # Panics
    /// Panics if the variable does not exist; see [`MemoryStore::with_attribute`].
    pub fn with_unit(self, name: &str, unit: &str) -> Self {
        self.with_attribute(name, "UNITS", unit)
    }

    /// Attach an attribute to an existing variable.
    ///
    /// # Panics
    /// Panics if the variable does not exist, so a typoed fixture name
    /// cannot silently drop the attribute.
    pub fn with_attribute(mut self, name: &str, attr: &str, value: &str) -> Self {
        let entry = self
            .variables
            .get_mut(name)
            .unwrap_or_else(|| panic!("attribute '{}' targets unknown variable '{}'", attr, name));
        entry.attributes.insert(attr.to_string(), value.to_string());
        self
    }

    pub(crate) fn insert(&mut self, name: &str, data: ArrayD<f64>, epochs: Option<Vec<i64>>) {
        if !self.variables.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.variables.insert(
            name.to_string(),
            VarEntry {
                data,
                epochs,
                attributes: HashMap::new(),
            },
        );
    }

    pub(crate) fn set_global(&mut self, name: &str, value: &str) {
        self.globals.insert(name.to_string(), value.to_string());
    }

    pub(crate) fn set_attribute(&mut self, name: &str, attr: &str, value: &str) {
        if let Some(entry) = self.variables.get_mut(name) {
            entry.attributes.insert(attr.to_string(), value.to_string());
        }
    }
}

impl CdfStore for MemoryStore {
    fn global_attribute(&self, name: &str) -> Option<String> {
        self.globals.get(name).cloned()
    }

    fn variable_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn variable_data(&self, name: &str) -> SwaResult<VarData> {
        let entry = self
            .variables
            .get(name)
            .ok_or_else(|| SwaError::VariableNotFound(name.to_string()))?;
        Ok(VarData {
            values: entry.data.clone(),
            epochs: entry.epochs.clone(),
        })
    }

    fn variable_attribute(&self, name: &str, attr: &str) -> Option<String> {
        self.variables
            .get(name)
            .and_then(|entry| entry.attributes.get(attr))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_is_not_found() {
        let store = MemoryStore::new().with_descriptor("SWA-EAS1-NMc");
        let err = store.variable_data("SWA_EAS1_Data").unwrap_err();
        assert!(matches!(err, SwaError::VariableNotFound(_)));
    }

    #[test]
    fn test_variable_order_is_file_order() {
        let store = MemoryStore::new()
            .with_variable("b", &[1], vec![0.0])
            .with_variable("a", &[1], vec![0.0]);
        assert_eq!(store.variable_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_epoch_variable_keeps_raw_integers() {
        let store = MemoryStore::new().with_epoch_variable("SCET", vec![1, 2, 3]);
        let data = store.variable_data("SCET").unwrap();
        assert_eq!(data.epochs.as_deref(), Some(&[1, 2, 3][..]));
    }

    #[test]
    #[should_panic(expected = "unknown variable")]
    fn test_attribute_on_unknown_variable_panics() {
        let _ = MemoryStore::new()
            .with_variable("az", &[1], vec![0.0])
            .with_unit("azimuth", "Degrees");
    }

    #[test]
    fn test_attribute_lookup() {
        let store = MemoryStore::new()
            .with_variable("az", &[2], vec![0.0, 90.0])
            .with_unit("az", "Degrees");
        assert_eq!(store.variable_attribute("az", "UNITS").as_deref(), Some("Degrees"));
        assert_eq!(store.variable_attribute("az", "LABLAXIS"), None);
    }
}
