//! Time-keyed column table for moment data.

use chrono::{DateTime, Utc};
use ndarray::Array1;

use crate::error::{SwaError, SwaResult};
use crate::unit::Unit;

/// A named column with an attached unit.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Array1<f64>,
    pub unit: Unit,
}

/// A table of columns sharing one time axis.
///
/// Columns keep insertion order; every column has exactly one value per
/// timestamp.
#[derive(Debug, Clone, Default)]
pub struct TimeTable {
    times: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl TimeTable {
    pub fn new(times: Vec<DateTime<Utc>>) -> Self {
        Self {
            times,
            columns: Vec::new(),
        }
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    /// Append a column; its length must match the time axis.
    pub fn push_column(&mut self, name: &str, values: Array1<f64>, unit: Unit) -> SwaResult<()> {
        if values.len() != self.times.len() {
            return Err(SwaError::InvalidData(format!(
                "column '{}' has {} rows but the time axis has {}",
                name,
                values.len(),
                self.times.len()
            )));
        }
        self.columns.push(Column {
            name: name.to_string(),
            values,
            unit,
        });
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn num_rows(&self) -> usize {
        self.times.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ndarray::array;

    fn times(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, i as u32).unwrap())
            .collect()
    }

    #[test]
    fn test_push_and_lookup() {
        let mut table = TimeTable::new(times(3));
        table
            .push_column("density", array![1.0, 2.0, 3.0], Unit::dimensionless())
            .unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 1);
        assert_eq!(table.column("density").unwrap().values[1], 2.0);
        assert!(table.column("velocity").is_none());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut table = TimeTable::new(times(3));
        let err = table
            .push_column("short", array![1.0], Unit::dimensionless())
            .unwrap_err();
        assert!(matches!(err, SwaError::InvalidData(_)));
    }

    #[test]
    fn test_column_order_is_insertion_order() {
        let mut table = TimeTable::new(times(2));
        for name in ["b", "a", "c"] {
            table
                .push_column(name, array![0.0, 0.0], Unit::dimensionless())
                .unwrap();
        }
        assert_eq!(table.column_names(), vec!["b", "a", "c"]);
    }
}
