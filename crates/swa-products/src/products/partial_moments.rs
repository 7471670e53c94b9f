//! The partial-moments product.
//!
//! A partial-moments file holds moment variables for both sensor heads,
//! named `SWA_EAS<head>_<Quantity>_<code>`. The trailing code character
//! gives the physical rank of the quantity and decides how many table
//! columns it expands into: scalar `N` -> 1, vector `V`/`H` -> 3,
//! symmetric tensor `P` -> 6 independent components.

use chrono::{DateTime, Utc};
use ndarray::{Array1, Ix1, Ix2};
use swa_common::{Quantity, SwaError, SwaResult, TimeTable};
use tracing::debug;

use cdf_adapter::CdfHandle;

use crate::peek::ColumnSummary;

/// Descriptor claimed by this product type (exact, case-sensitive).
pub const DESCRIPTOR: &str = "SWA-EAS-PartMoms";

const VECTOR_SUFFIXES: [&str; 3] = ["x", "y", "z"];
const TENSOR_SUFFIXES: [&str; 6] = ["xx", "yy", "zz", "xy", "xz", "yz"];

/// Which of the two EAS sensor heads to read moments for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorHead {
    #[default]
    Eas1,
    Eas2,
}

impl SensorHead {
    /// Variable-name prefix selecting this head's moments.
    pub fn prefix(self) -> &'static str {
        match self {
            SensorHead::Eas1 => "SWA_EAS1_",
            SensorHead::Eas2 => "SWA_EAS2_",
        }
    }

    fn epoch_variable(self) -> &'static str {
        match self {
            SensorHead::Eas1 => "SWA_EAS1_SCET",
            SensorHead::Eas2 => "SWA_EAS2_SCET",
        }
    }
}

/// Partial moments for one sensor head, as a time-keyed column table.
#[derive(Debug)]
pub struct PartialMoments {
    head: SensorHead,
    table: TimeTable,
    skipped: Vec<String>,
}

impl PartialMoments {
    /// Whether `handle` is an EAS partial-moments file.
    pub fn matches(handle: &CdfHandle) -> bool {
        handle
            .descriptor()
            .map(|d| d == DESCRIPTOR)
            .unwrap_or(false)
    }

    /// Construct for the default head (EAS1).
    pub fn from_handle(handle: &CdfHandle) -> SwaResult<Self> {
        Self::from_handle_for_head(handle, SensorHead::default())
    }

    /// Construct from an open file, expanding every moment variable of
    /// `head` into columns by its trailing rank code.
    ///
    /// Variables with an unrecognized code are skipped without error;
    /// their names are recorded in [`PartialMoments::skipped`].
    pub fn from_handle_for_head(handle: &CdfHandle, head: SensorHead) -> SwaResult<Self> {
        if !Self::matches(handle) {
            return Err(SwaError::TypeMismatch {
                product: "PartialMoments",
                descriptor: handle.descriptor().unwrap_or_default(),
            });
        }

        let times = handle.get_time(head.epoch_variable())?;
        let num_rows = times.len();
        let mut table = TimeTable::new(times);
        let mut skipped = Vec::new();

        for name in handle.variable_names() {
            if !name.starts_with(head.prefix()) || name == head.epoch_variable() {
                continue;
            }
            // The rank code decides the expansion before any data is read;
            // unrecognized variables never touch their payload.
            match name.chars().last() {
                Some('N') => {
                    let quantity = handle.get_quantity(&name)?;
                    let values = scalar_column(&name, &quantity, num_rows)?;
                    table.push_column(&name, values, quantity.unit.clone())?;
                }
                Some('V') | Some('H') => {
                    let quantity = handle.get_quantity(&name)?;
                    expand_components(&mut table, &name, &quantity, &VECTOR_SUFFIXES)?;
                }
                Some('P') => {
                    let quantity = handle.get_quantity(&name)?;
                    expand_components(&mut table, &name, &quantity, &TENSOR_SUFFIXES)?;
                }
                _ => skipped.push(name),
            }
        }

        if !skipped.is_empty() {
            debug!(skipped = ?skipped, "skipped variables with unrecognized rank codes");
        }
        Ok(Self {
            head,
            table,
            skipped,
        })
    }

    pub fn head(&self) -> SensorHead {
        self.head
    }

    /// Times of the measurements.
    pub fn times(&self) -> &[DateTime<Utc>] {
        self.table.times()
    }

    /// The expanded moment table, one column per tensor component.
    pub fn table(&self) -> &TimeTable {
        &self.table
    }

    /// Variables whose trailing rank code was not recognized and which
    /// therefore produced no columns.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Quick-look summary: per-column value range.
    pub fn peek(&self) -> Vec<ColumnSummary> {
        self.table
            .columns()
            .iter()
            .map(|c| ColumnSummary {
                name: c.name.clone(),
                unit: c.unit.symbol.clone(),
                min: c.values.iter().copied().fold(f64::INFINITY, f64::min),
                max: c.values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            })
            .collect()
    }
}

/// A rank-code `N` variable: one value per time step.
fn scalar_column(name: &str, quantity: &Quantity, num_rows: usize) -> SwaResult<Array1<f64>> {
    if quantity.len() != num_rows {
        return Err(SwaError::InvalidData(format!(
            "scalar variable '{}' has {} values for {} timestamps",
            name,
            quantity.len(),
            num_rows
        )));
    }
    quantity
        .values
        .view()
        .into_dimensionality::<Ix1>()
        .map(|v| v.to_owned())
        .or_else(|_| {
            // Tolerate a trailing singleton dimension (T x 1).
            Ok(Array1::from_iter(quantity.values.iter().copied()))
        })
}

/// Expand a vector or tensor variable into one column per component.
fn expand_components(
    table: &mut TimeTable,
    name: &str,
    quantity: &Quantity,
    suffixes: &[&str],
) -> SwaResult<()> {
    let components = quantity
        .values
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| {
            SwaError::InvalidData(format!(
                "variable '{}' must be 2D [time, component], got {:?}",
                name,
                quantity.shape()
            ))
        })?;
    if components.ncols() != suffixes.len() {
        return Err(SwaError::InvalidData(format!(
            "variable '{}' has {} components, expected {}",
            name,
            components.ncols(),
            suffixes.len()
        )));
    }
    for (i, suffix) in suffixes.iter().enumerate() {
        table.push_column(
            &format!("{}_{}", name, suffix),
            components.column(i).to_owned(),
            quantity.unit.clone(),
        )?;
    }
    Ok(())
}
