//! Common types shared across the SWA/EAS workspace.

pub mod error;
pub mod table;
pub mod time;
pub mod unit;

pub use error::{SwaError, SwaResult};
pub use table::{Column, TimeTable};
pub use time::{epochs_to_datetimes, tt2000_to_datetime};
pub use unit::{parse_unit, Quantity, Unit, UnitQuantityKind};
