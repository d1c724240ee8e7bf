//! Data model for the dashboard's datasets.
//!
//! Everything a deployment can vary lives here as plain configuration
//! data: which regions exist, which files and columns back them, how
//! each forecast series is shifted to line up with the period it
//! predicts, and how values are scaled for display. The compute crate
//! consumes these types; it never hardcodes a region.

pub mod dataset;
pub mod registry;

pub use dataset::{
    DatasetConfig, HorizonShift, Region, ShiftDirection, UnknownRegion, ValueUnit,
};
pub use registry::{DatasetRegistry, RegistryError};
