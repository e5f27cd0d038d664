//! bf-core: shared foundation for the battery simulation crates.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI conversions for temperature, charge and time)
//! - sign (current sign convention)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod sign;
pub mod units;

pub use error::{BfError, BfResult};
pub use numeric::*;
pub use sign::SignConvention;
pub use units::*;
