//! Pre-flight consistency checks between gridded arrays.

use crate::errors::{GridClimError, Result};
use crate::grid::DataArray;

/// Assert that two arrays carry identical ordered dimension-name sequences.
///
/// Only dimension names and their order are compared; shapes, sizes, and
/// coordinate values are not. Prints a confirmation on success and fails with
/// [`GridClimError::DimensionMismatch`] otherwise.
pub fn check_dim_consistency(data1: &DataArray, data2: &DataArray) -> Result<()> {
    if data1.dims() != data2.dims() {
        return Err(GridClimError::DimensionMismatch {
            left: data1.dims().join(", "),
            right: data2.dims().join(", "),
        });
    }
    println!("✅ data dims match, you can continue");
    Ok(())
}
