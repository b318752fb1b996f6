//! Coordinate-name normalization
//!
//! Grids coming out of a reprojection carry the generic projected dimension
//! names `y` and `x`; this module renames them to the conventional geographic
//! labels.

use crate::errors::Result;
use crate::grid::DataArray;

/// Rename the generic projected dimensions to geographic names:
/// `y` -> `latitude` and `x` -> `longitude`.
///
/// Fails with [`crate::errors::GridClimError::DimensionNotFound`] when either
/// generic name is absent. Data values and coordinate contents are unchanged;
/// only the labels move.
pub fn match_latlon_dims(data: &DataArray) -> Result<DataArray> {
    data.rename_dim("y", "latitude")?
        .rename_dim("x", "longitude")
}
