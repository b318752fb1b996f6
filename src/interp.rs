//! Coordinate-based linear interpolation
//!
//! Upsamples the two named spatial dimensions of an array onto evenly spaced
//! coordinate grids, interpolating linearly along each dimension
//! independently. Uneven source spacing is honored: interpolation weights come
//! from coordinate values, not index positions.

use crate::errors::{GridClimError, Result};
use crate::grid::{Coord, DataArray};
use ndarray::{ArrayD, Axis, Zip};

/// Evenly spaced inclusive sequence of `num` values from `start` to `stop`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
            // Pin the endpoint exactly
            out[num - 1] = stop;
            out
        }
    }
}

/// Fractional position of `value` within a monotonic coordinate vector
/// (rising or falling). Returns `None` when the value lies outside the
/// coordinate range.
pub fn fractional_index(coords: &[f64], value: f64) -> Option<f64> {
    if coords.is_empty() {
        return None;
    }
    if coords.len() == 1 {
        let scale = coords[0].abs().max(1.0);
        return if (value - coords[0]).abs() <= scale * 1e-9 {
            Some(0.0)
        } else {
            None
        };
    }

    for i in 0..coords.len() - 1 {
        let (a, b) = (coords[i], coords[i + 1]);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if value >= lo && value <= hi {
            let span = b - a;
            if span == 0.0 {
                return Some(i as f64);
            }
            return Some(i as f64 + (value - a) / span);
        }
    }
    None
}

/// Interpolate an array onto new coordinate values along one axis.
fn interp_axis(
    values: &ArrayD<f32>,
    axis: usize,
    old_coords: &[f64],
    new_coords: &[f64],
) -> Result<ArrayD<f32>> {
    // Precompute bracketing indices and weights per output position
    let mut brackets = Vec::with_capacity(new_coords.len());
    for &c in new_coords {
        let idx = fractional_index(old_coords, c).ok_or_else(|| {
            GridClimError::InterpolationError(format!(
                "Coordinate value {} lies outside the source grid (non-monotonic coordinates?)",
                c
            ))
        })?;
        let i0 = idx.floor() as usize;
        let i1 = (i0 + 1).min(old_coords.len() - 1);
        let w = (idx - i0 as f64) as f32;
        brackets.push((i0, i1, w));
    }

    let mut out_shape: Vec<usize> = values.shape().to_vec();
    out_shape[axis] = new_coords.len();
    let mut out = ArrayD::<f32>::zeros(out_shape);

    for (j, &(i0, i1, w)) in brackets.iter().enumerate() {
        let lo = values.index_axis(Axis(axis), i0);
        let hi = values.index_axis(Axis(axis), i1);
        let mut dst = out.index_axis_mut(Axis(axis), j);
        Zip::from(&mut dst)
            .and(&lo)
            .and(&hi)
            .for_each(|d, &a, &b| *d = a * (1.0 - w) + b * w);
    }

    Ok(out)
}

/// Upsample the two named spatial dimensions by an integer factor.
///
/// New coordinates are evenly spaced between each dimension's first and last
/// existing value, with length `original * factor`. A factor of 1 resamples
/// onto an identical-length evenly spaced grid, which is not the identity for
/// irregularly spaced source grids. Other dimensions are untouched.
pub fn interpolate_xy(
    data: &DataArray,
    lon_name: &str,
    lat_name: &str,
    factor: usize,
) -> Result<DataArray> {
    if factor == 0 {
        return Err(GridClimError::InterpolationError(
            "Upsampling factor must be a positive integer".to_string(),
        ));
    }

    let lon_axis = data.axis_of(lon_name)?;
    let lat_axis = data.axis_of(lat_name)?;
    let lon = data.numeric_coord(lon_name)?.to_vec();
    let lat = data.numeric_coord(lat_name)?.to_vec();
    if lon.is_empty() || lat.is_empty() {
        return Err(GridClimError::InterpolationError(
            "Cannot interpolate along an empty coordinate".to_string(),
        ));
    }

    let new_lon = linspace(lon[0], lon[lon.len() - 1], lon.len() * factor);
    let new_lat = linspace(lat[0], lat[lat.len() - 1], lat.len() * factor);

    let values = interp_axis(data.data(), lon_axis, &lon, &new_lon)?;
    let values = interp_axis(&values, lat_axis, &lat, &new_lat)?;

    let mut coords = data.coords().clone();
    coords.insert(lon_name.to_string(), Coord::Numeric(new_lon));
    coords.insert(lat_name.to_string(), Coord::Numeric(new_lat));

    DataArray::new(data.name(), data.dims().to_vec(), coords, values)
}
