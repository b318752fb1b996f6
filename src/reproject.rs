//! Reproject a grid onto the spatial grid of a reference array
//!
//! Each array is tagged with its coordinate reference system; for every cell
//! of the reference grid the reference CRS is inverted to geographic
//! coordinates, the source CRS is applied forward, and the source values are
//! sampled with bilinear interpolation. Cells falling outside the source grid
//! become NaN. Non-spatial dimensions (e.g. time) pass through unchanged.

use crate::crs::Crs;
use crate::errors::{GridClimError, Result};
use crate::grid::{Coord, DataArray};
use crate::interp::fractional_index;
use ndarray::ArrayD;
use rayon::prelude::*;

/// Reproject `data` so that its spatial grid matches `reference`'s.
///
/// The output carries the reference's spatial dimension names and coordinate
/// sequences exactly, with `data`'s values resampled onto them. Spatial
/// coordinates of both arrays are interpreted in the projected units of their
/// respective CRS (meters for Lambert conformal, degrees for Plate Carree).
pub fn reproject_match(
    data: &DataArray,
    reference: &DataArray,
    data_crs: &Crs,
    reference_crs: &Crs,
) -> Result<DataArray> {
    let (src_y_dim, src_x_dim) = data.spatial_dims()?;
    let (ref_y_dim, ref_x_dim) = reference.spatial_dims()?;

    let src_y = data.numeric_coord(src_y_dim)?;
    let src_x = data.numeric_coord(src_x_dim)?;
    let ref_y = reference.numeric_coord(ref_y_dim)?.to_vec();
    let ref_x = reference.numeric_coord(ref_x_dim)?.to_vec();

    if src_y.is_empty() || src_x.is_empty() {
        return Err(GridClimError::ProjectionError(
            "Source array has an empty spatial coordinate".to_string(),
        ));
    }

    let y_axis = data.axis_of(src_y_dim)?;
    let x_axis = data.axis_of(src_x_dim)?;
    let (src_ny, src_nx) = (src_y.len(), src_x.len());
    let (ref_ny, ref_nx) = (ref_y.len(), ref_x.len());

    println!(
        "⚡ Reprojecting '{}' onto {}x{} reference grid",
        data.name(),
        ref_ny,
        ref_nx
    );

    // Map every reference cell to a fractional source index, in parallel.
    // None marks cells outside the source grid.
    let mapping: Vec<Option<(f64, f64)>> = (0..ref_ny * ref_nx)
        .into_par_iter()
        .map(|flat| {
            let yi = flat / ref_nx;
            let xi = flat % ref_nx;
            let (lat, lon) = reference_crs.unproject(ref_x[xi], ref_y[yi]);
            let (px, py) = data_crs.project(lat, lon);
            match (fractional_index(src_y, py), fractional_index(src_x, px)) {
                (Some(fy), Some(fx)) => Some((fy, fx)),
                _ => None,
            }
        })
        .collect();

    // Bring the spatial axes to the back so the source reads as a stack of
    // 2-D slabs
    let ndim = data.data().ndim();
    let mut order: Vec<usize> = (0..ndim).filter(|&a| a != y_axis && a != x_axis).collect();
    order.push(y_axis);
    order.push(x_axis);

    let src_std: ArrayD<f32> = data
        .data()
        .view()
        .permuted_axes(order.clone())
        .as_standard_layout()
        .to_owned();
    let outer_shape: Vec<usize> = src_std.shape()[..ndim - 2].to_vec();
    let outer: usize = outer_shape.iter().product();
    let src = src_std.into_shape(vec![outer, src_ny, src_nx])?;

    let mut out = ArrayD::<f32>::from_elem(vec![outer, ref_ny, ref_nx], f32::NAN);
    for o in 0..outer {
        for yi in 0..ref_ny {
            for xi in 0..ref_nx {
                if let Some((fy, fx)) = mapping[yi * ref_nx + xi] {
                    out[[o, yi, xi]] = bilinear_sample(&src, o, fy, fx);
                }
            }
        }
    }

    // Restore the original dimension order
    let mut permuted_shape = outer_shape;
    permuted_shape.push(ref_ny);
    permuted_shape.push(ref_nx);
    let out = out.into_shape(permuted_shape)?;

    let mut inverse = vec![0usize; ndim];
    for (i, &a) in order.iter().enumerate() {
        inverse[a] = i;
    }
    let out: ArrayD<f32> = out
        .view()
        .permuted_axes(inverse)
        .as_standard_layout()
        .to_owned();

    // The spatial dims take the reference's names and coordinates
    let mut dims = data.dims().to_vec();
    dims[y_axis] = ref_y_dim.to_string();
    dims[x_axis] = ref_x_dim.to_string();

    let mut coords = data.coords().clone();
    coords.remove(src_y_dim);
    coords.remove(src_x_dim);
    coords.insert(ref_y_dim.to_string(), Coord::Numeric(ref_y));
    coords.insert(ref_x_dim.to_string(), Coord::Numeric(ref_x));

    DataArray::new(data.name(), dims, coords, out)
}

/// Bilinear sample of slab `o` at fractional indices (fy, fx). Returns NaN
/// when any of the four corners is NaN.
fn bilinear_sample(src: &ArrayD<f32>, o: usize, fy: f64, fx: f64) -> f32 {
    let ny = src.shape()[1];
    let nx = src.shape()[2];

    let y0 = fy.floor() as usize;
    let x0 = fx.floor() as usize;
    let y1 = (y0 + 1).min(ny - 1);
    let x1 = (x0 + 1).min(nx - 1);

    let wy = (fy - y0 as f64) as f32;
    let wx = (fx - x0 as f64) as f32;

    let v00 = src[[o, y0, x0]];
    let v10 = src[[o, y0, x1]];
    let v01 = src[[o, y1, x0]];
    let v11 = src[[o, y1, x1]];

    if v00.is_nan() || v10.is_nan() || v01.is_nan() || v11.is_nan() {
        return f32::NAN;
    }

    let top = v00 * (1.0 - wx) + v10 * wx;
    let bottom = v01 * (1.0 - wx) + v11 * wx;
    top * (1.0 - wy) + bottom * wy
}
