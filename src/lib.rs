//! GridClim: climate grid analysis utilities
//!
//! A Rust library of utilities for climate/geospatial gridded-data analysis:
//! anomalies against a climatology, dimension-consistency checks, coordinate
//! reference system reprojection, coordinate-name normalization, and linear
//! grid interpolation.
//!
//! ## Key Features
//!
//! - **Anomalies**: Per-group climatology baselines (month, season, day of
//!   year) reduced with mean or sum and subtracted across the time axis
//! - **Reprojection**: Resample a grid onto a reference grid given each
//!   array's coordinate reference system
//! - **Interpolation**: Upsample spatial grids onto evenly spaced
//!   coordinates with linear interpolation
//! - **Parallel Processing**: Group baselines and reprojection maps computed
//!   with Rayon
//! - **NetCDF Support**: Load labeled arrays (with CF time decoding) and
//!   write results back out
//!
//! ## Module Organization
//!
//! - [`grid`]: Labeled gridded arrays with named dimensions and coordinates
//! - [`anomaly`]: Anomaly computation against a climatology
//! - [`checks`]: Dimension-consistency checks
//! - [`crs`]: Coordinate reference systems (Lambert conformal, Plate Carree)
//! - [`reproject`]: Reproject-to-match resampling
//! - [`coords`]: Coordinate-name normalization
//! - [`interp`]: Coordinate-based linear interpolation
//! - [`netcdf_io`]: NetCDF loading and writing
//! - [`parallel`]: Parallel processing configuration
//! - [`errors`]: Centralized error handling
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use grid_clim::prelude::*;
//! use netcdf::open;
//!
//! let file = open("data.nc").unwrap();
//! let data = grid_clim::netcdf_io::read_data_array(&file, "temperature").unwrap();
//!
//! let clim_file = open("climatology.nc").unwrap();
//! let clim = grid_clim::netcdf_io::read_data_array(&clim_file, "temperature").unwrap();
//!
//! let anom = compute_anomaly(&data, &clim, GroupKey::Month, ReduceMode::Mean).unwrap();
//!
//! // Reproject onto another array's grid
//! let reference = grid_clim::netcdf_io::read_data_array(&file, "reference").unwrap();
//! let matched = reproject_match(&anom, &reference, &regional_lambert(), &global_plate_carree()).unwrap();
//! ```

// Core modules
pub mod anomaly;
pub mod checks;
pub mod constants;
pub mod coords;
pub mod crs;
pub mod errors;
pub mod grid;
pub mod interp;
pub mod netcdf_io;
pub mod parallel;
pub mod reproject;

// Direct re-exports for the public API
pub use anomaly::*;
pub use checks::*;
pub use coords::*;
pub use crs::*;
pub use errors::*;
pub use grid::*;
pub use interp::*;
pub use reproject::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::anomaly::{compute_anomaly, GroupKey, ReduceMode};
    pub use crate::checks::check_dim_consistency;
    pub use crate::coords::match_latlon_dims;
    pub use crate::crs::{global_plate_carree, regional_lambert, Crs};
    pub use crate::errors::{GridClimError, Result};
    pub use crate::grid::{Coord, DataArray};
    pub use crate::interp::interpolate_xy;
    pub use crate::netcdf_io::DataArrayWriter;
    pub use crate::parallel::ParallelConfig;
    pub use crate::reproject::reproject_match;
}
