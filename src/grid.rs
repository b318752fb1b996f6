//! Labeled gridded arrays
//!
//! This module provides [`DataArray`], an owned multi-dimensional array with
//! named dimensions and per-dimension coordinate values, the common currency
//! of every operation in this crate. Arrays are never mutated in place;
//! operations return new derived arrays.

use crate::errors::{GridClimError, Result};
use chrono::NaiveDateTime;
use ndarray::ArrayD;
use std::collections::HashMap;

/// Conventional name of the time dimension.
pub const TIME_DIM: &str = "time";

/// Coordinate values attached to one dimension
#[derive(Debug, Clone, PartialEq)]
pub enum Coord {
    /// Plain numeric coordinates (projected meters, degrees, levels, ...)
    Numeric(Vec<f64>),
    /// Timestamps, e.g. a decoded CF time axis
    Time(Vec<NaiveDateTime>),
}

impl Coord {
    /// Number of coordinate values
    pub fn len(&self) -> usize {
        match self {
            Coord::Numeric(v) => v.len(),
            Coord::Time(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An owned labeled array: name, ordered dimension names, coordinates, values.
///
/// Coordinates are optional per dimension; operations that need them fail with
/// [`GridClimError::CoordinateNotFound`] when they are absent or of the wrong
/// kind.
#[derive(Debug, Clone)]
pub struct DataArray {
    name: String,
    dims: Vec<String>,
    coords: HashMap<String, Coord>,
    data: ArrayD<f32>,
}

impl DataArray {
    /// Create a new labeled array, validating that the dimension list matches
    /// the array rank and that every coordinate length matches the shape
    /// along its dimension.
    pub fn new(
        name: impl Into<String>,
        dims: Vec<String>,
        coords: HashMap<String, Coord>,
        data: ArrayD<f32>,
    ) -> Result<Self> {
        if dims.len() != data.ndim() {
            return Err(GridClimError::Generic(format!(
                "Got {} dimension names for an array of rank {}",
                dims.len(),
                data.ndim()
            )));
        }

        for (dim, coord) in &coords {
            let axis = dims.iter().position(|d| d == dim).ok_or_else(|| {
                GridClimError::DimensionNotFound { dim: dim.clone() }
            })?;
            if coord.len() != data.shape()[axis] {
                return Err(GridClimError::Generic(format!(
                    "Coordinate '{}' has {} values but dimension length is {}",
                    dim,
                    coord.len(),
                    data.shape()[axis]
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            dims,
            coords,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered dimension names
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub fn coords(&self) -> &HashMap<String, Coord> {
        &self.coords
    }

    /// Axis index of a named dimension
    pub fn axis_of(&self, dim: &str) -> Result<usize> {
        self.dims
            .iter()
            .position(|d| d == dim)
            .ok_or_else(|| GridClimError::DimensionNotFound {
                dim: dim.to_string(),
            })
    }

    /// Coordinate values for a dimension, if any were attached
    pub fn coord(&self, dim: &str) -> Option<&Coord> {
        self.coords.get(dim)
    }

    /// Numeric coordinate values for a dimension
    pub fn numeric_coord(&self, dim: &str) -> Result<&[f64]> {
        match self.coords.get(dim) {
            Some(Coord::Numeric(v)) => Ok(v),
            _ => Err(GridClimError::CoordinateNotFound {
                dim: dim.to_string(),
            }),
        }
    }

    /// Timestamp coordinate values for a dimension
    pub fn time_coord(&self, dim: &str) -> Result<&[NaiveDateTime]> {
        match self.coords.get(dim) {
            Some(Coord::Time(v)) => Ok(v),
            _ => Err(GridClimError::CoordinateNotFound {
                dim: dim.to_string(),
            }),
        }
    }

    /// Return a new array with one dimension (and its coordinate entry)
    /// renamed. The data values are untouched.
    pub fn rename_dim(&self, from: &str, to: &str) -> Result<DataArray> {
        let axis = self.axis_of(from)?;

        let mut dims = self.dims.clone();
        dims[axis] = to.to_string();

        let mut coords = self.coords.clone();
        if let Some(coord) = coords.remove(from) {
            coords.insert(to.to_string(), coord);
        }

        Ok(DataArray {
            name: self.name.clone(),
            dims,
            coords,
            data: self.data.clone(),
        })
    }

    /// Locate the spatial dimension pair: `("y", "x")` if present, otherwise
    /// `("latitude", "longitude")`.
    pub fn spatial_dims(&self) -> Result<(&str, &str)> {
        for (y, x) in [("y", "x"), ("latitude", "longitude")] {
            if self.dims.iter().any(|d| d == y) && self.dims.iter().any(|d| d == x) {
                return Ok((y, x));
            }
        }
        Err(GridClimError::Generic(
            "No spatial dimension pair found (expected y/x or latitude/longitude)".to_string(),
        ))
    }

    /// Build a new array with the same dims and coords but different values
    /// (shape must match) and a new name.
    pub fn like(&self, name: impl Into<String>, data: ArrayD<f32>) -> Result<DataArray> {
        if data.shape() != self.data.shape() {
            return Err(GridClimError::Generic(format!(
                "Replacement values have shape {:?}, expected {:?}",
                data.shape(),
                self.data.shape()
            )));
        }
        Ok(DataArray {
            name: name.into(),
            dims: self.dims.clone(),
            coords: self.coords.clone(),
            data,
        })
    }
}
