//! NetCDF I/O for labeled arrays
//!
//! This module loads a NetCDF variable together with its per-dimension
//! coordinate variables into a [`DataArray`], decoding CF time units into
//! timestamps, and writes arrays back out with coordinates and a history
//! attribute.

use crate::errors::{GridClimError, Result};
use crate::grid::{Coord, DataArray};
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use ndarray::ArrayD;
use netcdf::{create, AttributeValue, File};
use std::collections::HashMap;
use std::{fs, path::Path};

/// Load a variable and its coordinate variables into a labeled array.
///
/// For each dimension of the variable, a same-named variable in the file is
/// treated as its coordinate. A coordinate variable whose `units` attribute
/// looks like CF time ("days since 1990-01-01", ...) is decoded into
/// timestamps; anything else is kept numeric. Dimensions without a
/// coordinate variable simply carry no coordinates.
pub fn read_data_array(file: &File, var_name: &str) -> Result<DataArray> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| GridClimError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    let dims: Vec<String> = var
        .dimensions()
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let values = var.get_values::<f32, _>(..)?;
    let data = ArrayD::from_shape_vec(shape, values)?;

    let mut coords = HashMap::new();
    for dim in &dims {
        let cvar = match file.variable(dim) {
            Some(v) => v,
            None => continue,
        };
        let cvalues = cvar.get_values::<f64, _>(..)?;

        let units = cvar
            .attribute("units")
            .and_then(|attr| match attr.value().ok()? {
                AttributeValue::Str(s) => Some(s),
                _ => None,
            });

        let coord = match units {
            Some(u) if u.contains(" since ") => Coord::Time(decode_cf_times(&cvalues, &u)?),
            _ => Coord::Numeric(cvalues),
        };
        coords.insert(dim.clone(), coord);
    }

    DataArray::new(var_name, dims, coords, data)
}

/// Decode CF-style time values ("<unit> since <epoch>") into timestamps.
pub fn decode_cf_times(values: &[f64], units: &str) -> Result<Vec<NaiveDateTime>> {
    let mut parts = units.splitn(2, " since ");
    let unit = parts.next().unwrap_or("").trim();
    let epoch_str = parts
        .next()
        .ok_or_else(|| {
            GridClimError::TimeDecodingError(format!("Units '{}' lack an epoch", units))
        })?
        .trim();

    let seconds_per = match unit {
        "seconds" | "second" => 1.0,
        "minutes" | "minute" => 60.0,
        "hours" | "hour" => 3600.0,
        "days" | "day" => 86400.0,
        other => {
            return Err(GridClimError::TimeDecodingError(format!(
                "Unsupported time unit '{}'",
                other
            )))
        }
    };

    let epoch = parse_cf_epoch(epoch_str)?;
    Ok(values
        .iter()
        .map(|&v| epoch + Duration::seconds((v * seconds_per).round() as i64))
        .collect())
}

fn parse_cf_epoch(s: &str) -> Result<NaiveDateTime> {
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(t) = d.and_hms_opt(0, 0, 0) {
            return Ok(t);
        }
    }
    Err(GridClimError::TimeDecodingError(format!(
        "Cannot parse epoch '{}'",
        s
    )))
}

/// Epoch used when re-encoding timestamp coordinates on write.
const ENCODE_UNITS: &str = "hours since 1970-01-01 00:00:00";

/// Writer for labeled arrays
pub struct DataArrayWriter<'a> {
    output_path: &'a Path,
}

impl<'a> DataArrayWriter<'a> {
    pub fn new(output_path: &'a Path) -> Self {
        Self { output_path }
    }

    /// Write the array to a new NetCDF file: dimensions, coordinate
    /// variables (timestamps re-encoded as hours since 1970-01-01), the data
    /// variable, and a history attribute.
    pub fn write(&self, array: &DataArray) -> Result<()> {
        if self.output_path.exists() {
            fs::remove_file(self.output_path)?;
        }

        let mut file = create(self.output_path)?;

        for (dim, &len) in array.dims().iter().zip(array.shape()) {
            file.add_dimension(dim, len)?;
        }

        for dim in array.dims() {
            match array.coord(dim) {
                Some(Coord::Numeric(values)) => {
                    let mut cvar = file.add_variable::<f64>(dim, &[dim.as_str()])?;
                    cvar.put_values(values, ..)?;
                }
                Some(Coord::Time(times)) => {
                    let epoch = parse_cf_epoch("1970-01-01 00:00:00")?;
                    let encoded: Vec<f64> = times
                        .iter()
                        .map(|t| (*t - epoch).num_seconds() as f64 / 3600.0)
                        .collect();
                    let mut cvar = file.add_variable::<f64>(dim, &[dim.as_str()])?;
                    cvar.put_attribute("units", ENCODE_UNITS)?;
                    cvar.put_values(&encoded, ..)?;
                }
                None => {}
            }
        }

        let dim_refs: Vec<&str> = array.dims().iter().map(|s| s.as_str()).collect();
        let mut var = file.add_variable::<f32>(array.name(), &dim_refs)?;
        var.put(array.data().view(), ..)?;

        file.add_attribute(
            "history",
            format!("Created by GridClim on {}", Utc::now().to_rfc3339()),
        )?;

        Ok(())
    }
}
