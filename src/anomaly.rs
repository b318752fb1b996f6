//! Anomaly computation against a climatology
//!
//! The climatology's time axis is grouped by a calendar key (month, season,
//! day of year), each group is reduced over time with the chosen aggregation,
//! and the matching group baseline is subtracted from every time slice of the
//! target array. The result keeps the target's dimensions and coordinates.

use crate::errors::{GridClimError, Result};
use crate::grid::{DataArray, TIME_DIM};
use chrono::{Datelike, NaiveDateTime};
use ndarray::{ArrayD, Axis, Zip};
use rayon::prelude::*;
use std::collections::HashMap;

/// Calendar key by which the time dimension is grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Month of year (1-12)
    Month,
    /// Meteorological season (DJF, MAM, JJA, SON)
    Season,
    /// Day of year (1-366)
    DayOfYear,
}

impl GroupKey {
    /// Group value of one timestamp
    pub fn key_of(&self, t: &NaiveDateTime) -> u32 {
        match self {
            GroupKey::Month => t.month(),
            GroupKey::Season => match t.month() {
                12 | 1 | 2 => 0,
                3..=5 => 1,
                6..=8 => 2,
                _ => 3,
            },
            GroupKey::DayOfYear => t.ordinal(),
        }
    }

    /// Human-readable label for a group value, used in error messages
    pub fn label(&self, key: u32) -> String {
        match self {
            GroupKey::Month => format!("month={}", key),
            GroupKey::Season => {
                let name = match key {
                    0 => "DJF",
                    1 => "MAM",
                    2 => "JJA",
                    _ => "SON",
                };
                format!("season={}", name)
            }
            GroupKey::DayOfYear => format!("dayofyear={}", key),
        }
    }
}

/// Aggregation applied to each climatology group over time.
///
/// A closed enumeration: an unsupported mode is unrepresentable, so there is
/// no silent fall-through path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceMode {
    Mean,
    Sum,
}

/// Compute the anomaly of `data` relative to `climatology`.
///
/// Both arrays must carry a `time` dimension with timestamp coordinates, and
/// the climatology's non-time dimensions must match the target's. Non-finite
/// climatology values are skipped during reduction; a mean group with no
/// finite values yields NaN baselines.
pub fn compute_anomaly(
    data: &DataArray,
    climatology: &DataArray,
    key: GroupKey,
    mode: ReduceMode,
) -> Result<DataArray> {
    let data_taxis = data.axis_of(TIME_DIM)?;
    let clim_taxis = climatology.axis_of(TIME_DIM)?;
    let data_times = data.time_coord(TIME_DIM)?;
    let clim_times = climatology.time_coord(TIME_DIM)?;

    // Group climatology time indices by the calendar key
    let mut groups: HashMap<u32, Vec<usize>> = HashMap::new();
    for (i, t) in clim_times.iter().enumerate() {
        groups.entry(key.key_of(t)).or_default().push(i);
    }
    let groups: Vec<(u32, Vec<usize>)> = groups.into_iter().collect();

    println!("⚡ Computing {} group baselines in parallel", groups.len());

    let clim_values = climatology.data();
    let baselines: HashMap<u32, ArrayD<f32>> = groups
        .into_par_iter()
        .map(|(k, indices)| (k, reduce_group(clim_values, clim_taxis, &indices, mode)))
        .collect();

    let mut slice_shape: Vec<usize> = data.shape().to_vec();
    slice_shape.remove(data_taxis);

    let mut anomaly = data.data().clone();
    for (i, t) in data_times.iter().enumerate() {
        let k = key.key_of(t);
        let baseline = baselines
            .get(&k)
            .ok_or_else(|| GridClimError::MissingGroup { key: key.label(k) })?;

        if baseline.shape() != slice_shape.as_slice() {
            return Err(GridClimError::Generic(format!(
                "Climatology baseline shape {:?} does not match data slice shape {:?}",
                baseline.shape(),
                slice_shape
            )));
        }

        let mut slice = anomaly.index_axis_mut(Axis(data_taxis), i);
        slice -= baseline;
    }

    data.like(format!("{}_anomaly", data.name()), anomaly)
}

/// Reduce the slices at `indices` along `axis` with the chosen aggregation,
/// skipping non-finite values.
fn reduce_group(
    values: &ArrayD<f32>,
    axis: usize,
    indices: &[usize],
    mode: ReduceMode,
) -> ArrayD<f32> {
    let mut shape: Vec<usize> = values.shape().to_vec();
    shape.remove(axis);

    // Accumulate in f64 to avoid precision loss
    let mut sum = ArrayD::<f64>::zeros(shape.clone());
    let mut count = ArrayD::<u32>::zeros(shape);

    for &i in indices {
        let slice = values.index_axis(Axis(axis), i);
        Zip::from(&mut sum)
            .and(&mut count)
            .and(&slice)
            .for_each(|s, c, &v| {
                if v.is_finite() {
                    *s += v as f64;
                    *c += 1;
                }
            });
    }

    match mode {
        ReduceMode::Mean => Zip::from(&sum).and(&count).map_collect(|&s, &c| {
            if c > 0 {
                (s / c as f64) as f32
            } else {
                f32::NAN
            }
        }),
        ReduceMode::Sum => sum.mapv(|s| s as f32),
    }
}
