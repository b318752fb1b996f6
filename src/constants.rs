//! Physical constants shared across the crate.

/// Standard gravity in m s-2.
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Mean spherical Earth radius in meters, as used by the projections.
pub const EARTH_RADIUS_M: f64 = 6_371_229.0;
