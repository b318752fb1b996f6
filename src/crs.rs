//! Coordinate reference systems
//!
//! Immutable projection descriptors with forward (geographic -> projected)
//! and inverse transforms, plus proj4-style parameter listings. Two standard
//! descriptors are provided: a regional Lambert conformal conic and a global
//! equirectangular (Plate Carree) system. They are constructed explicitly and
//! passed into the reprojector rather than living as process globals.

use crate::constants::EARTH_RADIUS_M;
use std::f64::consts::PI;

/// Spherical Lambert Conformal Conic projection.
///
/// Maps a cone secant (or tangent) to the sphere onto a plane. Projected
/// coordinates are in meters, with the origin at the projection center.
#[derive(Debug, Clone)]
pub struct LambertConformal {
    /// Central meridian in radians
    lon0: f64,
    /// Central latitude in radians
    lat0: f64,
    /// Standard parallels in radians
    latin1: f64,
    latin2: f64,
    /// Sphere radius (meters)
    radius: f64,
    /// Cone constant (n)
    n: f64,
    /// F constant
    f: f64,
    /// Rho at the central latitude
    rho0: f64,
}

impl LambertConformal {
    /// Create a projection from its center and standard parallels (degrees).
    pub fn new(central_lon: f64, central_lat: f64, parallel1: f64, parallel2: f64) -> Self {
        let to_rad = PI / 180.0;

        let lon0 = central_lon * to_rad;
        let lat0 = central_lat * to_rad;
        let latin1 = parallel1 * to_rad;
        let latin2 = parallel2 * to_rad;
        let radius = EARTH_RADIUS_M;

        // Cone constant: tangent cone for a single parallel, secant otherwise
        let n = if (latin1 - latin2).abs() < 1e-10 {
            latin1.sin()
        } else {
            let ln_ratio = (latin1.cos() / latin2.cos()).ln();
            let tan_ratio =
                ((PI / 4.0 + latin2 / 2.0).tan() / (PI / 4.0 + latin1 / 2.0).tan()).ln();
            ln_ratio / tan_ratio
        };

        let f = (latin1.cos() * (PI / 4.0 + latin1 / 2.0).tan().powf(n)) / n;
        let rho0 = radius * f / (PI / 4.0 + lat0 / 2.0).tan().powf(n);

        Self {
            lon0,
            lat0,
            latin1,
            latin2,
            radius,
            n,
            f,
            rho0,
        }
    }

    /// Project geographic coordinates (degrees) to (x, y) in meters.
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let to_rad = PI / 180.0;
        let lat = lat_deg * to_rad;
        let lon = lon_deg * to_rad;

        // Normalize longitude difference to [-pi, pi]
        let mut dlon = lon - self.lon0;
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        let rho = self.radius * self.f / (PI / 4.0 + lat / 2.0).tan().powf(self.n);
        let theta = self.n * dlon;

        let x = rho * theta.sin();
        let y = self.rho0 - rho * theta.cos();
        (x, y)
    }

    /// Invert projected (x, y) meters back to geographic (lat, lon) degrees.
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let to_deg = 180.0 / PI;

        let rho = (x * x + (self.rho0 - y) * (self.rho0 - y)).sqrt();
        let rho = if self.n < 0.0 { -rho } else { rho };

        let theta = x.atan2(self.rho0 - y);

        let lat = 2.0 * ((self.radius * self.f / rho).powf(1.0 / self.n)).atan() - PI / 2.0;
        let lon = self.lon0 + theta / self.n;

        (lat * to_deg, lon * to_deg)
    }

    /// proj4-style parameter listing
    pub fn proj4_params(&self) -> Vec<(&'static str, String)> {
        let to_deg = 180.0 / PI;
        vec![
            ("proj", "lcc".to_string()),
            ("lon_0", format!("{}", self.lon0 * to_deg)),
            ("lat_0", format!("{}", self.lat0 * to_deg)),
            ("lat_1", format!("{}", self.latin1 * to_deg)),
            ("lat_2", format!("{}", self.latin2 * to_deg)),
            ("R", format!("{}", self.radius)),
        ]
    }
}

/// Equirectangular (Plate Carree) projection with coordinates in degrees.
///
/// Projected x is longitude and projected y is latitude, so both transforms
/// are coordinate swaps. This matches regular lat/lon grids.
#[derive(Debug, Clone, Default)]
pub struct PlateCarree;

impl PlateCarree {
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        (lon_deg, lat_deg)
    }

    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        (y, x)
    }

    pub fn proj4_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("proj", "eqc".to_string()),
            ("lon_0", "0".to_string()),
            ("R", format!("{}", EARTH_RADIUS_M)),
        ]
    }
}

/// A coordinate reference system descriptor
#[derive(Debug, Clone)]
pub enum Crs {
    LambertConformal(LambertConformal),
    PlateCarree(PlateCarree),
}

impl Crs {
    /// Lambert conformal conic from center and standard parallels (degrees)
    pub fn lambert_conformal(
        central_lon: f64,
        central_lat: f64,
        parallel1: f64,
        parallel2: f64,
    ) -> Self {
        Crs::LambertConformal(LambertConformal::new(
            central_lon,
            central_lat,
            parallel1,
            parallel2,
        ))
    }

    /// Global equirectangular system (degrees)
    pub fn plate_carree() -> Self {
        Crs::PlateCarree(PlateCarree)
    }

    /// Geographic (lat, lon) degrees -> projected (x, y)
    pub fn project(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        match self {
            Crs::LambertConformal(p) => p.project(lat_deg, lon_deg),
            Crs::PlateCarree(p) => p.project(lat_deg, lon_deg),
        }
    }

    /// Projected (x, y) -> geographic (lat, lon) degrees
    pub fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Crs::LambertConformal(p) => p.unproject(x, y),
            Crs::PlateCarree(p) => p.unproject(x, y),
        }
    }

    /// proj4-style parameter listing
    pub fn proj4_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Crs::LambertConformal(p) => p.proj4_params(),
            Crs::PlateCarree(p) => p.proj4_params(),
        }
    }

    /// proj4 string, e.g. `+proj=lcc +lon_0=35.75154 ...`
    pub fn proj4_string(&self) -> String {
        self.proj4_params()
            .iter()
            .map(|(k, v)| format!("+{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Regional Lambert conformal descriptor centered on Anatolia with standard
/// parallels at 20N and 60N.
pub fn regional_lambert() -> Crs {
    Crs::lambert_conformal(35.75154, 39.49263, 20.0, 60.0)
}

/// Global equirectangular descriptor.
pub fn global_plate_carree() -> Crs {
    Crs::plate_carree()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambert_center_maps_to_origin() {
        let proj = LambertConformal::new(35.75154, 39.49263, 20.0, 60.0);

        let (x, y) = proj.project(39.49263, 35.75154);
        assert!(x.abs() < 1e-6, "x should be ~0, got {}", x);
        assert!(y.abs() < 1e-6, "y should be ~0, got {}", y);
    }

    #[test]
    fn test_lambert_roundtrip() {
        let proj = LambertConformal::new(35.75154, 39.49263, 20.0, 60.0);

        for &(lat, lon) in &[(39.0, 32.0), (41.5, 29.0), (36.2, 44.0), (45.0, 35.75154)] {
            let (x, y) = proj.project(lat, lon);
            let (lat2, lon2) = proj.unproject(x, y);
            assert!((lat - lat2).abs() < 1e-8, "lat roundtrip: {} vs {}", lat, lat2);
            assert!((lon - lon2).abs() < 1e-8, "lon roundtrip: {} vs {}", lon, lon2);
        }
    }

    #[test]
    fn test_lambert_east_is_positive_x() {
        let proj = LambertConformal::new(35.75154, 39.49263, 20.0, 60.0);

        let (x_east, _) = proj.project(39.49263, 40.0);
        let (x_west, _) = proj.project(39.49263, 30.0);
        assert!(x_east > 0.0);
        assert!(x_west < 0.0);
    }

    #[test]
    fn test_plate_carree_is_degree_swap() {
        let crs = Crs::plate_carree();

        assert_eq!(crs.project(39.5, 35.7), (35.7, 39.5));
        assert_eq!(crs.unproject(35.7, 39.5), (39.5, 35.7));
    }

    #[test]
    fn test_proj4_params() {
        let regional = regional_lambert();
        let params = regional.proj4_params();
        assert_eq!(params[0], ("proj", "lcc".to_string()));
        assert!(regional.proj4_string().starts_with("+proj=lcc"));

        let global = global_plate_carree();
        assert_eq!(global.proj4_params()[0], ("proj", "eqc".to_string()));
    }
}
