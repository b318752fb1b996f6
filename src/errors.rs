//! Centralized error handling for GridClim
//!
//! This module provides structured error types covering the gridded-array,
//! projection, and NetCDF layers, enabling better error context and type
//! safety than a generic `Box<dyn Error>`.

use std::fmt;

/// Main error type for GridClim operations
#[derive(Debug)]
pub enum GridClimError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// Dimension not found in array
    DimensionNotFound { dim: String },

    /// Ordered dimension-name sequences of two arrays differ
    DimensionMismatch { left: String, right: String },

    /// Dimension exists but carries no coordinate values of the needed kind
    CoordinateNotFound { dim: String },

    /// A time slice belongs to a group with no climatology baseline
    MissingGroup { key: String },

    /// Projection or reprojection failure
    ProjectionError(String),

    /// Interpolation failure (bad factor, non-monotonic coordinates, ...)
    InterpolationError(String),

    /// CF time units could not be decoded
    TimeDecodingError(String),

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Generic error
    Generic(String),
}

impl fmt::Display for GridClimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridClimError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            GridClimError::IoError(e) => write!(f, "I/O error: {}", e),
            GridClimError::ArrayError(e) => write!(f, "Array error: {}", e),
            GridClimError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            GridClimError::DimensionNotFound { dim } => {
                write!(f, "Dimension '{}' not found in array", dim)
            }
            GridClimError::DimensionMismatch { left, right } => write!(
                f,
                "data dims do not match, consider matching (left: [{}], right: [{}])",
                left, right
            ),
            GridClimError::CoordinateNotFound { dim } => {
                write!(f, "Dimension '{}' has no usable coordinate values", dim)
            }
            GridClimError::MissingGroup { key } => {
                write!(f, "No climatology baseline for group '{}'", key)
            }
            GridClimError::ProjectionError(msg) => write!(f, "Projection error: {}", msg),
            GridClimError::InterpolationError(msg) => write!(f, "Interpolation error: {}", msg),
            GridClimError::TimeDecodingError(msg) => write!(f, "Time decoding error: {}", msg),
            GridClimError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            GridClimError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GridClimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridClimError::NetCDFError(e) => Some(e),
            GridClimError::IoError(e) => Some(e),
            GridClimError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for GridClimError {
    fn from(error: netcdf::Error) -> Self {
        GridClimError::NetCDFError(error)
    }
}

impl From<std::io::Error> for GridClimError {
    fn from(error: std::io::Error) -> Self {
        GridClimError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for GridClimError {
    fn from(error: ndarray::ShapeError) -> Self {
        GridClimError::ArrayError(error)
    }
}

impl From<String> for GridClimError {
    fn from(error: String) -> Self {
        GridClimError::Generic(error)
    }
}

impl From<&str> for GridClimError {
    fn from(error: &str) -> Self {
        GridClimError::Generic(error.to_string())
    }
}

/// Result type alias for GridClim operations
pub type Result<T> = std::result::Result<T, GridClimError>;
