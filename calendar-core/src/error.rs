//! Error type for calendar construction and layout.

use thiserror::Error;

/// Errors raised while building a calendar grid.
///
/// Every variant describes a problem with caller-supplied input. Servers
/// report these as a rejected request; none of them are fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("canvas must have positive, finite dimensions (got {width}x{height})")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("grid must have at least one column")]
    ZeroColumns,

    #[error("gap ratio must be finite and non-negative (got {0})")]
    InvalidGapRatio(f64),

    #[error("padding must be finite, non-negative and leave room for the grid (got {0})")]
    InvalidPadding(f64),

    #[error("{field} must be a positive number (got {value})")]
    InvalidDimension { field: &'static str, value: String },

    #[error("invalid birthday: {0:?}")]
    InvalidBirthday(String),

    #[error("malformed color: {0:?}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
