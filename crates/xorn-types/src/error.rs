use thiserror::Error;

/// Errors produced by type conversions and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidId(String),

    #[error("unknown object type: {0}")]
    UnknownObjectType(String),
}

/// Reason a payload was rejected by the validator.
///
/// `field` is the dotted path of the offending field inside the payload,
/// e.g. `line.dash_length` or `pos.x`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// NaN, infinite or subnormal value in a coordinate or size.
    #[error("{field} is not zero or a finite normal number: {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// Negative value in a field that must be zero or positive.
    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: f64 },

    /// Integer enum or range field outside `[0, bound)`.
    #[error("{field} out of range [0, {bound}): {value}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        bound: i32,
    },

    /// Angle other than 0, 90, 180 or 270.
    #[error("{field} must be one of 0, 90, 180, 270: {value}")]
    InvalidAngle { field: &'static str, value: i32 },

    /// A net is marked inverted without being a pin.
    #[error("inverted net must be a pin")]
    InvertedNotPin,
}

impl ValidationError {
    /// Dotted path of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotFinite { field, .. }
            | Self::Negative { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidAngle { field, .. } => field,
            Self::InvertedNotPin => "is_inverted",
        }
    }
}
