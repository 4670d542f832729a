//! Validation error types

use std::fmt;

/// Validation error for car input
///
/// Messages quote the offending field and mirror the wording clients of the
/// car API already match against.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field is absent
    Required { field: &'static str },

    /// Field must be a string
    NotAString { field: &'static str },

    /// String field is empty
    Empty { field: &'static str },

    /// Field must be a number
    NotANumber { field: &'static str },

    /// Field must be an integer
    NotAnInteger { field: &'static str },

    /// Number below the allowed minimum
    BelowMin { field: &'static str, min: i64 },

    /// Number above the allowed maximum
    AboveMax { field: &'static str, max: i64 },

    /// None of the listed fields is present
    MissingAny { fields: Vec<&'static str> },

    /// Body is valid JSON but not an object
    NotAnObject,

    /// Body could not be decoded at all
    Malformed { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "\"{}\" is required", field),
            Self::NotAString { field } => write!(f, "\"{}\" must be a string", field),
            Self::Empty { field } => write!(f, "\"{}\" is not allowed to be empty", field),
            Self::NotANumber { field } => write!(f, "\"{}\" must be a number", field),
            Self::NotAnInteger { field } => write!(f, "\"{}\" must be an integer", field),
            Self::BelowMin { field, min } => {
                write!(f, "\"{}\" must be greater than or equal to {}", field, min)
            }
            Self::AboveMax { field, max } => {
                write!(f, "\"{}\" must be less than or equal to {}", field, max)
            }
            Self::MissingAny { fields } => {
                write!(f, "\"value\" must contain at least one of [{}]", fields.join(", "))
            }
            Self::NotAnObject => write!(f, "\"value\" must be of type object"),
            Self::Malformed { reason } => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
