//! Error types for component operations.

use sl_core::error::SlError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("{name} is not connected to a source")]
    NotConnected { name: String },

    #[error("Singular linear system: zero pivot at row {row}")]
    SingularSystem { row: usize },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<SlError> for ComponentError {
    fn from(e: SlError) -> Self {
        match e {
            SlError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            SlError::OutOfRange { what, .. } => ComponentError::InvalidArg { what },
        }
    }
}
