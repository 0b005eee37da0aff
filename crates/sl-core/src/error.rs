use thiserror::Error;

pub type SlResult<T> = Result<T, SlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },
}
