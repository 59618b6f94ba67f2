use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Intake errors
    #[error("Invalid badge format: {0}")]
    InvalidBadgeFormat(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    // Date handling
    #[error("Invalid date '{value}', expected {expected}")]
    InvalidDate { value: String, expected: String },
}

pub type Result<T> = std::result::Result<T, Error>;
