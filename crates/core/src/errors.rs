use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the performance engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid reporting period: {0}")]
    InvalidPeriod(String),
}

/// Failures while writing an index to disk. These are raised after the
/// in-memory result has been fully computed and never invalidate it.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failure: {0}")]
    Csv(#[from] csv::Error),
}
