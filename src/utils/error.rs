use thiserror::Error;

#[derive(Error, Debug)]
pub enum CubeError {
    #[error("Solver request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Solver error: {message}")]
    SolverError { message: String },

    #[error("Persistence error: {message}")]
    PersistenceError { message: String },
}

pub type Result<T> = std::result::Result<T, CubeError>;
