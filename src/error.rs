//! Error types for Dhvani

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Dhvani error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input that violates an operation's precondition (e.g. an empty
    /// bearing report where one detection is required).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few detecting sensors to form a position estimate
    #[error("Insufficient inputs: {detected} detecting sensors, at least {required} required")]
    InsufficientInputs {
        /// Number of sensors that detected the source
        detected: usize,
        /// Minimum number of detecting sensors
        required: usize,
    },

    /// Bearing lines are parallel or coincident; WLS normal matrix is singular
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Invalid configuration (grid window, thresholds, sensor slots)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<basic_toml::Error> for Error {
    fn from(e: basic_toml::Error) -> Self {
        Error::Configuration(e.to_string())
    }
}
