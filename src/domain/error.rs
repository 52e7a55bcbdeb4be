//! Domain error types.

/// Top-level error type for sigreplay.
#[derive(Debug, thiserror::Error)]
pub enum SigreplayError {
    #[error("empty price history")]
    EmptyPriceHistory,

    #[error("starting capital must be positive, got {value}")]
    InvalidStartingCapital { value: f64 },

    #[error("{name} must be a non-negative finite fraction, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigreplayError> for std::process::ExitCode {
    fn from(err: &SigreplayError) -> Self {
        let code: u8 = match err {
            SigreplayError::Io(_) => 1,
            SigreplayError::ConfigParse { .. }
            | SigreplayError::ConfigMissing { .. }
            | SigreplayError::ConfigInvalid { .. } => 2,
            SigreplayError::DataSource { .. } => 3,
            SigreplayError::EmptyPriceHistory
            | SigreplayError::InvalidStartingCapital { .. }
            | SigreplayError::InvalidRate { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
