use crate::core::types::SourceLanguage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Review error: {0}")]
    Review(#[from] ReviewError),
    #[error("Server error: {0}")]
    Server(#[from] ServerError),
    #[error("I/O error while {0}: {1}")]
    IO(String, #[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Code is required")]
    EmptyCode,
    #[error(
        "Language mismatch: code looks like {detected} but {selected} was selected"
    )]
    LanguageMismatch {
        detected: SourceLanguage,
        selected: SourceLanguage,
    },
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Failed to analyze code: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Server terminated unexpectedly: {0}")]
    Serve(#[source] std::io::Error),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IO("I/O operation failed".to_string(), err)
    }
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// Caller mistakes (empty input, unknown or mismatched language) exit
    /// with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Review(
                ReviewError::EmptyCode
                | ReviewError::LanguageMismatch { .. }
                | ReviewError::UnsupportedLanguage(_),
            ) => 2,
            _ => 1,
        }
    }
}
