use std::io;
use thiserror::Error;

// Unified error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Profile parsing error: {0}")]
    ProfileParse(#[from] serde_yaml::Error),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(String),

    #[error("Invalid command line argument: {0}")]
    InvalidArgument(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadError(#[from] io::Error),

    #[error("YAML parsing error: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Invalid matcher for region '{0}': {1}")]
    InvalidMatcher(String, String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
