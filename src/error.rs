//! Error types for morphlab

use thiserror::Error;

/// Main error type for morphlab
#[derive(Error, Debug)]
pub enum MorphlabError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Model loading errors
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model file not found: {0}")]
    NotFound(String),

    #[error("Failed to load model: {0}")]
    Load(String),
}

/// Preset save/load errors
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read preset file: {0}")]
    ReadFile(String),

    #[error("Failed to parse preset: {0}")]
    Parse(String),

    #[error("Failed to write preset file: {0}")]
    WriteFile(String),
}

/// Result type alias for morphlab operations
pub type Result<T> = std::result::Result<T, MorphlabError>;
