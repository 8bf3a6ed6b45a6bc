use thiserror::Error;

#[derive(Error, Debug)]
pub enum PantryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No API key configured. Set GEMINI_API_KEY or run `pantry-pal config --set-api-key YOUR_KEY`")]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load image {path}: {reason}")]
    ImageLoad { path: String, reason: String },

    #[error("No images found in: {0}")]
    NoImagesFound(String),

    #[error("Input error: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] pantry_pal_common::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PantryError>;
