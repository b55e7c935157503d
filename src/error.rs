//! Error types for scene reconstruction.

use thiserror::Error;

/// Result type alias using ViewerError.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Main error type for model and recipe reconstruction.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Failed to read or parse a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to decode or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A background loading task panicked or was cancelled.
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Asset not found at the given path.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Failed to reconstruct a model.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    /// Texture reference could not be resolved.
    #[error("Unresolved texture reference: {0}")]
    UnresolvedTexture(String),

    /// Model inheritance chain too deep (circular reference protection).
    #[error("Model inheritance too deep (possible circular reference): {0}")]
    ModelInheritanceTooDeep(String),

    /// Item tag references nested too deeply (circular reference protection).
    #[error("Tag nesting too deep (possible circular reference): {0}")]
    TagNestingTooDeep(String),

    /// An ingredient had neither an item nor a tag.
    #[error("Couldn't parse ingredient: {0}")]
    InvalidIngredient(String),

    /// A recipe document was structurally invalid.
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    /// Failed to export a scene.
    #[error("Export error: {0}")]
    Export(String),
}
