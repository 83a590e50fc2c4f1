//! Error types for field rendering

use thiserror::Error;

/// Errors that can occur while rendering a field.
///
/// Missing optional data is never an error: absent options simply yield
/// absent markup.
#[derive(Debug, Error)]
pub enum FormError {
    /// Widget tag not present in the dispatch table
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),

    /// Wrapper template failed to compile or render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Failure raised by the widget renderer
    #[error("Widget rendering error: {0}")]
    Widget(String),

    /// Options that cannot be interpreted for the requested widget
    #[error("Invalid field options: {0}")]
    InvalidOptions(String),
}

/// Result type alias for rendering operations
pub type FormResult<T> = Result<T, FormError>;
