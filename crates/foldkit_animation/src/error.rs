//! Animation error types

use thiserror::Error;

/// Animation-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// A fold direction outside the four supported modes
    #[error("Unsupported fold mode: {0}")]
    UnsupportedMode(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
