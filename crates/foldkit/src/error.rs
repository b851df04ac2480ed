//! Folding cell error types

use foldkit_core::CoreError;
use thiserror::Error;

/// Errors raised while preparing a fold transition
///
/// Every error is reported before the cell mutates any view, so a failed
/// request leaves the cell exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoldError {
    /// The content view cannot hold two title-height strips
    #[error("content height {content} is too small for title height {title}: two title-height strips must fit")]
    ContentTooSmall { title: u32, content: u32 },

    /// Spreading the remaining height over the requested flips makes a strip taller than the title
    #[error("{flips} additional flips give a {part_height}px strip, taller than the {title}px title")]
    TooFewFlips {
        flips: u32,
        part_height: u32,
        title: u32,
    },

    /// More flips were requested than there are pixels left to share
    #[error("{flips} additional flips leave empty strips: only {remaining}px remain")]
    TooManyFlips { flips: u32, remaining: u32 },

    /// Slicing a snapshot failed
    #[error("snapshot error: {0}")]
    Snapshot(#[from] CoreError),

    /// The animation scheduler was dropped
    #[error("animation scheduler is no longer alive")]
    SchedulerUnavailable,

    /// A configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl FoldError {
    /// Whether this error belongs to the invalid-configuration class
    ///
    /// These are fixed by changing heights or flip counts, never by retrying.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            FoldError::ContentTooSmall { .. }
                | FoldError::TooFewFlips { .. }
                | FoldError::TooManyFlips { .. }
                | FoldError::Config(_)
        )
    }
}

/// Result type for folding cell operations
pub type Result<T> = std::result::Result<T, FoldError>;
