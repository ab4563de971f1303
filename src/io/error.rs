//! Error types for generation, analysis and export operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// A `GenerationSettings` field failed validation
    ///
    /// Raised before any growth begins; settings are the only input that
    /// can make the pipeline fail outright. Terminal growth states such as
    /// frontier exhaustion are reported as values, never through this type.
    InvalidSettings {
        /// Name of the rejected field
        field: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An export was requested for a dungeon with no grown tiles
    EmptyDungeon {
        /// Description of the missing content
        reason: String,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSettings {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid setting '{field}' = '{value}': {reason}")
            }
            Self::EmptyDungeon { reason } => {
                write!(f, "Empty dungeon: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Create an invalid settings error
pub fn invalid_settings(
    field: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidSettings {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an empty dungeon error
pub fn empty_dungeon(reason: &impl ToString) -> GenerationError {
    GenerationError::EmptyDungeon {
        reason: reason.to_string(),
    }
}
