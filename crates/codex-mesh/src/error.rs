//! Error types for mesh generation and export.

use std::fmt;
use std::path::PathBuf;

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while generating or exporting a mesh.
#[derive(Debug)]
pub enum MeshError {
    /// An argument was outside its valid domain.
    InvalidArgument {
        /// The argument or operation that rejected the value.
        context: &'static str,
        /// Description of what was invalid.
        detail: String,
    },
    /// Generation options were missing or conflicting.
    Config {
        /// Description of the conflict.
        detail: String,
    },
    /// Writing an output artifact failed.
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// Serializing an output artifact failed.
    Json {
        /// Which artifact was being serialized.
        context: &'static str,
        /// The error message.
        message: String,
    },
}

impl MeshError {
    pub(crate) fn invalid(context: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { context, detail } => {
                write!(f, "invalid {context}: {detail}")
            }
            Self::Config { detail } => write!(f, "configuration error: {detail}"),
            Self::Io { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            Self::Json { context, message } => {
                write!(f, "failed to serialize {context}: {message}")
            }
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
