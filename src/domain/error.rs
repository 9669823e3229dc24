use std::io;

use thiserror::Error;

/// A constructor argument was rejected.
///
/// `WrongType` means the value is not of the field's domain type (a path
/// without the expected extension, a malformed link transform, a missing
/// variant field). `WrongValue` means the type is right but the value falls
/// outside the allowed set or breaks a cross-field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("{field}: wrong type: {reason}")]
    WrongType { field: String, reason: String },

    #[error("{field}: wrong value: {reason}")]
    WrongValue { field: String, reason: String },
}

impl InvalidArgument {
    pub fn wrong_type(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InvalidArgument::WrongType { field: field.into(), reason: reason.into() }
    }

    pub fn wrong_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InvalidArgument::WrongValue { field: field.into(), reason: reason.into() }
    }

    /// Name of the rejected field, including any context prefix.
    pub fn field(&self) -> &str {
        match self {
            InvalidArgument::WrongType { field, .. }
            | InvalidArgument::WrongValue { field, .. } => field,
        }
    }

    pub fn is_wrong_type(&self) -> bool {
        matches!(self, InvalidArgument::WrongType { .. })
    }

    pub fn is_wrong_value(&self) -> bool {
        matches!(self, InvalidArgument::WrongValue { .. })
    }

    /// Prefix the field with the path of its enclosing entity.
    ///
    /// `sources[0]` applied to `amp` yields `sources[0].amp`.
    pub fn within(self, context: &str) -> Self {
        let join = |field: String| {
            if field.is_empty() { context.to_string() } else { format!("{context}.{field}") }
        };
        match self {
            InvalidArgument::WrongType { field, reason } => {
                InvalidArgument::WrongType { field: join(field), reason }
            }
            InvalidArgument::WrongValue { field, reason } => {
                InvalidArgument::WrongValue { field: join(field), reason }
            }
        }
    }
}

/// Library-wide error type for glee-config operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A model value was rejected by its constructor.
    #[error("Invalid model: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// Model file could not be found.
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    /// Output file exists and overwriting was not requested.
    #[error("Refusing to overwrite existing file '{0}' (use --force)")]
    OutputExists(String),

    /// Starter template is not embedded in this build.
    #[error("Template '{name}' not found. Available: {available}")]
    TemplateNotFound { name: String, available: String },

    /// Embedded asset could not be read.
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidArgument(_) | AppError::TomlParse(_) | AppError::Json(_) => {
                io::ErrorKind::InvalidInput
            }
            AppError::ModelNotFound(_) | AppError::TemplateNotFound { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::OutputExists(_) => io::ErrorKind::AlreadyExists,
            AppError::Internal { .. } => io::ErrorKind::Other,
        }
    }
}
