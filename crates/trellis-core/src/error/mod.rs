//! Error types and result aliases for Trellis operations.
//!
//! `SchemaError` covers structured decoding of the configuration model,
//! `DispatchError` is the failure contract of event dispatchers, and
//! `TrellisError` unifies both with the I/O and parsing failures of the
//! outer crates.

use thiserror::Error;

/// Structured decoding failure for a tagged union or record.
///
/// Produced at the point of decode and never recovered inside the model;
/// callers decide what to do with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{entity}: unrecognized discriminator {}", display_found(.found))]
    UnrecognizedDiscriminator {
        entity: &'static str,
        found: Option<String>,
    },

    #[error("{entity}: variant '{variant}' is missing required field '{field}'")]
    MissingRequiredField {
        entity: &'static str,
        variant: &'static str,
        field: &'static str,
    },

    #[error("{entity}: expected {expected}")]
    UnexpectedShape {
        entity: &'static str,
        expected: &'static str,
    },
}

fn display_found(found: &Option<String>) -> String {
    match found {
        Some(value) => format!("'{}'", value),
        None => "(missing 'type' field)".to_string(),
    }
}

impl SchemaError {
    pub fn unrecognized(entity: &'static str, found: Option<&str>) -> Self {
        Self::UnrecognizedDiscriminator {
            entity,
            found: found.map(str::to_string),
        }
    }

    pub fn missing(entity: &'static str, variant: &'static str, field: &'static str) -> Self {
        Self::MissingRequiredField {
            entity,
            variant,
            field,
        }
    }

    /// Name of the entity that failed to decode
    pub fn entity(&self) -> &'static str {
        match self {
            SchemaError::UnrecognizedDiscriminator { entity, .. }
            | SchemaError::MissingRequiredField { entity, .. }
            | SchemaError::UnexpectedShape { entity, .. } => entity,
        }
    }
}

/// Event delivery failure reported by a queue dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Dispatcher '{dispatcher}' failed to deliver event: {message}")]
    Delivery { dispatcher: String, message: String },

    #[error("Persisted event data is invalid: {message}")]
    InvalidPayload { message: String },

    #[error("Dispatcher '{dispatcher}' is unavailable")]
    Unavailable { dispatcher: String },
}

/// Unified error type for all Trellis operations
#[derive(Error, Debug)]
pub enum TrellisError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    // Config errors
    #[error("Failed to parse {file}: {message} at line {line}, column {column}")]
    TomlParse {
        file: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to parse JSON: {message}")]
    JsonParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Trellis operations
pub type TrellisResult<T> = Result<T, TrellisError>;

impl TrellisError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if retrying the operation could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TrellisError::Io { .. }
                | TrellisError::Dispatch(DispatchError::Delivery { .. })
                | TrellisError::Dispatch(DispatchError::Unavailable { .. })
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            TrellisError::Schema(SchemaError::UnrecognizedDiscriminator { .. }) => {
                Some("Check the 'type' field; see the documentation for accepted values")
            },
            TrellisError::Schema(SchemaError::MissingRequiredField { .. }) => {
                Some("Add the missing field to the entry named in the message")
            },
            TrellisError::TomlParse { .. } => Some("Fix the TOML syntax at the reported location"),
            TrellisError::ConfigValidation { .. } => {
                Some("Correct the reported field in the dependency description")
            },
            _ => None,
        }
    }
}
