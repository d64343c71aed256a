//! Error types for hydra

use thiserror::Error;

/// Result type alias for hydra operations
pub type Result<T> = std::result::Result<T, HydraError>;

/// Unified error type for all hydra operations
///
/// Every fallible step inside an operation returns one of these to its caller.
/// One virtual user's malformed input must never take down the whole run, so
/// nothing in this workspace panics on caller data.
#[derive(Error, Debug, Clone)]
pub enum HydraError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Client is not connected")]
    NotConnected,

    #[error("Invalid identifier format: {0}")]
    InvalidIdentifier(String),

    #[error("Document coercion error: {0}")]
    DocumentCoercion(String),

    #[error("Option type error: {0}")]
    OptionType(String),

    #[error("Store execution error: {message}")]
    StoreExecution {
        message: String,
        /// Whether the driver classified the failure as transient
        retryable: bool,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    /// The blocking client could not start its async runtime
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Discriminant of [`HydraError`], used by hosts to pick a script exception type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Connection,
    NotConnected,
    InvalidIdentifier,
    DocumentCoercion,
    OptionType,
    StoreExecution,
    NotFound,
    InvalidNamespace,
    Runtime,
}

impl ErrorKind {
    /// Script-facing name of the error kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "ConnectionError",
            ErrorKind::NotConnected => "NotConnected",
            ErrorKind::InvalidIdentifier => "InvalidIdentifierFormat",
            ErrorKind::DocumentCoercion => "DocumentCoercionError",
            ErrorKind::OptionType => "OptionTypeError",
            ErrorKind::StoreExecution => "StoreExecutionError",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::InvalidNamespace => "InvalidNamespace",
            ErrorKind::Runtime => "RuntimeError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HydraError {
    /// Build an [`HydraError::OptionType`] for a query option holding the wrong kind of value
    pub fn option_type(option: &str, expected: &str, found: &serde_json::Value) -> Self {
        HydraError::OptionType(format!(
            "'{}' must be {}, got {}",
            option,
            expected,
            json_type_name(found)
        ))
    }

    /// Build a non-retryable [`HydraError::StoreExecution`]
    pub fn store(message: impl Into<String>) -> Self {
        HydraError::StoreExecution {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HydraError::Connection(_) => ErrorKind::Connection,
            HydraError::NotConnected => ErrorKind::NotConnected,
            HydraError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            HydraError::DocumentCoercion(_) => ErrorKind::DocumentCoercion,
            HydraError::OptionType(_) => ErrorKind::OptionType,
            HydraError::StoreExecution { .. } => ErrorKind::StoreExecution,
            HydraError::NotFound(_) => ErrorKind::NotFound,
            HydraError::InvalidNamespace(_) => ErrorKind::InvalidNamespace,
            HydraError::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Returns true if the store reported this failure as transient.
    ///
    /// Nothing in hydra retries; callers decide what to do with this.
    pub fn is_retryable(&self) -> bool {
        matches!(self, HydraError::StoreExecution { retryable: true, .. })
    }

    /// Returns true if the error was caused by caller input rather than the store
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            HydraError::InvalidIdentifier(_)
                | HydraError::DocumentCoercion(_)
                | HydraError::OptionType(_)
                | HydraError::InvalidNamespace(_)
        )
    }
}

/// Name of a JSON value's runtime type, as a script author would call it
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "integer out of 64-bit range",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// MongoDB-specific error conversions (when mongodb-errors feature is enabled)
#[cfg(feature = "mongodb-errors")]
impl From<mongodb::error::Error> for HydraError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind as DriverErrorKind;

        let retryable = err.contains_label("RetryableWriteError")
            || err.contains_label("TransientTransactionError")
            || matches!(
                &*err.kind,
                DriverErrorKind::Io(_)
                    | DriverErrorKind::ConnectionPoolCleared { .. }
                    | DriverErrorKind::ServerSelection { .. }
            );

        HydraError::StoreExecution {
            message: err.to_string(),
            retryable,
        }
    }
}

#[cfg(feature = "mongodb-errors")]
impl From<bson::ser::Error> for HydraError {
    fn from(err: bson::ser::Error) -> Self {
        HydraError::DocumentCoercion(format!("BSON serialization error: {}", err))
    }
}

#[cfg(feature = "mongodb-errors")]
impl From<bson::de::Error> for HydraError {
    fn from(err: bson::de::Error) -> Self {
        HydraError::DocumentCoercion(format!("BSON deserialization error: {}", err))
    }
}
