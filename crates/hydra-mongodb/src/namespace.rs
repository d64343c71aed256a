//! Database and collection name validation
//!
//! Names come straight from scripts. They are checked before any I/O so that
//! a typo fails fast with `InvalidNamespace` instead of as an opaque server
//! error (or, worse, silently creating a strangely named collection).

use hydra_common::{HydraError, Result};
use tracing::warn;

/// Maximum database name length accepted by the server
const MAX_DATABASE_NAME_LENGTH: usize = 63;

/// Maximum length of the full `database.collection` namespace
const MAX_NAMESPACE_LENGTH: usize = 255;

/// Characters the server forbids in database names
const FORBIDDEN_DATABASE_CHARS: &[char] = &['/', '\\', '.', ' ', '"', '$', '\0'];

/// A validated `database.collection` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    database: String,
    collection: String,
}

impl Namespace {
    /// Validates a database/collection pair
    ///
    /// # Errors
    /// Returns `InvalidNamespace` if:
    /// - either name is empty
    /// - the database name exceeds 63 bytes
    /// - the full `database.collection` namespace exceeds 255 bytes
    /// - the database name contains any of `/\. "$` or a null byte
    /// - the collection name contains `$` or a null byte
    pub fn new(database: &str, collection: &str) -> Result<Self> {
        validate_database_name(database)?;
        validate_collection_name(collection)?;

        let namespace_len = database.len() + 1 + collection.len();
        if namespace_len > MAX_NAMESPACE_LENGTH {
            return Err(HydraError::InvalidNamespace(format!(
                "Namespace exceeds maximum length of {} bytes (got {})",
                MAX_NAMESPACE_LENGTH, namespace_len
            )));
        }

        Ok(Self {
            database: database.to_string(),
            collection: collection.to_string(),
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.database, self.collection)
    }
}

fn validate_database_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(HydraError::InvalidNamespace(
            "Database name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_DATABASE_NAME_LENGTH {
        return Err(HydraError::InvalidNamespace(format!(
            "Database name exceeds maximum length of {} bytes: '{}'",
            MAX_DATABASE_NAME_LENGTH, name
        )));
    }

    if let Some(c) = name.chars().find(|c| FORBIDDEN_DATABASE_CHARS.contains(c)) {
        return Err(HydraError::InvalidNamespace(format!(
            "Database name cannot contain {:?}: '{}'",
            c,
            name.escape_default()
        )));
    }

    Ok(())
}

fn validate_collection_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(HydraError::InvalidNamespace(
            "Collection name cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(HydraError::InvalidNamespace(
            "Collection name cannot contain null bytes".to_string(),
        ));
    }

    if name.contains('$') {
        return Err(HydraError::InvalidNamespace(format!(
            "Collection name cannot contain '$' character: '{}'",
            name
        )));
    }

    // Allowed, but almost always a mistake in a load script
    if name.starts_with("system.") || name.contains("..") {
        warn!(collection = name, "Collection name looks suspicious");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_common::ErrorKind;

    #[test]
    fn test_valid_namespace() {
        let ns = Namespace::new("loadtest", "users").unwrap();
        assert_eq!(ns.database(), "loadtest");
        assert_eq!(ns.collection(), "users");
        assert_eq!(ns.to_string(), "loadtest.users");
    }

    #[test]
    fn test_dotted_collection_allowed() {
        let ns = Namespace::new("app", "events.2024").unwrap();
        assert_eq!(ns.collection(), "events.2024");
    }

    #[test]
    fn test_empty_names() {
        assert_eq!(
            Namespace::new("", "users").unwrap_err().kind(),
            ErrorKind::InvalidNamespace
        );
        assert_eq!(
            Namespace::new("app", "").unwrap_err().kind(),
            ErrorKind::InvalidNamespace
        );
    }

    #[test]
    fn test_database_forbidden_chars() {
        for name in ["my.db", "my db", "a/b", "a\\b", "a$b", "quo\"te", "nul\0"] {
            assert!(Namespace::new(name, "users").is_err(), "accepted {:?}", name);
        }
    }

    #[test]
    fn test_database_too_long() {
        let name = "d".repeat(MAX_DATABASE_NAME_LENGTH + 1);
        assert!(Namespace::new(&name, "users").is_err());
        let name = "d".repeat(MAX_DATABASE_NAME_LENGTH);
        assert!(Namespace::new(&name, "users").is_ok());
    }

    #[test]
    fn test_collection_forbidden_chars() {
        assert!(Namespace::new("app", "us$ers").is_err());
        assert!(Namespace::new("app", "us\0ers").is_err());
    }

    #[test]
    fn test_namespace_too_long() {
        // "app." leaves 251 bytes for the collection
        let name = "c".repeat(MAX_NAMESPACE_LENGTH - 4);
        assert!(Namespace::new("app", &name).is_ok());

        let name = "c".repeat(MAX_NAMESPACE_LENGTH - 3);
        assert_eq!(
            Namespace::new("app", &name).unwrap_err().kind(),
            ErrorKind::InvalidNamespace
        );

        let db = "d".repeat(MAX_DATABASE_NAME_LENGTH);
        let name = "c".repeat(200);
        assert_eq!(
            Namespace::new(&db, &name).unwrap_err().kind(),
            ErrorKind::InvalidNamespace
        );
    }
}
