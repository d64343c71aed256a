//! ObjectId <-> hex string codec
//!
//! Scripts only ever see identifiers as 24-character hex strings; the store
//! wants the 12-byte `ObjectId`. These two functions are the only bridge.

use bson::oid::ObjectId;
use hydra_common::{HydraError, Result};

/// Length of the canonical hex form of an ObjectId
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Parses a 24-character hex string (either case) into an ObjectId
///
/// # Errors
/// Returns `InvalidIdentifier` if the string is not exactly 24 hex characters.
pub fn to_object_id(hex: &str) -> Result<ObjectId> {
    if hex.len() != OBJECT_ID_HEX_LEN {
        return Err(HydraError::InvalidIdentifier(format!(
            "expected {} hex characters, got {}",
            OBJECT_ID_HEX_LEN,
            hex.len()
        )));
    }

    ObjectId::parse_str(hex)
        .map_err(|e| HydraError::InvalidIdentifier(format!("'{}' is not valid hex: {}", hex, e)))
}

/// Canonical lowercase hex form of an ObjectId
pub fn object_id_to_string(id: &ObjectId) -> String {
    id.to_hex()
}

/// Checks if a string has valid ObjectId format (24 hex characters)
pub fn is_valid_object_id(value: &str) -> bool {
    value.len() == OBJECT_ID_HEX_LEN && value.chars().all(|c| c.is_ascii_hexdigit())
}
