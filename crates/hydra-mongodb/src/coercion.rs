//! Coercion of caller-supplied values into BSON documents
//!
//! Script values arrive as anything `Serialize` (usually `serde_json::Value`).
//! They are encoded with the BSON serializer and decoded back into a
//! [`Document`], so the result is exactly what the driver would have produced
//! itself: nested objects, arrays, and scalar widths all follow the store's
//! encoding rules, and object key order is kept.

use bson::{Bson, Document};
use hydra_common::{HydraError, Result};
use serde::Serialize;

/// Coerces an arbitrary serializable value into a BSON document
///
/// # Errors
/// Returns `DocumentCoercion` when the value is not a keyed structure at the top
/// level or contains something BSON cannot represent (e.g. an unsigned integer
/// above `i64::MAX`).
pub fn coerce_document<T>(value: &T) -> Result<Document>
where
    T: Serialize + ?Sized,
{
    let bytes = bson::to_vec(&value)?;
    let doc: Document = bson::from_slice(&bytes)?;
    Ok(doc)
}

/// Coerces a query filter
///
/// A null filter matches every document; anything else goes through
/// [`coerce_document`].
pub fn coerce_filter<T>(filter: &T) -> Result<Document>
where
    T: Serialize + ?Sized,
{
    match bson::to_bson(filter)? {
        Bson::Null => Ok(Document::new()),
        Bson::Document(_) => coerce_document(filter),
        other => Err(HydraError::DocumentCoercion(format!(
            "filter must be an object, got {:?}",
            other.element_type()
        ))),
    }
}

/// Builds a flat string-valued document, keeping the caller's iteration order
pub fn string_document<I, K, V>(fields: I) -> Document
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), Bson::String(v.into())))
        .collect()
}
