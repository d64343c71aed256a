//! MongoDB adapter for load-testing scripts
//!
//! Scripts have no static types, so everything they send (filters, sort and
//! projection specs, limit/skip/hint) arrives loosely typed. This crate
//! validates and coerces those values into driver query structures, runs the
//! query, and turns the results back into script-friendly values.
//!
//! # Features
//! - ObjectId <-> hex string codec
//! - Filter/sort/projection coercion through the BSON encoder
//! - Typed decoding of the untyped options bag with per-field errors
//! - Async [`Client`] and a thread-blocking [`blocking::Client`]
//! - Structured errors only: malformed input from one virtual user never
//!   aborts the run
//!
//! # Example
//!
//! ```ignore
//! use hydra_mongodb::{blocking::Client, OptionsBag};
//! use serde_json::json;
//!
//! let client = Client::connect("mongodb://localhost:27017")?;
//! let bag: OptionsBag = serde_json::from_value(json!({ "sort": { "a": -1 }, "limit": 2 }))?;
//! let docs = client.find("loadtest", "items", &json!({}), &bag)?;
//! ```

pub mod blocking;
pub mod client;
pub mod coercion;
pub mod config;
pub mod conversion;
pub mod executor;
pub mod identifier;
pub mod namespace;
pub mod options;

pub use client::Client;
pub use coercion::{coerce_document, coerce_filter, string_document};
pub use config::ClientConfig;
pub use conversion::{bson_to_json, document_to_json, documents_to_json};
pub use hydra_common::{ErrorKind, HydraError, Result};
pub use identifier::{is_valid_object_id, object_id_to_string, to_object_id};
pub use namespace::Namespace;
pub use options::{OptionsBag, QueryOptions};

pub use bson::{oid::ObjectId, Document};
