//! Query execution against a driver client
//!
//! Each function issues one operation, drains any cursor into memory and maps
//! driver failures into `StoreExecution`. The driver client handle is cheap to
//! clone and internally pooled, so concurrent calls share it freely.

use bson::{doc, Document as BsonDocument};
use futures::TryStreamExt;
use hydra_common::{HydraError, Result};
use mongodb::options::FindOneOptions;
use mongodb::{Client as DriverClient, Collection};
use tracing::debug;

use crate::namespace::Namespace;
use crate::options::QueryOptions;

fn collection(client: &DriverClient, ns: &Namespace) -> Collection<BsonDocument> {
    client.database(ns.database()).collection(ns.collection())
}

/// Run a find and return every matching document, in cursor order
///
/// A collection that does not exist yields an empty result.
pub async fn find(
    client: &DriverClient,
    ns: &Namespace,
    filter: BsonDocument,
    options: QueryOptions,
) -> Result<Vec<BsonDocument>> {
    let collection = collection(client, ns);

    let cursor = collection
        .find(filter)
        .with_options(options.into_find_options())
        .await?;

    let docs: Vec<BsonDocument> = cursor.try_collect().await?;

    debug!(namespace = %ns, count = docs.len(), "find completed");
    Ok(docs)
}

/// Fetch exactly one document, lowest `_id` first
///
/// # Errors
/// Returns `NotFound` when nothing matches the filter.
pub async fn find_one(
    client: &DriverClient,
    ns: &Namespace,
    filter: BsonDocument,
) -> Result<BsonDocument> {
    let collection = collection(client, ns);

    let mut options = FindOneOptions::default();
    options.sort = Some(doc! { "_id": 1 });

    debug!(namespace = %ns, filter = %filter, "find_one");

    match collection.find_one(filter).with_options(options).await? {
        Some(found) => Ok(found),
        None => Err(not_found(ns)),
    }
}

fn not_found(ns: &Namespace) -> HydraError {
    HydraError::NotFound(format!("no document in {} matches the filter", ns))
}

/// Insert one document
pub async fn insert_one(client: &DriverClient, ns: &Namespace, doc: BsonDocument) -> Result<()> {
    let collection = collection(client, ns);

    let result = collection.insert_one(doc).await?;

    debug!(namespace = %ns, inserted_id = %result.inserted_id, "insert completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_common::ErrorKind;

    #[test]
    fn test_not_found_names_namespace() {
        let ns = Namespace::new("loadtest", "users").unwrap();
        let err = not_found(&ns);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "Not found: no document in loadtest.users matches the filter"
        );
    }
}
