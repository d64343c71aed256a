//! Blocking client for hosts that drive virtual users from plain threads
//!
//! Every method blocks the calling thread until the operation completes. The
//! client owns its own multi-threaded tokio runtime; many threads may call into
//! one `Client` at once. Do not use it from inside an async runtime, since
//! blocking on a runtime from within another panics. Dropping a connected
//! client closes it.

use bson::Document as BsonDocument;
use hydra_common::{HydraError, Result};
use serde::Serialize;
use tokio::runtime::{Builder, Runtime};

use crate::client::Client as AsyncClient;
use crate::config::ClientConfig;
use crate::options::{OptionsBag, QueryOptions};

/// Blocking MongoDB client
#[derive(Debug)]
pub struct Client {
    inner: AsyncClient,
    runtime: Runtime,
}

impl Client {
    /// Connect with default configuration
    pub fn connect(uri: &str) -> Result<Self> {
        Self::connect_with_config(uri, ClientConfig::default())
    }

    /// Connect with a custom configuration
    pub fn connect_with_config(uri: &str, config: ClientConfig) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("hydra-mongodb")
            .build()
            .map_err(runtime_error)?;

        let inner = runtime.block_on(AsyncClient::connect_with_config(uri, config))?;
        Ok(Self { inner, runtime })
    }

    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// See [`AsyncClient::insert`]
    pub fn insert<I, K, V>(&self, database: &str, collection: &str, doc: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.runtime.block_on(self.inner.insert(database, collection, doc))
    }

    /// See [`AsyncClient::find`]
    pub fn find<F>(
        &self,
        database: &str,
        collection: &str,
        filter: &F,
        options: &OptionsBag,
    ) -> Result<Vec<BsonDocument>>
    where
        F: Serialize + ?Sized,
    {
        self.runtime
            .block_on(self.inner.find(database, collection, filter, options))
    }

    /// See [`AsyncClient::find_with_options`]
    pub fn find_with_options<F>(
        &self,
        database: &str,
        collection: &str,
        filter: &F,
        options: QueryOptions,
    ) -> Result<Vec<BsonDocument>>
    where
        F: Serialize + ?Sized,
    {
        self.runtime
            .block_on(self.inner.find_with_options(database, collection, filter, options))
    }

    /// See [`AsyncClient::find_one`]
    pub fn find_one<F>(&self, database: &str, collection: &str, filter: &F) -> Result<BsonDocument>
    where
        F: Serialize + ?Sized,
    {
        self.runtime
            .block_on(self.inner.find_one(database, collection, filter))
    }

    /// See [`AsyncClient::close`]
    pub fn close(&self) -> Result<()> {
        self.runtime.block_on(self.inner.close())
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        // Shut the driver down while its runtime is still alive
        if self.inner.is_connected() {
            let _ = self.runtime.block_on(self.inner.close());
        }
    }
}

fn runtime_error(err: std::io::Error) -> HydraError {
    HydraError::Runtime(format!("Failed to start runtime: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydra_common::ErrorKind;

    #[test]
    fn test_blocking_connect_rejects_malformed_uri() {
        let err = Client::connect("definitely not a uri").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[test]
    fn test_blocking_lifecycle_without_server() {
        let config = ClientConfig::default().with_verify_connection(false);
        let client = Client::connect_with_config("mongodb://127.0.0.1:1", config).unwrap();
        assert!(client.is_connected());

        let mut bag = OptionsBag::new();
        bag.insert("skip".to_string(), serde_json::json!(-2));
        let err = client
            .find("db", "coll", &serde_json::json!({}), &bag)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OptionType);

        client.close().unwrap();
        let err = client.find_one("db", "coll", &serde_json::json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConnected);
    }

    #[test]
    fn test_runtime_start_failure_is_runtime_error() {
        let err = runtime_error(std::io::Error::new(
            std::io::ErrorKind::OutOfMemory,
            "cannot spawn worker",
        ));
        assert_eq!(err.kind(), ErrorKind::Runtime);
        assert!(err.to_string().contains("cannot spawn worker"));
    }

    #[test]
    fn test_blocking_client_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
