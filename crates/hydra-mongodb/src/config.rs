//! Client configuration

use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use std::time::Duration;

/// Default application name reported to the server
pub const DEFAULT_APP_NAME: &str = "hydra";

/// Client configuration
///
/// Unset fields leave whatever the connection string (or the driver) chose.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Minimum number of connections in the pool
    pub min_pool_size: Option<u32>,
    /// Maximum number of connections in the pool
    pub max_pool_size: Option<u32>,
    /// Maximum time a connection can remain idle before being closed
    pub max_idle_time: Option<Duration>,
    /// Connection timeout
    pub connect_timeout: Option<Duration>,
    /// Server selection timeout
    pub server_selection_timeout: Option<Duration>,
    /// Application name for server logs, used only if the URI has no `appName`
    pub app_name: Option<String>,
    /// Declare Stable API version 1
    pub stable_api: bool,
    /// Ping the server during connect
    pub verify_connection: bool,
    /// Strip credentials and hosts from connection errors
    pub sanitize_errors: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            min_pool_size: None,
            max_pool_size: None,
            max_idle_time: None,
            connect_timeout: None,
            server_selection_timeout: None,
            app_name: Some(DEFAULT_APP_NAME.to_string()),
            stable_api: false,
            verify_connection: true,
            sanitize_errors: true,
        }
    }
}

impl ClientConfig {
    pub fn with_min_pool_size(mut self, size: u32) -> Self {
        self.min_pool_size = Some(size);
        self
    }

    pub fn with_max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = Some(size);
        self
    }

    pub fn with_max_idle_time(mut self, idle: Duration) -> Self {
        self.max_idle_time = Some(idle);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = Some(timeout);
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn with_stable_api(mut self, enabled: bool) -> Self {
        self.stable_api = enabled;
        self
    }

    pub fn with_verify_connection(mut self, enabled: bool) -> Self {
        self.verify_connection = enabled;
        self
    }

    pub fn with_sanitize_errors(mut self, enabled: bool) -> Self {
        self.sanitize_errors = enabled;
        self
    }

    /// Apply this configuration on top of options parsed from a URI
    pub fn apply(&self, client_options: &mut ClientOptions) {
        if let Some(min) = self.min_pool_size {
            client_options.min_pool_size = Some(min);
        }
        if let Some(max) = self.max_pool_size {
            client_options.max_pool_size = Some(max);
        }
        if let Some(idle) = self.max_idle_time {
            client_options.max_idle_time = Some(idle);
        }
        if let Some(connect) = self.connect_timeout {
            client_options.connect_timeout = Some(connect);
        }
        if let Some(server_sel) = self.server_selection_timeout {
            client_options.server_selection_timeout = Some(server_sel);
        }
        if client_options.app_name.is_none() {
            client_options.app_name = self.app_name.clone();
        }
        if self.stable_api {
            let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
            client_options.server_api = Some(server_api);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.min_pool_size, None);
        assert_eq!(config.max_pool_size, None);
        assert_eq!(config.app_name.as_deref(), Some("hydra"));
        assert!(!config.stable_api);
        assert!(config.verify_connection);
        assert!(config.sanitize_errors);
    }

    #[test]
    fn test_builder_setters() {
        let config = ClientConfig::default()
            .with_min_pool_size(2)
            .with_max_pool_size(50)
            .with_max_idle_time(Duration::from_secs(300))
            .with_connect_timeout(Duration::from_secs(5))
            .with_server_selection_timeout(Duration::from_secs(10))
            .with_app_name("checkout-load")
            .with_stable_api(true)
            .with_verify_connection(false)
            .with_sanitize_errors(false);

        assert_eq!(config.min_pool_size, Some(2));
        assert_eq!(config.max_pool_size, Some(50));
        assert_eq!(config.max_idle_time, Some(Duration::from_secs(300)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.server_selection_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.app_name.as_deref(), Some("checkout-load"));
        assert!(config.stable_api);
        assert!(!config.verify_connection);
        assert!(!config.sanitize_errors);
    }

    #[tokio::test]
    async fn test_apply_keeps_uri_values_when_unset() {
        let mut options =
            ClientOptions::parse("mongodb://localhost:27017/?maxPoolSize=7&appName=fromuri")
                .await
                .unwrap();
        ClientConfig::default().apply(&mut options);

        assert_eq!(options.max_pool_size, Some(7));
        assert_eq!(options.app_name.as_deref(), Some("fromuri"));
        assert!(options.server_api.is_none());
    }

    #[tokio::test]
    async fn test_apply_overrides_uri_when_set() {
        let mut options = ClientOptions::parse("mongodb://localhost:27017/?maxPoolSize=7")
            .await
            .unwrap();
        ClientConfig::default()
            .with_max_pool_size(64)
            .with_connect_timeout(Duration::from_secs(2))
            .with_stable_api(true)
            .apply(&mut options);

        assert_eq!(options.max_pool_size, Some(64));
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.app_name.as_deref(), Some("hydra"));
        assert!(options.server_api.is_some());
    }
}
