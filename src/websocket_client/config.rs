use std::time::Duration;

/// Log level for internal logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedLogLevel {
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

/// Configuration options for the live-feed client.
///
/// Read once at construction and immutable thereafter.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Host (and optional port) of the update endpoint, e.g. `"scores.local:8000"`
    pub host: String,

    /// Use `wss://` instead of `ws://`. Should match the scheme of the
    /// surface hosting the display.
    pub secure: bool,

    /// Path of the update endpoint on the host, e.g. `"/ws/sb0"`
    pub endpoint_path: String,

    /// Fixed delay between losing the connection and the next attempt.
    /// There is no backoff and no attempt cap; the client retries forever.
    pub reconnect_delay: Duration,

    /// Log level for internal logger
    pub log_level: FeedLogLevel,
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            secure: false,
            endpoint_path: "/ws/sb0".to_string(),
            reconnect_delay: Duration::from_millis(1000),
            log_level: FeedLogLevel::Info,
        }
    }
}

impl FeedClientConfig {
    /// Creates a builder for FeedClientConfig
    pub fn builder() -> FeedClientConfigBuilder {
        FeedClientConfigBuilder::default()
    }

    /// Full endpoint URL, with the scheme chosen by `secure`
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}{}", scheme, self.host, self.endpoint_path)
    }
}

/// Builder for FeedClientConfig
#[derive(Default)]
pub struct FeedClientConfigBuilder {
    host: Option<String>,
    secure: Option<bool>,
    endpoint_path: Option<String>,
    reconnect_delay: Option<Duration>,
    log_level: Option<FeedLogLevel>,
}

impl FeedClientConfigBuilder {
    /// Sets the endpoint host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Selects `wss://` when true
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    /// Sets the endpoint path
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }

    /// Sets the fixed reconnect delay
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = Some(delay);
        self
    }

    /// Sets the log level
    pub fn log_level(mut self, level: FeedLogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Builds the configuration
    pub fn build(self) -> FeedClientConfig {
        let default = FeedClientConfig::default();
        FeedClientConfig {
            host: self.host.unwrap_or(default.host),
            secure: self.secure.unwrap_or(default.secure),
            endpoint_path: self.endpoint_path.unwrap_or(default.endpoint_path),
            reconnect_delay: self.reconnect_delay.unwrap_or(default.reconnect_delay),
            log_level: self.log_level.unwrap_or(default.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert!(!config.secure);
        assert_eq!(config.endpoint_path, "/ws/sb0");
        assert_eq!(config.reconnect_delay, Duration::from_millis(1000));
        assert_eq!(config.log_level, FeedLogLevel::Info);
    }

    #[test]
    fn test_builder() {
        let config = FeedClientConfig::builder()
            .host("scores.example.com")
            .secure(true)
            .endpoint_path("/ws/board/1")
            .reconnect_delay(Duration::from_millis(250))
            .log_level(FeedLogLevel::Debug)
            .build();

        assert_eq!(config.host, "scores.example.com");
        assert!(config.secure);
        assert_eq!(config.endpoint_path, "/ws/board/1");
        assert_eq!(config.reconnect_delay, Duration::from_millis(250));
        assert_eq!(config.log_level, FeedLogLevel::Debug);
    }

    #[test]
    fn test_url_scheme_selection() {
        let plain = FeedClientConfig::builder()
            .host("localhost:8000")
            .endpoint_path("/ws/sb0")
            .build();
        assert_eq!(plain.url(), "ws://localhost:8000/ws/sb0");

        let secure = FeedClientConfig::builder()
            .host("scores.example.com")
            .secure(true)
            .endpoint_path("/ws/sb0")
            .build();
        assert_eq!(secure.url(), "wss://scores.example.com/ws/sb0");
    }
}
