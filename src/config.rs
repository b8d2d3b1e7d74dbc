//! Broker client configuration.
//!
//! Explicit structs carrying the recognized options and their defaults,
//! overridable from the process environment through `KAFKA_*` variables.

use rdkafka::config::ClientConfig;
use std::time::Duration;

/// Default consumer group identifier.
pub const DEFAULT_GROUP_ID: &str = "trellis";

/// Configuration for the consumer side.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub bootstrap_servers: String,
    pub group_id: String,
    pub enable_auto_commit: bool,
    pub auto_commit_interval_ms: u64,
    pub session_timeout_ms: u64,
    pub poll_timeout_ms: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: "localhost:9092".to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            enable_auto_commit: true,
            auto_commit_interval_ms: 1000,
            session_timeout_ms: 30000,
            poll_timeout_ms: 100,
        }
    }
}

impl ConsumerConfig {
    /// Build a configuration from the process environment, falling back to
    /// the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bootstrap_servers: env_or("KAFKA_BOOTSTRAP_SERVERS", &defaults.bootstrap_servers),
            group_id: env_or("KAFKA_GROUP_ID", &defaults.group_id),
            enable_auto_commit: env_parsed("KAFKA_ENABLE_AUTO_COMMIT", defaults.enable_auto_commit),
            auto_commit_interval_ms: env_parsed(
                "KAFKA_AUTO_COMMIT_INTERVAL_MS",
                defaults.auto_commit_interval_ms,
            ),
            session_timeout_ms: env_parsed("KAFKA_SESSION_TIMEOUT_MS", defaults.session_timeout_ms),
            poll_timeout_ms: env_parsed("KAFKA_POLL_TIMEOUT_MS", defaults.poll_timeout_ms),
        }
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("group.id", &self.group_id)
            .set("enable.auto.commit", self.enable_auto_commit.to_string())
            .set("auto.commit.interval.ms", self.auto_commit_interval_ms.to_string())
            .set("session.timeout.ms", self.session_timeout_ms.to_string())
            .set("enable.partition.eof", "false");
        config
    }
}

/// Configuration for the producer side.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    pub bootstrap_servers: String,
    pub client_id: String,
    pub message_timeout_ms: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: "localhost:9092".to_string(),
            client_id: "portunus_event_producer".to_string(),
            message_timeout_ms: 5000,
        }
    }
}

impl ProducerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bootstrap_servers: env_or("KAFKA_BOOTSTRAP_SERVERS", &defaults.bootstrap_servers),
            client_id: env_or("KAFKA_CLIENT_ID", &defaults.client_id),
            message_timeout_ms: env_parsed("KAFKA_MESSAGE_TIMEOUT_MS", defaults.message_timeout_ms),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("client.id", &self.client_id)
            .set("message.timeout.ms", self.message_timeout_ms.to_string());
        config
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|value| value.parse().ok()).unwrap_or(default)
}
