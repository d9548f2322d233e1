use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub kafka: KafkaConfig,
    pub notifications: NotificationConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Load the seed catalog at start-up. Honoured by the memory backend only;
    /// see [`Config::seeds_on_start`].
    #[serde(default)]
    pub seed_on_start: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_cookie_name() -> String { "travelgo_session".to_string() }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct KafkaConfig {
    /// Absent brokers means confirmations are only logged.
    pub brokers: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    pub topic: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_subject() -> String { "TravelGo Booking Confirmation".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in; holds the admin secret in real deployments
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `TRAVELGO_ADMIN__PASSWORD=...` sets `admin.password`
            .add_source(config::Environment::with_prefix("TRAVELGO").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Seeding mints fresh ids, so a persistent backend would gain a copy of
    /// the dataset on every restart.
    pub fn seeds_on_start(&self) -> bool {
        self.storage.seed_on_start && self.storage.backend == StorageBackend::Memory
    }
}
