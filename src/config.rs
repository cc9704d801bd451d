use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub elasticsearch: ElasticsearchSettings,
    #[serde(default)]
    pub indices: IndexSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchSettings {
    #[serde(default = "default_es_url")]
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_true")]
    pub verify_certs: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            url: default_es_url(),
            username: None,
            password: None,
            verify_certs: true,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

fn default_es_url() -> String { "http://localhost:9200".to_string() }
fn default_true() -> bool { true }
fn default_timeout_secs() -> u64 { 30 }
fn default_max_retries() -> u32 { 5 }
fn default_retry_delay_secs() -> u64 { 5 }

/// Index names for every collection the service reads or writes
#[derive(Debug, Clone, Deserialize)]
pub struct IndexSettings {
    #[serde(default = "default_destinations_index")]
    pub destinations: String,
    #[serde(default = "default_user_profiles_index")]
    pub user_profiles: String,
    #[serde(default = "default_trends_index")]
    pub trends: String,
    #[serde(default = "default_reviews_index")]
    pub reviews: String,
    #[serde(default = "default_recommendations_index")]
    pub recommendations: String,
    #[serde(default = "default_interactions_index")]
    pub interactions: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            destinations: default_destinations_index(),
            user_profiles: default_user_profiles_index(),
            trends: default_trends_index(),
            reviews: default_reviews_index(),
            recommendations: default_recommendations_index(),
            interactions: default_interactions_index(),
        }
    }
}

fn default_destinations_index() -> String { "destinations".to_string() }
fn default_user_profiles_index() -> String { "user_profiles".to_string() }
fn default_trends_index() -> String { "travel_trends".to_string() }
fn default_reviews_index() -> String { "destination_reviews".to_string() }
fn default_recommendations_index() -> String { "user_recommendations".to_string() }
fn default_interactions_index() -> String { "user_interactions".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    /// Upper bound on trend records loaded per recommendation request
    #[serde(default = "default_trend_limit")]
    pub trend_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            trend_limit: default_trend_limit(),
        }
    }
}

fn default_trend_limit() -> usize { 10_000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BootstrapSettings {
    #[serde(default)]
    pub create_indices: bool,
    #[serde(default)]
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRAVEL__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRAVEL__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TRAVEL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TRAVEL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional Elasticsearch variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    for (var, key) in [
        ("ELASTICSEARCH_URL", "elasticsearch.url"),
        ("ELASTICSEARCH_USER", "elasticsearch.username"),
        ("ELASTICSEARCH_PASSWORD", "elasticsearch.password"),
    ] {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
