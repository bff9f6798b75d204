use std::{str::FromStr, time::Duration};

use mongodb::{options::ClientOptions, Client, Database};
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

/// Marker variable set by the end-to-end test runner.
const PLAYWRIGHT_MARKER: &str = "PLAYWRIGHT_TEST";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(skip)]
    pub environment: Environment,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub uri: String,
    pub database_name: String,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct CacheSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub ttl_seconds: u64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_capacity: u64,
}

impl DatabaseSettings {
    /// Builds a client and hands out the configured database. The driver
    /// connects lazily, so an unreachable server surfaces on the first query.
    pub async fn connect(&self) -> Result<Database, mongodb::error::Error> {
        let mut options = ClientOptions::parse(&self.uri).await?;
        options.app_name = Some("streetsupport-api".to_string());
        let client = Client::with_options(options)?;
        Ok(client.database(&self.database_name))
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Settings {
    /// Test mode disables HTTP caching and shortens the cache TTL.
    pub fn is_test_mode(&self) -> bool {
        self.environment == Environment::Test || std::env::var_os(PLAYWRIGHT_MARKER).is_some()
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|err| config::ConfigError::Message(format!("no working directory: {err}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|err| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {err}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("SSN")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    settings.environment = environment;
    Ok(settings)
}

#[derive(Display, Debug, EnumString, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
    #[strum(ascii_case_insensitive, serialize = "test")]
    Test,
}
