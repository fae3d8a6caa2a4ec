use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub trip: TripConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TripConfig {
    /// Base URL of the trip service, e.g. `http://trip-service:8080`.
    pub base_url: String,
    /// Credential blob sent as `Authorization: Basic <token>` on trip calls.
    pub auth_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Domain of the identity provider used to introspect bearer tokens.
    pub domain: String,
    /// Shared credential accepted by the basic validator.
    pub credentials: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific and local overrides are optional.
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `RIDEPOOL__SERVER__PORT=9090` overrides `server.port`.
            .add_source(config::Environment::with_prefix("RIDEPOOL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
