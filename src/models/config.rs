//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::ivr::SipConfig;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    /// Signalling server used by the calling widget.
    #[serde(default)]
    pub sip: SipConfig,
}

impl ServerConfig {
    /// Reads `config/default.yaml`, then the `config/{APP_ENV}.yaml` profile
    /// (defaults to `local`), then `APP_*` environment variables. Nested keys
    /// use a double underscore, e.g. `APP_SIP__WS_URL`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
