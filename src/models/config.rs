use serde::Deserialize;

/// Configuration options for the console server.
///
/// Values are layered from defaults, an optional `config.yaml` and
/// `CCT_`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database location.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub bind_address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Key used to sign session and flash cookies.
    pub secret_key: String,
    /// Root directory for uploaded documents.
    pub uploads_root: String,
}

impl ServerConfig {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("database_url", "cct.db")?
            .set_default("bind_address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("uploads_root", "./uploads")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CCT"))
            .build()?
            .try_deserialize()
    }
}
