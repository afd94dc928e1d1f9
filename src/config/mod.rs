pub mod db;
pub mod jwt;
pub mod secret;
pub mod server;
pub mod tracing;

use dotenv::dotenv;

/// Settings read once at startup and shared read-only through `ServiceState`.
#[derive(Clone, Default, Debug)]
pub struct ServiceConfig {
    pub db: db::DatabaseConfig,
    pub server: server::ServerConfig,
    pub secret: secret::SecretConfig,
    pub jwt: jwt::JWTConfig,
}

impl ServiceConfig {
    /// Loads `.env` when present, then every section in turn. The first
    /// missing or malformed variable aborts startup.
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        let mut config = Self::default();
        config.db.init_from_env()?;
        config.server.init_from_env()?;
        config.jwt.init_from_env()?;
        config.secret.init_from_env()?;
        Ok(config)
    }
}
