use std::env;

const DEFAULT_ACCESS_TTL: u64 = 60 * 60;
const DEFAULT_REFRESH_TTL: u64 = 7 * 24 * 60 * 60;

/// Token secrets and lifetimes. Lifetimes are in seconds.
#[derive(Debug, Clone, Default)]
pub struct JWTConfig {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub refresh_token_expired_date: u64,
    pub access_token_expired_date: u64,
}

fn required(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(format!("{name} must not be empty")),
        Err(_) => Err(format!("{name} not set in environment")),
    }
}

fn seconds(name: &str, default: u64) -> Result<u64, String> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| format!("{name} must be a positive number of seconds")),
        Err(_) => Ok(default),
    }
}

impl JWTConfig {
    pub fn init_from_env(&mut self) -> Result<(), String> {
        self.access_token_secret = required("JWT_ACCESS_TOKEN_SECRET")?;
        self.refresh_token_secret = required("JWT_REFRESH_TOKEN_SECRET")?;
        self.validate()?;

        self.access_token_expired_date =
            seconds("JWT_ACCESS_TOKEN_EXPIRED_DATE", DEFAULT_ACCESS_TTL)?;
        self.refresh_token_expired_date =
            seconds("JWT_REFRESH_TOKEN_EXPIRED_DATE", DEFAULT_REFRESH_TTL)?;
        Ok(())
    }

    /// A refresh token must never pass as an access token.
    pub fn validate(&self) -> Result<(), String> {
        if self.access_token_secret == self.refresh_token_secret {
            return Err("JWT access and refresh secrets must differ".to_string());
        }
        Ok(())
    }
}
