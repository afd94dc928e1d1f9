use std::env;

/// Key shared with the back-office tooling that signs admin requests, plus
/// the bcrypt work factor for stored passwords.
#[derive(Clone, Debug, Default)]
pub struct SecretConfig {
    pub admin_signature_key: String,
    pub bcrypt_cost: u32,
}
impl SecretConfig {
    pub fn init_from_env(&mut self) -> Result<(), String> {
        let key = env::var("INTERNAL_SECRET_KEY")
            .map_err(|_| "INTERNAL_SECRET_KEY not set in environment".to_string())?;
        if key.trim().is_empty() {
            return Err("INTERNAL_SECRET_KEY must not be empty".to_string());
        }
        self.admin_signature_key = key;

        self.bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(cost) => cost
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or_else(|| "BCRYPT_COST must be an integer between 4 and 31".to_string())?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(())
    }
}
