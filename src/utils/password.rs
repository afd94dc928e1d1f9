use bcrypt::{hash, verify};

use crate::error::{AppError, AppResult};

const MIN_LEN: usize = 8;
const MAX_LEN: usize = 16;

/// 8 to 16 characters with at least one digit, one lower and one upper case letter.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    (MIN_LEN..=MAX_LEN).contains(&len)
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
}

pub fn check_password_rule(password: &str) -> AppResult<()> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(AppError::validation(
            "password must be 8-16 characters and contain digits, lower and upper case letters",
        ))
    }
}

pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    hash(password, cost).map_err(|e| AppError::Internal(format!("bcrypt hash error: {e}")))
}

pub fn verify_password(password: &str, hashed: &str) -> AppResult<bool> {
    verify(password, hashed).map_err(|e| AppError::Internal(format!("bcrypt verify error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_rule() {
        assert!(is_valid_password("Passw0rdOK"));
        assert!(!is_valid_password("short1A"));
        assert!(!is_valid_password("nouppercase1"));
        assert!(!is_valid_password("NOLOWERCASE1"));
        assert!(!is_valid_password("NoDigitsHere"));
        assert!(!is_valid_password("WayTooLongPassword123"));
    }

    #[test]
    fn hash_then_verify() {
        let hashed = hash_password("Passw0rdOK", bcrypt::DEFAULT_COST.min(6)).unwrap();
        assert!(verify_password("Passw0rdOK", &hashed).unwrap());
        assert!(!verify_password("Passw0rdKO", &hashed).unwrap());
    }
}
