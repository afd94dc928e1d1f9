use url::Url;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::error::{AppError, AppResult};

/// The shapes of input the service accepts. Every operation validates its
/// fields through [`check`] so the rules live in one place.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind<'a> {
    NonEmptyString(&'a str),
    NonNegativeInteger(i64),
    PositiveInteger(i64),
    /// Absolute URL with the `https` scheme and a host.
    SecureUrl(&'a str),
    Email(&'a str),
}

pub fn check(field: &str, kind: FieldKind<'_>) -> AppResult<()> {
    let valid = match kind {
        FieldKind::NonEmptyString(value) => !value.trim().is_empty(),
        FieldKind::NonNegativeInteger(value) => value >= 0,
        FieldKind::PositiveInteger(value) => value > 0,
        FieldKind::SecureUrl(value) => is_secure_url(value),
        FieldKind::Email(value) => value.trim().validate_email(),
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::validation(format!("invalid field: {field}")))
    }
}

/// Presence check for optional request fields.
pub fn require<T>(field: &str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| AppError::validation(format!("missing field: {field}")))
}

/// Rejects strings longer than the column that stores them.
pub fn max_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "field {field} exceeds {max} characters"
        )));
    }
    Ok(())
}

/// Parses an id taken from the request path.
pub fn parse_id(field: &str, value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| AppError::validation(format!("invalid field: {field}")))
}

fn is_secure_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => url.scheme() == "https" && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_must_have_content() {
        assert!(check("name", FieldKind::NonEmptyString("Gold")).is_ok());
        assert!(check("name", FieldKind::NonEmptyString("")).is_err());
        assert!(check("name", FieldKind::NonEmptyString("   \t")).is_err());
    }

    #[test]
    fn integers_respect_their_lower_bound() {
        assert!(check("price", FieldKind::NonNegativeInteger(0)).is_ok());
        assert!(check("price", FieldKind::NonNegativeInteger(-1)).is_err());
        assert!(check("max_participants", FieldKind::PositiveInteger(1)).is_ok());
        assert!(check("max_participants", FieldKind::PositiveInteger(0)).is_err());
    }

    #[test]
    fn urls_need_https() {
        assert!(check("url", FieldKind::SecureUrl("https://example.com/a.png")).is_ok());
        assert!(check("url", FieldKind::SecureUrl("http://example.com/a.png")).is_err());
        assert!(check("url", FieldKind::SecureUrl("example.com/a.png")).is_err());
        assert!(check("url", FieldKind::SecureUrl("https://")).is_err());
    }

    #[test]
    fn emails_are_checked() {
        assert!(check("email", FieldKind::Email("a@b.io")).is_ok());
        assert!(check("email", FieldKind::Email("ab.io")).is_err());
        assert!(check("email", FieldKind::Email("a@b@c.io")).is_err());
        assert!(check("email", FieldKind::Email("a b@c.io")).is_err());
    }

    #[test]
    fn error_names_the_field() {
        match check("credit_amount", FieldKind::NonNegativeInteger(-3)) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("credit_amount")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            require::<i64>("price", None),
            Err(AppError::Validation(_))
        ));
        assert!(max_len("name", "abcdef", 5).is_err());
    }

    #[test]
    fn path_ids_are_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("course_id", &id.to_string()).unwrap(), id);
        assert!(parse_id("course_id", "42").is_err());
    }
}
