//! Small request-level validators shared by the resource handlers.

use uuid::Uuid;

use crate::error::ApiError;

/// Path identifiers are format-checked before any query runs; a malformed
/// value is a client error, not a database error.
pub fn parse_uuid(value: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = email.split('@').collect();
    let valid = parts.len() == 2
        && !parts[0].is_empty()
        && parts[1].contains('.')
        && !parts[1].starts_with('.')
        && !parts[1].ends_with('.');

    if valid {
        Ok(())
    } else {
        Err(ApiError::bad_request("Invalid email format"))
    }
}

/// URL-safe slug: lowercase alphanumeric segments joined by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ApiError> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(ApiError::bad_request(
            "Slug must be lowercase letters, digits and hyphens",
        ))
    }
}

pub fn validate_image_url(value: &str) -> Result<(), ApiError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ApiError::bad_request("Invalid image URL")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_parsing() {
        assert!(parse_uuid("d9b2d63d-a233-4123-847a-717d01d2a46b", "product").is_ok());
        let err = parse_uuid("not-a-uuid", "product").unwrap_err();
        assert_eq!(err.message(), "Invalid product ID");
    }

    #[test]
    fn email_format() {
        assert!(validate_email("shopper@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@.com").is_err());
    }

    #[test]
    fn slug_format() {
        assert!(validate_slug("summer-sale-2024").is_ok());
        assert!(validate_slug("abc").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Has-Caps").is_err());
        assert!(validate_slug("spaced out").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--hyphen").is_err());
    }

    #[test]
    fn image_url_format() {
        assert!(validate_image_url("https://cdn.example.com/p/1.jpg").is_ok());
        assert!(validate_image_url("http://cdn.example.com/p/1.jpg").is_ok());
        assert!(validate_image_url("ftp://cdn.example.com/p/1.jpg").is_err());
        assert!(validate_image_url("not a url").is_err());
    }
}
