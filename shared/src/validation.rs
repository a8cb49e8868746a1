//! Input validation functions
//!
//! Custom validators live here; request structs use the `validator` derive
//! macros for field-level rules.

use std::sync::OnceLock;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_RE: OnceLock<regex_lite::Regex> = OnceLock::new();

    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 100 {
        return Err("Email too long".to_string());
    }
    let re = EMAIL_RE.get_or_init(|| {
        regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex")
    });
    if !re.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
///
/// Only the first 72 bytes take part in hashing; longer input is accepted.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("organizer@test.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a b@test.com").is_err());
        assert!(validate_email("user@localhost").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Test Organizer").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"n".repeat(101)).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_password_length_valid(len in 8usize..=128) {
            let password: String = (0..len).map(|_| 'a').collect();
            prop_assert!(validate_password(&password).is_ok());
        }

        #[test]
        fn prop_generated_emails_valid(local in "[a-z0-9._]{1,20}", domain in "[a-z]{1,20}") {
            let email = format!("{}@{}.com", local, domain);
            prop_assert!(validate_email(&email).is_ok());
        }
    }
}
