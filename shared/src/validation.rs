//! Credential validation rules
//!
//! Format and strength checks applied before any credential is hashed or
//! stored. The email pattern is intentionally loose: non-whitespace local
//! part, `@`, and a domain containing a literal dot. It accepts some
//! malformed addresses in exchange for never rejecting a real one; it is
//! not an RFC 5322 validator.

/// Check an email address against the structural pattern
///
/// Input is trimmed before testing.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    email_regex.is_match(email)
}

/// Check password strength
///
/// The enforced rule is: length >= 8, at least one uppercase letter, at
/// least one lowercase letter, and at least one digit. Symbols are allowed
/// but not required, whatever the user-facing message may suggest.
pub fn is_strong_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
