//! Pure field validators.
//!
//! Every validator maps the current field value to a user-facing message,
//! returning an empty string when the value is acceptable. Forms call them on
//! every evaluation; nothing here is cached.

use crate::constants::{MIN_COMPLAINT_LENGTH, MIN_PASSWORD_LENGTH};
use crate::error::SharedError;

pub fn validate_identifier(value: &str) -> String {
    if value.trim().is_empty() {
        return "Email or University ID is required.".into();
    }
    String::new()
}

/// Sign-in only checks presence; strength rules apply to new passwords.
pub fn validate_login_password(value: &str) -> String {
    if value.is_empty() {
        return "Password is required.".into();
    }
    String::new()
}

pub fn validate_full_name(value: &str) -> String {
    if value.trim().is_empty() {
        return "Full name is required.".into();
    }
    String::new()
}

pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Email used to register: must belong to one of `allowed_domains`.
pub fn validate_university_email(value: &str, allowed_domains: &[String]) -> String {
    check_email(
        value,
        allowed_domains,
        "University email is required.",
        "Enter a valid university email.",
    )
}

/// Email used to request a password reset.
pub fn validate_reset_email(value: &str, allowed_domains: &[String]) -> String {
    check_email(
        value,
        allowed_domains,
        "Email is required.",
        "Enter a valid email.",
    )
}

fn check_email(value: &str, allowed_domains: &[String], missing: &str, malformed: &str) -> String {
    let email = normalize_email(value);
    if email.is_empty() {
        return missing.into();
    }
    let Some(domain) = email_domain(&email) else {
        return malformed.into();
    };
    if !allowed_domains.is_empty() && !allowed_domains.iter().any(|d| d == domain) {
        let example = &allowed_domains[0];
        return format!("Use your university email (e.g., name@{example}).");
    }
    String::new()
}

/// `local@domain.tld` with no whitespace and a single `@`.
fn email_domain(email: &str) -> Option<&str> {
    if email.chars().any(char::is_whitespace) {
        return None;
    }
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.contains('@') {
        return None;
    }
    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    dotted.then_some(domain)
}

pub fn validate_new_password(value: &str) -> String {
    if value.is_empty() {
        return "Password is required.".into();
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return format!("Password must be at least {MIN_PASSWORD_LENGTH} characters.");
    }
    let has_letter = value.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return "Password must include at least one letter and one number.".into();
    }
    String::new()
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> String {
    if confirm.is_empty() {
        return "Confirm your password.".into();
    }
    if password != confirm {
        return "Passwords do not match.".into();
    }
    String::new()
}

pub fn validate_agreement(agreed: bool) -> String {
    if agreed {
        String::new()
    } else {
        "You must agree to continue.".into()
    }
}

pub fn validate_complaint_text(value: &str) -> String {
    let length = value.trim().chars().count();
    if length == 0 {
        return "Complaint text is required.".into();
    }
    if length < MIN_COMPLAINT_LENGTH {
        return format!("Complaint text must be at least {MIN_COMPLAINT_LENGTH} characters.");
    }
    String::new()
}

/// Category is optional; when given it must be a positive integer.
pub fn validate_category(value: &str) -> String {
    match parse_category(value) {
        Ok(_) => String::new(),
        Err(_) => "Category must be a positive number.".into(),
    }
}

pub fn validate_complaint_id(value: &str) -> String {
    if value.trim().is_empty() {
        return "Complaint ID is required.".into();
    }
    match parse_positive_id(value) {
        Ok(_) => String::new(),
        Err(_) => "Complaint ID must be a positive number.".into(),
    }
}

pub fn validate_response_text(value: &str) -> String {
    if value.trim().is_empty() {
        return "Response text is required.".into();
    }
    String::new()
}

pub fn validate_comment(value: &str) -> String {
    if value.trim().is_empty() {
        return "Comment is required.".into();
    }
    String::new()
}

pub fn validate_reset_token(value: &str) -> String {
    if value.trim().is_empty() {
        return "This reset link is invalid or has expired.".into();
    }
    String::new()
}

pub fn parse_positive_id(value: &str) -> Result<u64, SharedError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(SharedError::InvalidId(value.to_string())),
    }
}

pub fn parse_category(value: &str) -> Result<Option<u64>, SharedError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_positive_id(value)
        .map(Some)
        .map_err(|_| SharedError::InvalidCategory(value.to_string()))
}

/// Split "First Middle Last" into ("First", "Middle Last").
pub fn split_full_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains() -> Vec<String> {
        vec!["astanait.edu.kz".to_string()]
    }

    #[test]
    fn complaint_text_needs_ten_characters() {
        assert_eq!(
            validate_complaint_text("a"),
            "Complaint text must be at least 10 characters."
        );
        assert_eq!(validate_complaint_text("0123456789"), "");
        assert_eq!(validate_complaint_text("   short   "), validate_complaint_text("short"));
        assert_eq!(validate_complaint_text("   "), "Complaint text is required.");
    }

    #[test]
    fn university_email_rules() {
        assert_eq!(
            validate_university_email("", &domains()),
            "University email is required."
        );
        assert_eq!(
            validate_university_email("not-an-email", &domains()),
            "Enter a valid university email."
        );
        assert_eq!(
            validate_university_email("a@b@c.kz", &domains()),
            "Enter a valid university email."
        );
        assert_eq!(
            validate_university_email("name@gmail.com", &domains()),
            "Use your university email (e.g., name@astanait.edu.kz)."
        );
        assert_eq!(
            validate_university_email("  Name@AstanaIT.edu.kz ", &domains()),
            ""
        );
    }

    #[test]
    fn reset_email_uses_its_own_copy() {
        assert_eq!(validate_reset_email(" ", &domains()), "Email is required.");
        assert_eq!(validate_reset_email("x@y", &domains()), "Enter a valid email.");
    }

    #[test]
    fn new_password_rules() {
        assert_eq!(validate_new_password(""), "Password is required.");
        assert_eq!(
            validate_new_password("abc1"),
            "Password must be at least 8 characters."
        );
        assert_eq!(
            validate_new_password("abcdefgh"),
            "Password must include at least one letter and one number."
        );
        assert_eq!(validate_new_password("abcdefg1"), "");
    }

    #[test]
    fn confirm_password_rules() {
        assert_eq!(validate_confirm_password("abcdefg1", ""), "Confirm your password.");
        assert_eq!(
            validate_confirm_password("abcdefg1", "abcdefg2"),
            "Passwords do not match."
        );
        assert_eq!(validate_confirm_password("abcdefg1", "abcdefg1"), "");
    }

    #[test]
    fn ids_and_categories() {
        assert_eq!(parse_positive_id(" 42 "), Ok(42));
        assert!(parse_positive_id("0").is_err());
        assert!(parse_positive_id("-3").is_err());
        assert_eq!(parse_category(""), Ok(None));
        assert_eq!(parse_category("7"), Ok(Some(7)));
        assert_eq!(validate_category("seven"), "Category must be a positive number.");
        assert_eq!(validate_complaint_id(""), "Complaint ID is required.");
        assert_eq!(validate_complaint_id("abc"), "Complaint ID must be a positive number.");
    }

    #[test]
    fn full_name_split() {
        assert_eq!(
            split_full_name("  Aigerim  Nurlanovna Sadykova "),
            ("Aigerim".to_string(), "Nurlanovna Sadykova".to_string())
        );
        assert_eq!(split_full_name("Madonna"), ("Madonna".to_string(), String::new()));
    }
}
