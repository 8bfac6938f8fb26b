use lazy_static::lazy_static;
use regex::Regex;

use super::dto::RegisterRequest;
use crate::error::FieldError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{1,30}$").unwrap();
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_NAME_LEN: usize = 100;

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Trims and lower-cases the email, trims username and name, then checks
/// every field. All violations are reported together.
pub fn validate_registration(req: &mut RegisterRequest) -> Result<(), Vec<FieldError>> {
    req.email = req.email.trim().to_lowercase();
    req.username = req.username.trim().to_string();
    req.name = req
        .name
        .take()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let mut errors = Vec::new();
    if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if !USERNAME_RE.is_match(&req.username) {
        errors.push(FieldError::new(
            "username",
            "Username must be 1-30 characters of letters, digits or underscores",
        ));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if let Some(name) = &req.name {
        if name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                "name",
                format!("Name must be at most {MAX_NAME_LEN} characters"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
