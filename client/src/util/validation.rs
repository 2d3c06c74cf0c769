//! Form checks run before any network call.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::net::types::StudentDraft;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    Email,
    #[error("Please enter your password.")]
    PasswordRequired,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("First and last name are required.")]
    NameRequired,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::Email);
    };
    let domain_ok = domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.');
    if local.is_empty() || !domain_ok || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(ValidationError::Email);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Password plus confirmation, as on the recovery form.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    validate_password(password)?;
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_student(draft: &StudentDraft) -> Result<(), ValidationError> {
    if draft.first_name.trim().is_empty() || draft.last_name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if let Some(email) = draft.email.as_deref() {
        validate_email(email)?;
    }
    Ok(())
}

/// `None` for blank input, trimmed text otherwise.
pub fn optional_field(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_owned()) }
}
