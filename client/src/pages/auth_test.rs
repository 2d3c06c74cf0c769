use super::*;

#[test]
fn labels_follow_mode() {
    assert_eq!(AuthMode::default(), AuthMode::SignIn);
    assert_eq!(AuthMode::Reset.title(), "Reset Password");
    assert_eq!(AuthMode::Reset.submit_label(), "Send Reset Link");
    assert_eq!(AuthMode::SignUp.submit_label(), "Sign Up");
}

#[test]
fn reset_mode_hides_password() {
    assert!(!AuthMode::Reset.needs_password());
    assert!(AuthMode::SignIn.needs_password());
}

#[test]
fn reset_only_checks_email() {
    assert_eq!(AuthMode::Reset.validate("kim@dojo.test", ""), Ok(()));
    assert_eq!(AuthMode::Reset.validate("kim", ""), Err(ValidationError::Email));
}

#[test]
fn sign_up_enforces_minimum_password() {
    assert_eq!(AuthMode::SignUp.validate("kim@dojo.test", "12345"), Err(ValidationError::PasswordTooShort));
    assert_eq!(AuthMode::SignUp.validate("kim@dojo.test", "123456"), Ok(()));
}

#[test]
fn sign_in_requires_some_password() {
    assert_eq!(AuthMode::SignIn.validate("kim@dojo.test", ""), Err(ValidationError::PasswordRequired));
    // Legacy accounts may predate the length rule.
    assert_eq!(AuthMode::SignIn.validate("kim@dojo.test", "abc"), Ok(()));
}

#[test]
fn confirmation_messages_match_emails_sent() {
    assert_eq!(SIGN_UP_SENT, "Check your email for confirmation link!");
    assert_eq!(RESET_SENT, "Password reset link sent to your email!");
}
