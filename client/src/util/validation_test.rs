use super::*;

#[test]
fn email_accepts_plain_addresses() {
    assert_eq!(validate_email("sensei@dojo.test"), Ok(()));
    assert_eq!(validate_email("  kim.lee+club@mail.example.org "), Ok(()));
}

#[test]
fn email_rejects_malformed_addresses() {
    for bad in ["", "dojo.test", "@dojo.test", "kim@", "kim@dojo", "kim@.test", "kim@dojo.", "a b@dojo.test", "a@b@c.d"] {
        assert_eq!(validate_email(bad), Err(ValidationError::Email), "{bad}");
    }
}

#[test]
fn password_needs_six_characters() {
    assert_eq!(validate_password("12345"), Err(ValidationError::PasswordTooShort));
    assert_eq!(validate_password("123456"), Ok(()));
    assert_eq!(validate_password("ñññññ"), Err(ValidationError::PasswordTooShort));
}

#[test]
fn new_password_checks_length_before_match() {
    assert_eq!(validate_new_password("abc", "xyz"), Err(ValidationError::PasswordTooShort));
    assert_eq!(validate_new_password("abcdef", "abcdeg"), Err(ValidationError::PasswordMismatch));
    assert_eq!(validate_new_password("abcdef", "abcdef"), Ok(()));
}

#[test]
fn student_requires_both_names() {
    let mut draft = StudentDraft {
        first_name: "Min".to_owned(),
        last_name: " ".to_owned(),
        ..StudentDraft::default()
    };
    assert_eq!(validate_student(&draft), Err(ValidationError::NameRequired));
    draft.last_name = "Park".to_owned();
    assert_eq!(validate_student(&draft), Ok(()));
    draft.email = Some("nope".to_owned());
    assert_eq!(validate_student(&draft), Err(ValidationError::Email));
}

#[test]
fn optional_field_trims_and_drops_blank() {
    assert_eq!(optional_field("  "), None);
    assert_eq!(optional_field(" Black belt "), Some("Black belt".to_owned()));
}

#[test]
fn messages_are_user_facing() {
    assert_eq!(ValidationError::PasswordTooShort.to_string(), "Password must be at least 6 characters.");
    assert_eq!(ValidationError::PasswordRequired.to_string(), "Please enter your password.");
}
