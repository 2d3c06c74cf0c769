use super::*;

fn profile(full_name: Option<&str>, email: Option<&str>) -> Profile {
    Profile {
        id: "u1".to_owned(),
        email: email.map(str::to_owned),
        full_name: full_name.map(str::to_owned),
        role: None,
        created_at: None,
    }
}

#[test]
fn label_prefers_name_with_email() {
    assert_eq!(profile_label(&profile(Some("Kim Lee"), Some("kim@dojo.test"))), "Kim Lee <kim@dojo.test>");
}

#[test]
fn label_falls_back_to_email_then_id() {
    assert_eq!(profile_label(&profile(Some(" "), Some("kim@dojo.test"))), "kim@dojo.test");
    assert_eq!(profile_label(&profile(None, None)), "u1");
}
