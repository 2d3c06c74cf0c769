use super::*;

fn filled() -> StudentFields {
    StudentFields {
        first_name: " Min ".to_owned(),
        last_name: "Park".to_owned(),
        grade_level: "Yellow belt".to_owned(),
        notes: "   ".to_owned(),
        ..StudentFields::default()
    }
}

#[test]
fn to_draft_trims_and_omits_blank_optionals() {
    let draft = filled().to_draft().unwrap();
    assert_eq!(draft.first_name, "Min");
    assert_eq!(draft.grade_level.as_deref(), Some("Yellow belt"));
    assert_eq!(draft.notes, None);
    assert_eq!(draft.email, None);
}

#[test]
fn to_draft_rejects_missing_last_name() {
    let fields = StudentFields {
        last_name: String::new(),
        ..filled()
    };
    assert_eq!(fields.to_draft(), Err(ValidationError::NameRequired));
}

#[test]
fn to_draft_rejects_bad_email() {
    let fields = StudentFields {
        email: "min-at-dojo".to_owned(),
        ..filled()
    };
    assert_eq!(fields.to_draft(), Err(ValidationError::Email));
}

#[test]
fn set_and_get_address_the_same_field() {
    let mut fields = StudentFields::default();
    for input in Input::ALL {
        fields.set(input, input.label().to_owned());
    }
    for input in Input::ALL {
        assert_eq!(fields.get(input), input.label());
    }
    assert_eq!(fields.student_id, "Member #");
}

#[test]
fn draft_serializes_without_empty_optionals() {
    let json = serde_json::to_value(filled().to_draft().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "first_name": "Min", "last_name": "Park", "grade_level": "Yellow belt" })
    );
}

#[test]
fn from_student_prefills_every_field_and_round_trips() {
    let student = Student {
        id: "s1".to_owned(),
        first_name: "Min".to_owned(),
        last_name: "Park".to_owned(),
        email: Some("min@dojo.test".to_owned()),
        student_id: Some("M-12".to_owned()),
        grade_level: Some("Green belt".to_owned()),
        phone: None,
        date_of_birth: Some("2012-04-01".to_owned()),
        emergency_contact: None,
        notes: Some("Left-handed".to_owned()),
        created_at: None,
    };
    let fields = StudentFields::from_student(&student);
    assert_eq!(fields.get(Input::StudentId), "M-12");
    assert_eq!(fields.get(Input::Phone), "");

    let draft = fields.to_draft().unwrap();
    assert_eq!(draft.email.as_deref(), Some("min@dojo.test"));
    assert_eq!(draft.phone, None);
    assert_eq!(draft.notes.as_deref(), Some("Left-handed"));
}
