use super::*;

fn student() -> Student {
    Student {
        id: "s1".to_owned(),
        first_name: "Min".to_owned(),
        last_name: "Park".to_owned(),
        email: Some("min@dojo.test".to_owned()),
        student_id: Some("TKD-014".to_owned()),
        grade_level: Some("Green belt".to_owned()),
        phone: Some("555-0100".to_owned()),
        date_of_birth: Some("2012-04-01".to_owned()),
        emergency_contact: Some("  ".to_owned()),
        notes: None,
        created_at: None,
    }
}

fn labels(card: &StudentCard) -> Vec<&'static str> {
    card.fields.iter().map(|(label, _)| *label).collect()
}

#[test]
fn parse_known_roles_case_insensitively() {
    assert_eq!(Role::parse(Some("admin")), Role::Admin);
    assert_eq!(Role::parse(Some(" Instructor ")), Role::Instructor);
}

#[test]
fn parse_falls_back_to_member() {
    assert_eq!(Role::parse(None), Role::Member);
    assert_eq!(Role::parse(Some("parent")), Role::Member);
    assert_eq!(Role::parse(Some("")), Role::Member);
}

#[test]
fn role_round_trips_through_str() {
    for role in Role::ALL {
        assert_eq!(Role::parse(Some(role.as_str())), role);
    }
}

#[test]
fn staff_and_admin_permissions() {
    assert!(Role::Admin.is_staff() && Role::Admin.can_manage_roles());
    assert!(Role::Instructor.is_staff() && !Role::Instructor.can_manage_roles());
    assert!(!Role::Member.is_staff());
}

#[test]
fn member_projection_hides_contact_details() {
    let card = project_student(&student(), Role::Member);
    assert_eq!(card.title, "Min Park");
    assert_eq!(labels(&card), vec!["Belt", "Member #"]);
}

#[test]
fn staff_projection_includes_non_empty_details() {
    let card = project_student(&student(), Role::Instructor);
    assert_eq!(labels(&card), vec!["Belt", "Member #", "Email", "Phone", "Date of birth"]);
    assert_eq!(card.fields[2].1, "min@dojo.test");
}

#[test]
fn every_role_may_edit_and_delete_but_only_staff_open_documents() {
    for role in Role::ALL {
        let actions = CardActions::for_role(role);
        assert!(actions.edit && actions.delete, "{role:?}");
        assert_eq!(actions.documents, role.is_staff(), "{role:?}");
    }
    assert!(!CardActions::for_role(Role::Member).documents);
}
