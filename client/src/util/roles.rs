//! Role-based projection of student rows for display.
//!
//! Presentation only. Which rows and columns a user may actually read is
//! enforced by the data platform's row-level policies; hiding a field here
//! does not protect it.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use crate::net::types::Student;

/// Club role stored on a user's profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    Admin,
    Instructor,
    #[default]
    Member,
}

impl Role {
    /// Unknown or missing values are treated as `Member`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("admin") => Self::Admin,
            Some("instructor") => Self::Instructor,
            _ => Self::Member,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Instructor => "instructor",
            Self::Member => "member",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Instructor => "Instructor",
            Self::Member => "Member",
        }
    }

    /// Admins and instructors see contact details and manage documents.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Instructor)
    }

    pub fn can_manage_roles(self) -> bool {
        self == Self::Admin
    }

    pub const ALL: [Role; 3] = [Role::Admin, Role::Instructor, Role::Member];
}

/// Buttons a member card offers to one role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardActions {
    pub edit: bool,
    pub delete: bool,
    pub documents: bool,
}

impl CardActions {
    /// Any signed-in user may add, edit and delete members.
    pub fn for_role(role: Role) -> Self {
        Self {
            edit: true,
            delete: true,
            documents: role.is_staff(),
        }
    }
}

/// A student as one role should see it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentCard {
    pub id: String,
    pub title: String,
    /// `(label, value)` pairs, empty values omitted.
    pub fields: Vec<(&'static str, String)>,
}

pub fn project_student(student: &Student, role: Role) -> StudentCard {
    let mut fields = Vec::new();
    push(&mut fields, "Belt", student.grade_level.as_deref());
    push(&mut fields, "Member #", student.student_id.as_deref());
    if role.is_staff() {
        push(&mut fields, "Email", student.email.as_deref());
        push(&mut fields, "Phone", student.phone.as_deref());
        push(&mut fields, "Date of birth", student.date_of_birth.as_deref());
        push(&mut fields, "Emergency contact", student.emergency_contact.as_deref());
        push(&mut fields, "Notes", student.notes.as_deref());
    }
    StudentCard {
        id: student.id.clone(),
        title: student.full_name(),
        fields,
    }
}

fn push(fields: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        fields.push((label, value.to_owned()));
    }
}
