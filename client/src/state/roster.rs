//! Dashboard data: students, profiles and the open documents folder.
//!
//! DESIGN
//! ======
//! Lists are replaced wholesale by each fetch. Mutations never patch local
//! rows; the page refetches after every successful write so the view always
//! reflects what the platform stored.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use crate::net::types::{DocumentEntry, Profile, Student};

#[derive(Clone, Debug, Default)]
pub struct RosterState {
    pub students: Vec<Student>,
    pub loading: bool,
    pub error: Option<String>,
    pub profiles: Vec<Profile>,
    /// Student whose documents panel is open.
    pub documents_for: Option<String>,
    pub documents: Vec<DocumentEntry>,
    pub documents_error: Option<String>,
}

impl RosterState {
    pub fn member_count_label(&self) -> String {
        format!("{} members", self.students.len())
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn set_students(&mut self, students: Vec<Student>) {
        self.students = students;
        self.loading = false;
    }

    /// Keep the previous rows visible; surface the message.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn open_documents(&mut self, student_id: &str) {
        if self.documents_for.as_deref() != Some(student_id) {
            self.documents.clear();
        }
        self.documents_for = Some(student_id.to_owned());
        self.documents_error = None;
    }

    pub fn close_documents(&mut self) {
        self.documents_for = None;
        self.documents.clear();
        self.documents_error = None;
    }

    /// Ignore listings that arrive after the panel moved to another student.
    pub fn set_documents(&mut self, student_id: &str, documents: Vec<DocumentEntry>) {
        if self.documents_for.as_deref() == Some(student_id) {
            self.documents = documents;
        }
    }

    /// Forget everything loaded for the previous user.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
