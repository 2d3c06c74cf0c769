//! Add and edit form for a member row.

#[cfg(test)]
#[path = "student_form_test.rs"]
mod student_form_test;

use leptos::prelude::*;

use crate::app::Services;
use crate::net::types::{Student, StudentDraft};
use crate::util::validation::{ValidationError, optional_field, validate_student};

/// Raw text of the form inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub grade_level: String,
    pub phone: String,
    pub date_of_birth: String,
    pub emergency_contact: String,
    pub notes: String,
}

impl StudentFields {
    /// Prefill from an existing row.
    pub fn from_student(student: &Student) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: text(&student.email),
            student_id: text(&student.student_id),
            grade_level: text(&student.grade_level),
            phone: text(&student.phone),
            date_of_birth: text(&student.date_of_birth),
            emergency_contact: text(&student.emergency_contact),
            notes: text(&student.notes),
        }
    }

    /// Trim the inputs into a validated insert or update payload.
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn to_draft(&self) -> Result<StudentDraft, ValidationError> {
        let draft = StudentDraft {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: optional_field(&self.email),
            student_id: optional_field(&self.student_id),
            grade_level: optional_field(&self.grade_level),
            phone: optional_field(&self.phone),
            date_of_birth: optional_field(&self.date_of_birth),
            emergency_contact: optional_field(&self.emergency_contact),
            notes: optional_field(&self.notes),
        };
        validate_student(&draft)?;
        Ok(draft)
    }
}

/// Single-line inputs, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    FirstName,
    LastName,
    Email,
    StudentId,
    GradeLevel,
    Phone,
    DateOfBirth,
    EmergencyContact,
}

impl Input {
    pub const ALL: [Input; 8] = [
        Input::FirstName,
        Input::LastName,
        Input::Email,
        Input::StudentId,
        Input::GradeLevel,
        Input::Phone,
        Input::DateOfBirth,
        Input::EmergencyContact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::StudentId => "Member #",
            Self::GradeLevel => "Belt",
            Self::Phone => "Phone",
            Self::DateOfBirth => "Date of birth",
            Self::EmergencyContact => "Emergency contact",
        }
    }

    fn html_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "tel",
            Self::DateOfBirth => "date",
            _ => "text",
        }
    }
}

impl StudentFields {
    pub fn get(&self, input: Input) -> &str {
        match input {
            Input::FirstName => &self.first_name,
            Input::LastName => &self.last_name,
            Input::Email => &self.email,
            Input::StudentId => &self.student_id,
            Input::GradeLevel => &self.grade_level,
            Input::Phone => &self.phone,
            Input::DateOfBirth => &self.date_of_birth,
            Input::EmergencyContact => &self.emergency_contact,
        }
    }

    pub fn set(&mut self, input: Input, value: String) {
        let slot = match input {
            Input::FirstName => &mut self.first_name,
            Input::LastName => &mut self.last_name,
            Input::Email => &mut self.email,
            Input::StudentId => &mut self.student_id,
            Input::GradeLevel => &mut self.grade_level,
            Input::Phone => &mut self.phone,
            Input::DateOfBirth => &mut self.date_of_birth,
            Input::EmergencyContact => &mut self.emergency_contact,
        };
        *slot = value;
    }
}

/// Inserts a new member, or updates `editing` when given.
#[component]
pub fn StudentForm(#[prop(optional)] editing: Option<Student>, on_saved: Callback<()>) -> impl IntoView {
    let services = expect_context::<Services>();
    let editing_id = editing.as_ref().map(|s| s.id.clone());
    let is_edit = editing_id.is_some();
    let fields = RwSignal::new(editing.as_ref().map(StudentFields::from_student).unwrap_or_default());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let draft = match fields.with_untracked(StudentFields::to_draft) {
            Ok(draft) => draft,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let editing_id = editing_id.clone();
            leptos::task::spawn_local(async move {
                let auth = services.auth();
                let result = match &editing_id {
                    Some(id) => crate::net::rest::update_student(&auth, id, &draft).await.map(|()| id.clone()),
                    None => crate::net::rest::insert_student(&auth, &draft).await.map(|s| s.id),
                };
                match result {
                    Ok(id) => {
                        leptos::logging::log!("dashboard: saved student {id}");
                        if editing_id.is_none() {
                            fields.set(StudentFields::default());
                        }
                        on_saved.run(());
                    }
                    Err(e) => {
                        leptos::logging::warn!("dashboard: save failed: {e}");
                        error.set(Some(e.user_message()));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (services, &editing_id, draft, on_saved);
    };

    view! {
        <form class="student-form" on:submit=on_submit>
            {Input::ALL
                .into_iter()
                .map(|input| {
                    view! {
                        <label class="student-form__field">
                            <span>{input.label()}</span>
                            <input
                                type=input.html_type()
                                required=matches!(input, Input::FirstName | Input::LastName)
                                prop:value=move || fields.with(|f| f.get(input).to_owned())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    fields.update(|f| f.set(input, value));
                                }
                            />
                        </label>
                    }
                })
                .collect_view()}
            <label class="student-form__field student-form__field--wide">
                <span>"Notes"</span>
                <textarea
                    prop:value=move || fields.with(|f| f.notes.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        fields.update(|f| f.notes = value);
                    }
                ></textarea>
            </label>
            <Show when=move || error.get().is_some()>
                <p class="student-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || match (busy.get(), is_edit) {
                    (true, _) => "Saving...",
                    (false, true) => "Save Changes",
                    (false, false) => "Save Member",
                }}
            </button>
        </form>
    }
}
