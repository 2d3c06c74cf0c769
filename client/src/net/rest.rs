//! Data calls for the `students` and `profiles` collections.
//!
//! Client-side (hydrate): `gloo-net` requests against the platform's REST
//! interface, authorized with the signed-in user's token. Server-side: every
//! call returns `ApiError::Unavailable`.
//!
//! Row-level access (who may read or edit which rows) is enforced by the data
//! platform. These helpers only shape requests.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use super::auth::PlatformAuth;
use super::error::ApiError;
use super::http::encode_query_value;
use super::types::{Profile, Student, StudentDraft};

const STUDENTS: &str = "/rest/v1/students";
const PROFILES: &str = "/rest/v1/profiles";

pub fn students_list_path() -> String {
    format!("{STUDENTS}?select=*&order=created_at.desc")
}

/// Filter path addressing one row by `id`.
pub fn row_path(collection: &str, id: &str) -> String {
    format!("{collection}?id=eq.{}", encode_query_value(id))
}

pub fn student_row_path(id: &str) -> String {
    row_path(STUDENTS, id)
}

/// PATCH body for a student edit. Every editable column is sent so a cleared
/// optional becomes `null` on the row.
pub fn student_update_body(draft: &StudentDraft) -> serde_json::Value {
    serde_json::json!({
        "first_name": draft.first_name,
        "last_name": draft.last_name,
        "email": draft.email,
        "student_id": draft.student_id,
        "grade_level": draft.grade_level,
        "phone": draft.phone,
        "date_of_birth": draft.date_of_birth,
        "emergency_contact": draft.emergency_contact,
        "notes": draft.notes,
    })
}

pub fn profiles_list_path() -> String {
    format!("{PROFILES}?select=*&order=created_at.asc")
}

pub fn profile_row_path(user_id: &str) -> String {
    row_path(PROFILES, user_id)
}

fn bearer(auth: &PlatformAuth) -> Result<String, ApiError> {
    auth.access_token().ok_or(ApiError::NoSession)
}

/// Fetch every visible student, newest first.
///
/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn list_students(auth: &PlatformAuth) -> Result<Vec<Student>, ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &students_list_path());
        let resp = super::http::with_auth(gloo_net::http::Request::get(&url), auth.config(), Some(&token))
            .send()
            .await
            .map_err(super::http::network)?;
        super::http::read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Insert a student and return the stored row.
///
/// # Errors
///
/// Returns `NoSession` when signed out, `Parse` if the platform returns no
/// row, otherwise the platform error.
pub async fn insert_student(auth: &PlatformAuth, draft: &StudentDraft) -> Result<Student, ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), STUDENTS);
        let resp = super::http::with_auth(gloo_net::http::Request::post(&url), auth.config(), Some(&token))
            .header("Prefer", "return=representation")
            .json(draft)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(super::http::network)?;
        let rows: Vec<Student> = super::http::read_json(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::Parse("insert returned no row".to_owned()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, draft);
        Err(ApiError::Unavailable)
    }
}

/// Overwrite the editable fields of one student.
///
/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn update_student(auth: &PlatformAuth, id: &str, draft: &StudentDraft) -> Result<(), ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &student_row_path(id));
        let resp = super::http::with_auth(gloo_net::http::Request::patch(&url), auth.config(), Some(&token))
            .json(&student_update_body(draft))
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(super::http::network)?;
        super::http::read_empty(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, id, draft);
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn delete_student(auth: &PlatformAuth, id: &str) -> Result<(), ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &student_row_path(id));
        let resp = super::http::with_auth(gloo_net::http::Request::delete(&url), auth.config(), Some(&token))
            .send()
            .await
            .map_err(super::http::network)?;
        super::http::read_empty(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, id);
        Err(ApiError::Unavailable)
    }
}

/// Fetch all profiles. Only staff roles get rows back.
///
/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn list_profiles(auth: &PlatformAuth) -> Result<Vec<Profile>, ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &profiles_list_path());
        let resp = super::http::with_auth(gloo_net::http::Request::get(&url), auth.config(), Some(&token))
            .send()
            .await
            .map_err(super::http::network)?;
        super::http::read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Fetch the signed-in user's own profile, if one exists.
///
/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn fetch_own_profile(auth: &PlatformAuth) -> Result<Option<Profile>, ApiError> {
    let session = auth.cached_session().ok_or(ApiError::NoSession)?;
    #[cfg(feature = "hydrate")]
    {
        let path = format!("{}&select=*", profile_row_path(&session.user.id));
        let url = super::http::endpoint(auth.config(), &path);
        let resp = super::http::with_auth(
            gloo_net::http::Request::get(&url),
            auth.config(),
            Some(&session.access_token),
        )
        .send()
        .await
        .map_err(super::http::network)?;
        let rows: Vec<Profile> = super::http::read_json(resp).await?;
        Ok(rows.into_iter().next())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
        Err(ApiError::Unavailable)
    }
}

/// Set another user's role. The platform rejects this for non-admins.
///
/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn update_profile_role(auth: &PlatformAuth, user_id: &str, role: &str) -> Result<(), ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &profile_row_path(user_id));
        let resp = super::http::with_auth(gloo_net::http::Request::patch(&url), auth.config(), Some(&token))
            .json(&serde_json::json!({ "role": role }))
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(super::http::network)?;
        super::http::read_empty(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, user_id, role);
        Err(ApiError::Unavailable)
    }
}
