//! Per-student document files in the platform's object storage.
//!
//! Objects live in the `documents` bucket under `"{student_id}/"`. Each
//! upload gets a fresh UUID prefix so two files with the same name never
//! overwrite each other.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use uuid::Uuid;

use super::auth::PlatformAuth;
use super::error::ApiError;
use super::types::DocumentEntry;

pub const BUCKET: &str = "documents";
const LIST_LIMIT: u32 = 100;

/// Replace anything outside `[A-Za-z0-9._-]` so the name is a safe key segment.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() { "file".to_owned() } else { cleaned.to_owned() }
}

/// Storage key for a new upload.
pub fn object_key(student_id: &str, file_name: &str, id: Uuid) -> String {
    format!("{student_id}/{id}-{}", sanitize_file_name(file_name))
}

/// Key for an entry returned by `list_documents`.
pub fn entry_key(student_id: &str, entry: &DocumentEntry) -> String {
    format!("{student_id}/{}", entry.name)
}

/// Name shown to users: the stored name without its UUID prefix.
pub fn display_name(stored: &str) -> &str {
    match stored.get(..36).zip(stored.get(36..)) {
        Some((prefix, rest)) if Uuid::parse_str(prefix).is_ok() => rest.strip_prefix('-').unwrap_or(rest),
        _ => stored,
    }
}

pub fn object_path(key: &str) -> String {
    format!("/storage/v1/object/{BUCKET}/{key}")
}

pub fn list_path() -> String {
    format!("/storage/v1/object/list/{BUCKET}")
}

/// Request body for listing one student's folder.
pub fn list_body(student_id: &str) -> serde_json::Value {
    serde_json::json!({
        "prefix": format!("{student_id}/"),
        "limit": LIST_LIMIT,
        "offset": 0,
        "sortBy": { "column": "name", "order": "asc" },
    })
}

fn bearer(auth: &PlatformAuth) -> Result<String, ApiError> {
    auth.access_token().ok_or(ApiError::NoSession)
}

/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn list_documents(auth: &PlatformAuth, student_id: &str) -> Result<Vec<DocumentEntry>, ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &list_path());
        let resp = super::http::with_auth(gloo_net::http::Request::post(&url), auth.config(), Some(&token))
            .json(&list_body(student_id))
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(super::http::network)?;
        let entries: Vec<DocumentEntry> = super::http::read_json(resp).await?;
        // Folder placeholders come back without an id.
        Ok(entries.into_iter().filter(|e| e.id.is_some()).collect())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, student_id);
        Err(ApiError::Unavailable)
    }
}

/// Upload a browser file and return its key.
///
/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
#[cfg(feature = "hydrate")]
pub async fn upload_document(auth: &PlatformAuth, student_id: &str, file: web_sys::File) -> Result<String, ApiError> {
    let token = bearer(auth)?;
    let key = object_key(student_id, &file.name(), Uuid::new_v4());
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_owned(),
        t => t,
    };
    let url = super::http::endpoint(auth.config(), &object_path(&key));
    let resp = super::http::with_auth(gloo_net::http::Request::post(&url), auth.config(), Some(&token))
        .header("Content-Type", &content_type)
        .header("x-upsert", "false")
        .body(file)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(super::http::network)?;
    super::http::read_empty(resp).await?;
    leptos::logging::log!("storage: uploaded {key}");
    Ok(key)
}

/// Fetch a document and return an object URL for it.
///
/// The caller owns the URL and should revoke it when done.
///
/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn download_document(auth: &PlatformAuth, key: &str) -> Result<String, ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &object_path(key));
        let resp = super::http::with_auth(gloo_net::http::Request::get(&url), auth.config(), Some(&token))
            .send()
            .await
            .map_err(super::http::network)?;
        let resp = super::http::check(resp).await?;
        let bytes = resp.binary().await.map_err(|e| ApiError::Parse(e.to_string()))?;
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
        let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(|e| ApiError::Parse(format!("{e:?}")))?;
        web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| ApiError::Parse(format!("{e:?}")))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, key);
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Returns `NoSession` when signed out, otherwise the platform error.
pub async fn delete_document(auth: &PlatformAuth, key: &str) -> Result<(), ApiError> {
    let token = bearer(auth)?;
    #[cfg(feature = "hydrate")]
    {
        let url = super::http::endpoint(auth.config(), &format!("/storage/v1/object/{BUCKET}"));
        let resp = super::http::with_auth(gloo_net::http::Request::delete(&url), auth.config(), Some(&token))
            .json(&serde_json::json!({ "prefixes": [key] }))
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(super::http::network)?;
        super::http::read_empty(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, key);
        Err(ApiError::Unavailable)
    }
}
