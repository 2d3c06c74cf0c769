use super::*;
use crate::config::AppConfig;
use futures::executor::block_on;

const ID: &str = "3f2b8c1e-7a4d-4e2f-9b1a-0c5d6e7f8a9b";

fn entry(name: &str) -> DocumentEntry {
    DocumentEntry {
        name: name.to_owned(),
        id: Some("obj".to_owned()),
        created_at: None,
    }
}

#[test]
fn sanitize_replaces_unsafe_characters() {
    assert_eq!(sanitize_file_name("Waiver Form (2024).pdf"), "Waiver_Form__2024_.pdf");
    assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
    assert_eq!(sanitize_file_name("  "), "file");
    assert_eq!(sanitize_file_name("ünïcode.txt"), "_n_code.txt");
}

#[test]
fn object_key_is_scoped_to_student_with_uuid_prefix() {
    let id = Uuid::parse_str(ID).unwrap();
    assert_eq!(object_key("s1", "belt test.jpg", id), format!("s1/{ID}-belt_test.jpg"));
}

#[test]
fn display_name_strips_uuid_prefix() {
    assert_eq!(display_name(&format!("{ID}-waiver.pdf")), "waiver.pdf");
    assert_eq!(display_name("waiver.pdf"), "waiver.pdf");
    assert_eq!(display_name("not-a-uuid-prefix-at-all-but-long-enough-file.pdf"), "not-a-uuid-prefix-at-all-but-long-enough-file.pdf");
}

#[test]
fn entry_key_rebuilds_full_path() {
    assert_eq!(entry_key("s1", &entry("abc.pdf")), "s1/abc.pdf");
}

#[test]
fn paths_target_documents_bucket() {
    assert_eq!(object_path("s1/a.pdf"), "/storage/v1/object/documents/s1/a.pdf");
    assert_eq!(list_path(), "/storage/v1/object/list/documents");
}

#[test]
fn list_body_scopes_prefix_to_folder() {
    let body = list_body("s1");
    assert_eq!(body["prefix"], "s1/");
    assert_eq!(body["limit"], 100);
    assert_eq!(body["sortBy"]["column"], "name");
}

#[test]
fn storage_calls_require_session() {
    let auth = PlatformAuth::with_session(AppConfig::default(), None);
    assert_eq!(block_on(list_documents(&auth, "s1")), Err(ApiError::NoSession));
    assert_eq!(block_on(download_document(&auth, "s1/a")), Err(ApiError::NoSession));
    assert_eq!(block_on(delete_document(&auth, "s1/a")), Err(ApiError::NoSession));
}
