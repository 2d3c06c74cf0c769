use super::*;

#[test]
fn network_and_server_errors_are_transient() {
    assert!(ApiError::Network("offline".to_owned()).is_transient());
    assert!(ApiError::Http { status: 503, message: String::new() }.is_transient());
    assert!(ApiError::Http { status: 429, message: String::new() }.is_transient());
    assert!(!ApiError::Http { status: 401, message: String::new() }.is_transient());
    assert!(!ApiError::NoSession.is_transient());
}

#[test]
fn user_message_prefers_platform_message() {
    let err = ApiError::Http { status: 400, message: "Invalid login credentials".to_owned() };
    assert_eq!(err.user_message(), "Invalid login credentials");
    let err = ApiError::Http { status: 400, message: String::new() };
    assert_eq!(err.user_message(), "request failed (400): ");
}

#[test]
fn link_failure_keeps_message_and_classifies_kind() {
    let expired = ApiError::Http { status: 401, message: "expired".to_owned() };
    let err = RouteError::from_link_failure(RouteError::invalid_reset_link(), &expired);
    assert_eq!(err.kind, FailureKind::InvalidLink);
    assert_eq!(err.message, INVALID_RESET_LINK);

    let offline = ApiError::Network("offline".to_owned());
    let err = RouteError::from_link_failure(RouteError::invalid_confirmation_link(), &offline);
    assert_eq!(err.kind, FailureKind::Transient);
    assert!(err.message.contains("confirmation link"));
}

#[test]
fn error_body_message_reads_known_keys() {
    assert_eq!(error_body_message(r#"{"msg":"Token has expired"}"#), "Token has expired");
    assert_eq!(
        error_body_message(r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#),
        "Invalid Refresh Token"
    );
    assert_eq!(error_body_message(r#"{"message":"duplicate key"}"#), "duplicate key");
}

#[test]
fn error_body_message_falls_back_to_truncated_body() {
    assert_eq!(error_body_message("  bad gateway \n"), "bad gateway");
    let long = "x".repeat(500);
    assert_eq!(error_body_message(&long).len(), 200);
}
