use super::*;

fn resolve(path: &str, fragment: &str, has_session: bool, hold: RecoveryHold) -> NavigationIntent {
    NavigationIntent::resolve(RoutePath::parse(path), &Fragment::parse(fragment), has_session, hold)
}

const RECOVERY: &str = "access_token=abc&refresh_token=def&type=recovery";

#[test]
fn recovery_with_tokens_wins_with_or_without_session() {
    let expected = NavigationIntent::PasswordRecovery(TokenSource::Fragment(TokenPair::new("abc", "def")));
    for has_session in [false, true] {
        for path in ["/", "/reset-password", "/auth/callback"] {
            assert_eq!(resolve(path, RECOVERY, has_session, RecoveryHold::None), expected);
        }
    }
}

#[test]
fn fragment_tokens_take_precedence_over_holds() {
    let intent = resolve("/", RECOVERY, false, RecoveryHold::Exchanged);
    assert!(matches!(intent, NavigationIntent::PasswordRecovery(TokenSource::Fragment(_))));
}

#[test]
fn pending_tokens_resume_recovery_without_fragment() {
    assert_eq!(
        resolve("/reset-password", "", false, RecoveryHold::Pending),
        NavigationIntent::PasswordRecovery(TokenSource::Pending)
    );
    assert_eq!(
        resolve("/", "", true, RecoveryHold::Pending),
        NavigationIntent::PasswordRecovery(TokenSource::Pending)
    );
}

#[test]
fn exchanged_hold_keeps_recovery_screen() {
    assert_eq!(
        resolve("/reset-password", "", true, RecoveryHold::Exchanged),
        NavigationIntent::PasswordRecovery(TokenSource::Exchanged)
    );
}

#[test]
fn reset_path_without_any_tokens_is_invalid_when_signed_out() {
    assert_eq!(resolve("/reset-password", "", false, RecoveryHold::None), NavigationIntent::InvalidRecovery);
}

#[test]
fn reset_path_without_tokens_falls_through_to_dashboard_when_signed_in() {
    assert_eq!(resolve("/reset-password", "", true, RecoveryHold::None), NavigationIntent::Dashboard);
    assert_eq!(
        resolve("/", "type=recovery&access_token=abc", true, RecoveryHold::None),
        NavigationIntent::Dashboard
    );
}

#[test]
fn signup_link_on_reset_path_is_still_a_confirmation() {
    assert_eq!(
        resolve("/reset-password", "token_hash=h1&type=signup", false, RecoveryHold::None),
        NavigationIntent::EmailConfirmation(OneTimeCode("token_hash=h1&type=signup".to_owned()))
    );
}

#[test]
fn recovery_type_without_tokens_is_invalid() {
    assert_eq!(
        resolve("/", "type=recovery&access_token=abc", false, RecoveryHold::None),
        NavigationIntent::InvalidRecovery
    );
}

#[test]
fn signup_link_resolves_to_confirmation_with_full_fragment() {
    let intent = resolve("/auth/callback", "#token_hash=xyz&type=signup", true, RecoveryHold::None);
    assert_eq!(
        intent,
        NavigationIntent::EmailConfirmation(OneTimeCode("token_hash=xyz&type=signup".to_owned()))
    );
}

#[test]
fn plain_urls_follow_session_presence() {
    assert_eq!(resolve("/", "", false, RecoveryHold::None), NavigationIntent::SignIn);
    assert_eq!(resolve("/", "", true, RecoveryHold::None), NavigationIntent::Dashboard);
    assert_eq!(resolve("/anything", "foo=bar", true, RecoveryHold::None), NavigationIntent::Dashboard);
    assert_eq!(resolve("/auth/callback", "", false, RecoveryHold::None), NavigationIntent::SignIn);
}

#[test]
fn intent_names_are_stable() {
    assert_eq!(NavigationIntent::SignIn.name(), "sign_in");
    assert_eq!(NavigationIntent::InvalidRecovery.name(), "invalid_recovery");
}
