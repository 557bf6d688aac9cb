use chrono::{Duration, Utc};
use quizdash_lib::error::SessionError;
use quizdash_lib::session::{
    CredentialProvider, Role, Session, SessionStore, StaticCredentialProvider,
};

#[tokio::test]
async fn login_to_logout_lifecycle() {
    let store = SessionStore::new();
    assert!(!store.is_authenticated().await);
    assert!(store.current().await.is_none());

    store.install(Session::new("tok-1", Role::Admin)).await;
    assert!(store.is_authenticated().await);
    let session = store.require().await.unwrap();
    assert_eq!(session.token(), "tok-1");
    assert_eq!(session.role(), Role::Admin);
    assert!(session.issued_at() <= Utc::now());
    assert_ne!(
        session.id(),
        Session::new("tok-2", Role::Admin).id(),
        "each session gets its own id"
    );

    store.revoke().await;
    assert!(!store.is_authenticated().await);
    assert!(matches!(
        store.require().await,
        Err(SessionError::Missing)
    ));
}

#[tokio::test]
async fn clones_share_the_session() {
    let store = SessionStore::new();
    let clone = store.clone();

    store.install(Session::new("tok", Role::Student)).await;
    assert!(clone.is_authenticated().await);

    clone.revoke().await;
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn missing_session_sends_no_credential() {
    let store = SessionStore::new();
    assert_eq!(store.credentials().await.unwrap(), None);
}

#[tokio::test]
async fn valid_session_yields_its_token() {
    let store = SessionStore::new();
    store
        .install(Session::with_expiry(
            "tok",
            Role::Instructor,
            Utc::now() + Duration::hours(1),
        ))
        .await;
    assert_eq!(store.credentials().await.unwrap(), Some("tok".to_string()));
}

#[tokio::test]
async fn expired_session_is_an_error_not_a_credential() {
    let store = SessionStore::new();
    store
        .install(Session::with_expiry(
            "tok",
            Role::Instructor,
            Utc::now() - Duration::minutes(1),
        ))
        .await;
    assert!(matches!(
        store.credentials().await,
        Err(SessionError::Expired)
    ));
}

#[tokio::test]
async fn static_provider_always_answers() {
    let provider = StaticCredentialProvider::new("service-token");
    assert_eq!(
        provider.credentials().await.unwrap(),
        Some("service-token".to_string())
    );
}

#[test]
fn expiry_helpers() {
    let soon = Session::with_expiry("tok", Role::Student, Utc::now() + Duration::minutes(2));
    assert!(!soon.is_expired());
    assert!(soon.expires_within(Duration::minutes(5)));
    assert!(!soon.expires_within(Duration::seconds(10)));

    let open_ended = Session::new("tok", Role::Student);
    assert!(!open_ended.is_expired());
    assert!(!open_ended.expires_within(Duration::days(365)));
}

#[test]
fn role_serde_matches_backend_casing() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
    let role: Role = serde_json::from_str(r#""INSTRUCTOR""#).unwrap();
    assert_eq!(role, Role::Instructor);
}
