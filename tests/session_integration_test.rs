use httpmock::prelude::*;
use outfit_weather::core::session::{PendingOutcome, PENDING_OUTFIT_KEY, TOKEN_KEY};
use outfit_weather::domain::model::{NewOutfit, RecordId};
use outfit_weather::{ApiClient, AppError, LocalStorage, Session};
use tempfile::TempDir;

fn pending() -> NewOutfit {
    NewOutfit {
        image_url: "https://cdn.example/guest.jpg".to_string(),
        category: "dress".to_string(),
        color: "Unknown".to_string(),
        occasion: "Party".to_string(),
        notes: "Saved from outfit analysis".to_string(),
        confidence: 0.8,
    }
}

#[tokio::test]
async fn test_login_persists_token_and_flushes_pending_outfit() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let login_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/login")
            .body_contains("password=hunter2");
        then.status(200).json_body(serde_json::json!({
            "access_token": "fresh-token",
            "token_type": "bearer"
        }));
    });
    let save_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/wardrobe/save")
            .header("authorization", "Bearer fresh-token")
            .json_body_partial(r#"{"category": "dress", "occasion": "Party"}"#);
        then.status(200)
            .json_body(serde_json::json!({"outfit": {"id": 31}}));
    });

    let session = Session::new(LocalStorage::new(temp_dir.path()));
    session.stash_pending_outfit(&pending()).await.unwrap();

    let mut api = ApiClient::new(&server.base_url(), 5, "integration-test").unwrap();
    let outcome = session
        .login(&mut api, "guest@example.com", "hunter2")
        .await
        .unwrap();

    login_mock.assert();
    save_mock.assert();
    assert_eq!(outcome.pending, PendingOutcome::Saved(Some(RecordId::Int(31))));
    assert!(api.has_token());

    let token_file = std::fs::read_to_string(temp_dir.path().join(TOKEN_KEY)).unwrap();
    assert_eq!(token_file, "fresh-token");
    assert!(!temp_dir.path().join(PENDING_OUTFIT_KEY).exists());
}

#[tokio::test]
async fn test_failed_pending_save_keeps_outfit() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(200)
            .json_body(serde_json::json!({"access_token": "tok"}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/wardrobe/save");
        then.status(500)
            .json_body(serde_json::json!({"detail": "Database unavailable"}));
    });

    let session = Session::new(LocalStorage::new(temp_dir.path()));
    session.stash_pending_outfit(&pending()).await.unwrap();

    let mut api = ApiClient::new(&server.base_url(), 5, "integration-test").unwrap();
    let outcome = session.login(&mut api, "a@b.com", "pw").await.unwrap();

    assert_eq!(
        outcome.pending,
        PendingOutcome::Failed("Database unavailable".to_string())
    );
    assert_eq!(outcome.message(), "Welcome back! (Couldn't save pending outfit)");
    assert_eq!(session.pending_outfit().await.unwrap(), Some(pending()));
}

#[tokio::test]
async fn test_bad_credentials_store_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/auth/login");
        then.status(400)
            .json_body(serde_json::json!({"detail": "Incorrect email or password"}));
    });

    let session = Session::new(LocalStorage::new(temp_dir.path()));
    let mut api = ApiClient::new(&server.base_url(), 5, "integration-test").unwrap();
    let err = session.login(&mut api, "a@b.com", "nope").await.unwrap_err();

    assert_eq!(err.user_friendly_message(), "Incorrect email or password");
    assert!(!session.is_logged_in().await.unwrap());
    assert!(!api.has_token());
}

#[tokio::test]
async fn test_logout_clears_token() {
    let temp_dir = TempDir::new().unwrap();
    let session = Session::new(LocalStorage::new(temp_dir.path()));

    session.store_token("abc").await.unwrap();
    assert!(session.is_logged_in().await.unwrap());

    session.logout().await.unwrap();
    assert!(matches!(
        session.require_token().await,
        Err(AppError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_signup_validates_email() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let signup_mock = server.mock(|when, then| {
        when.method(POST).path("/auth/signup");
        then.status(201).json_body(serde_json::json!({"id": 1}));
    });

    let session = Session::new(LocalStorage::new(temp_dir.path()));
    let api = ApiClient::new(&server.base_url(), 5, "integration-test").unwrap();

    assert!(session.signup(&api, "not-an-email", "pw").await.is_err());
    signup_mock.assert_hits(0);

    session.signup(&api, "new@example.com", "pw").await.unwrap();
    signup_mock.assert();
}
