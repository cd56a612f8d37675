use crate::fixtures::test_app::TestApp;
use lakehouse_db::models::Role;
use serde_json::Value;

#[tokio::test]
async fn login_returns_profile_and_tokens() {
    let app = TestApp::spawn().await;
    app.seed_profile("alice@lake.test", "Alice", Role::Owner, "Password123!")
        .await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "alice@lake.test",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);

    let json: Value = resp.json().await.unwrap();
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["profile"]["email"], "alice@lake.test");
    assert_eq!(json["profile"]["role"], "owner");
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = TestApp::spawn().await;
    app.seed_profile("bob@lake.test", "Bob", Role::Family, "Password123!")
        .await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "bob@lake.test",
            "password": "wrong-password",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn login_with_unknown_email_is_rejected() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "nobody@lake.test",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn me_returns_current_profile() {
    let app = TestApp::spawn().await;
    app.seed_profile("carol@lake.test", "Carol", Role::Family, "Password123!")
        .await;
    let carol = app.login_user("carol@lake.test", "Password123!").await;

    let resp = app
        .auth_get("/api/auth/me", &carol.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["email"], "carol@lake.test");
    assert_eq!(json["full_name"], "Carol");
    assert_eq!(json["role"], "family");
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/api/auth/me")).send().await.unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
async fn refresh_issues_new_tokens() {
    let app = TestApp::spawn().await;
    app.seed_profile("dave@lake.test", "Dave", Role::Family, "Password123!")
        .await;
    let dave = app.login_user("dave@lake.test", "Password123!").await;

    let resp = app
        .client
        .post(app.url("/api/auth/refresh"))
        .json(&serde_json::json!({ "refresh_token": dave.refresh_token }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);

    let json: Value = resp.json().await.unwrap();
    assert!(json["access_token"].is_string());
    assert_eq!(json["profile"]["email"], "dave@lake.test");
}

#[tokio::test]
async fn access_token_cannot_be_used_as_refresh_token() {
    let app = TestApp::spawn().await;
    app.seed_profile("erin@lake.test", "Erin", Role::Family, "Password123!")
        .await;
    let erin = app.login_user("erin@lake.test", "Password123!").await;

    let resp = app
        .client
        .post(app.url("/api/auth/refresh"))
        .json(&serde_json::json!({ "refresh_token": erin.access_token }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}
