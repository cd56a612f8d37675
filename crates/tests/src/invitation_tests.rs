use bson::doc;
use crate::fixtures::test_app::TestApp;
use serde_json::Value;

async fn invite(app: &TestApp, token: &str, email: &str, full_name: &str) -> reqwest::Response {
    app.auth_post("/api/invitation", token)
        .json(&serde_json::json!({
            "email": email,
            "full_name": full_name,
        }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn owner_creates_invitation() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["email"], "new@lake.test");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["inviter_name"], "Olive Owner");
    // 32 random bytes, hex encoded
    assert_eq!(json["token"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn member_cannot_invite() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.member.access_token, "new@lake.test", "Nina New").await;

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn duplicate_pending_invite_is_a_conflict() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;
    assert_eq!(resp.status().as_u16(), 409);
}

#[tokio::test]
async fn inviting_an_existing_account_is_rejected() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(
        &app,
        &house.owner.access_token,
        &house.member.email,
        "Frank Again",
    )
    .await;

    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "not-an-email", "Nina New").await;

    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "  ").await;

    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn validate_shows_invitee_details() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;
    let invitation: Value = resp.json().await.unwrap();
    let token = invitation["token"].as_str().unwrap();

    // No auth: the invitee does not have an account yet
    let resp = app
        .client
        .get(app.url(&format!("/api/invitation/token/{}", token)))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["email"], "new@lake.test");
    assert_eq!(json["full_name"], "Nina New");
    assert_eq!(json["inviter_name"], "Olive Owner");
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let app = TestApp::spawn().await;
    app.seed_house().await;

    let resp = app
        .client
        .get(app.url("/api/invitation/token/deadbeef"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn accepted_invitee_can_login() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let nina = app
        .invite_and_accept(
            &house.owner.access_token,
            "new@lake.test",
            "Nina New",
            "Nina1234!",
        )
        .await;
    assert!(!nina.access_token.is_empty());

    let nina = app.login_user("new@lake.test", "Nina1234!").await;

    let resp = app
        .auth_get("/api/auth/me", &nina.access_token)
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["role"], "family");
    assert_eq!(json["full_name"], "Nina New");
}

#[tokio::test]
async fn accepting_twice_is_a_conflict() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;
    let invitation: Value = resp.json().await.unwrap();
    let token = invitation["token"].as_str().unwrap().to_string();

    let accept_url = app.url(&format!("/api/invitation/token/{}/accept", token));
    let resp = app
        .client
        .post(&accept_url)
        .json(&serde_json::json!({ "password": "Nina1234!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app
        .client
        .post(&accept_url)
        .json(&serde_json::json!({ "password": "Other1234!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);
}

#[tokio::test]
async fn short_password_is_rejected_on_accept() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;
    let invitation: Value = resp.json().await.unwrap();
    let token = invitation["token"].as_str().unwrap();

    let resp = app
        .client
        .post(app.url(&format!("/api/invitation/token/{}/accept", token)))
        .json(&serde_json::json!({ "password": "short" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn expired_invitation_is_rejected_and_marked() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "late@lake.test", "Larry Late").await;
    let invitation: Value = resp.json().await.unwrap();
    let token = invitation["token"].as_str().unwrap().to_string();

    // Backdate the expiry past the 7 day window
    let expired = bson::DateTime::from_chrono(chrono::Utc::now() - chrono::Duration::days(8));
    app.db
        .collection::<bson::Document>("invitations")
        .update_one(
            doc! { "token": &token },
            doc! { "$set": { "expires_at": expired } },
        )
        .await
        .unwrap();

    let resp = app
        .client
        .get(app.url(&format!("/api/invitation/token/{}", token)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    // Expiry is recorded at resolution time
    let stored = app
        .db
        .collection::<bson::Document>("invitations")
        .find_one(doc! { "token": &token })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.get_str("status").unwrap(), "expired");

    // Accepting an expired invitation fails the same way
    let resp = app
        .client
        .post(app.url(&format!("/api/invitation/token/{}/accept", token)))
        .json(&serde_json::json!({ "password": "Late1234!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn failed_accept_leaves_no_profile_behind() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "late@lake.test", "Larry Late").await;
    let invitation: Value = resp.json().await.unwrap();
    let token = invitation["token"].as_str().unwrap().to_string();

    let expired = bson::DateTime::from_chrono(chrono::Utc::now() - chrono::Duration::days(8));
    app.db
        .collection::<bson::Document>("invitations")
        .update_one(
            doc! { "token": &token },
            doc! { "$set": { "expires_at": expired } },
        )
        .await
        .unwrap();

    let resp = app
        .client
        .post(app.url(&format!("/api/invitation/token/{}/accept", token)))
        .json(&serde_json::json!({ "password": "Late1234!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    // No account may exist for an invitation that was never redeemed
    let orphan = app
        .db
        .collection::<bson::Document>("profiles")
        .find_one(doc! { "email": "late@lake.test" })
        .await
        .unwrap();
    assert!(orphan.is_none());
}

#[tokio::test]
async fn expired_email_can_be_invited_again() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "late@lake.test", "Larry Late").await;
    let invitation: Value = resp.json().await.unwrap();
    let token = invitation["token"].as_str().unwrap().to_string();

    let expired = bson::DateTime::from_chrono(chrono::Utc::now() - chrono::Duration::days(8));
    app.db
        .collection::<bson::Document>("invitations")
        .update_one(
            doc! { "token": &token },
            doc! { "$set": { "expires_at": expired } },
        )
        .await
        .unwrap();

    // Resolving flips the stale invitation to expired, clearing the way
    app.client
        .get(app.url(&format!("/api/invitation/token/{}", token)))
        .send()
        .await
        .unwrap();

    let resp = invite(&app, &house.owner.access_token, "late@lake.test", "Larry Late").await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn owner_cancels_invitation() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;
    let invitation: Value = resp.json().await.unwrap();
    let id = invitation["id"].as_str().unwrap();
    let token = invitation["token"].as_str().unwrap().to_string();

    let resp = app
        .auth_delete(&format!("/api/invitation/{}", id), &house.owner.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    // A cancelled invitation is gone, not just disabled
    let resp = app
        .client
        .get(app.url(&format!("/api/invitation/token/{}", token)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn member_cannot_cancel_invitation() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = invite(&app, &house.owner.access_token, "new@lake.test", "Nina New").await;
    let invitation: Value = resp.json().await.unwrap();
    let id = invitation["id"].as_str().unwrap();

    let resp = app
        .auth_delete(&format!("/api/invitation/{}", id), &house.member.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn pending_invitations_are_listed_for_owner() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    invite(&app, &house.owner.access_token, "one@lake.test", "One").await;
    invite(&app, &house.owner.access_token, "two@lake.test", "Two").await;

    let resp = app
        .auth_get("/api/invitation", &house.owner.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let invitations: Vec<Value> = resp.json().await.unwrap();
    // The seed house's accepted invitation is not pending anymore
    assert_eq!(invitations.len(), 2);
}
