use crate::fixtures::test_app::TestApp;
use serde_json::Value;

fn day(offset: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(offset)).to_string()
}

#[tokio::test]
async fn owner_creates_blackout() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = app
        .auth_post("/api/blackout", &house.owner.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(30),
            "end": day(35),
            "reason": "Dock repairs",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["reason"], "Dock repairs");
    assert_eq!(json["range"]["start"], day(30));
}

#[tokio::test]
async fn member_cannot_create_blackout() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = app
        .auth_post("/api/blackout", &house.member.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(30),
            "end": day(35),
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn blackout_blocks_booking_requests() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    app.auth_post("/api/blackout", &house.owner.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(30),
            "end": day(35),
        }))
        .send()
        .await
        .unwrap();

    let resp = app
        .auth_post("/api/booking", &house.member.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(33),
            "end": day(37),
            "guests": 2,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 409);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "dates_unavailable");
    assert_eq!(json["conflicts"][0]["kind"], "blackout");
}

#[tokio::test]
async fn deleting_a_blackout_frees_its_dates() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = app
        .auth_post("/api/blackout", &house.owner.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(30),
            "end": day(35),
        }))
        .send()
        .await
        .unwrap();
    let blackout: Value = resp.json().await.unwrap();
    let id = blackout["id"].as_str().unwrap();

    let resp = app
        .auth_delete(&format!("/api/blackout/{}", id), &house.owner.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app
        .auth_post("/api/booking", &house.member.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(33),
            "end": day(37),
            "guests": 2,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn member_cannot_delete_blackout() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = app
        .auth_post("/api/blackout", &house.owner.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(30),
            "end": day(35),
        }))
        .send()
        .await
        .unwrap();
    let blackout: Value = resp.json().await.unwrap();
    let id = blackout["id"].as_str().unwrap();

    let resp = app
        .auth_delete(&format!("/api/blackout/{}", id), &house.member.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn deleting_unknown_blackout_is_not_found() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = app
        .auth_delete(
            &format!("/api/blackout/{}", bson::oid::ObjectId::new().to_hex()),
            &house.owner.access_token,
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn blackout_with_backwards_range_is_rejected() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    let resp = app
        .auth_post("/api/blackout", &house.owner.access_token)
        .json(&serde_json::json!({
            "listing_id": house.listing_id,
            "start": day(35),
            "end": day(30),
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn blackouts_are_listed_for_the_listing() {
    let app = TestApp::spawn().await;
    let house = app.seed_house().await;

    for (start, end) in [(30, 35), (40, 42)] {
        app.auth_post("/api/blackout", &house.owner.access_token)
            .json(&serde_json::json!({
                "listing_id": house.listing_id,
                "start": day(start),
                "end": day(end),
            }))
            .send()
            .await
            .unwrap();
    }

    let resp = app
        .auth_get(
            &format!("/api/listing/{}/blackout", house.listing_id),
            &house.member.access_token,
        )
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let blackouts: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(blackouts.len(), 2);
    // Sorted by start date
    assert_eq!(blackouts[0]["range"]["start"], day(30));
}
