mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};

use common::{TestApp, build_test_app};

fn listing_form(app: &TestApp) -> Value {
    json!({
        "title": "Music video for a techno single",
        "description": "Looking for an experienced filmmaker",
        "city_id": app.city("Berlin"),
        "job_id": app.job("Filmmaker"),
    })
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn guest_cannot_create_a_listing() {
    let app = build_test_app();
    let form = listing_form(&app);

    let (status, body) = app.post("/listings", None, form).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthenticated.");
    assert_eq!(app.count("listings"), 0);
}

#[tokio::test]
async fn guest_with_invalid_body_is_unauthenticated() {
    let app = build_test_app();

    let (status, body) = app.post("/listings", None, json!({ "title": "x" })).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthenticated.");
    assert_eq!(app.count("listings"), 0);
}

#[tokio::test]
async fn guest_cannot_edit_or_delete_postings() {
    let app = build_test_app();
    let (_, poster) = app.user("poster");
    let form = listing_form(&app);

    for base in ["/listings", "/job-vacancies"] {
        let (_, posting) = app.post(base, Some(&poster), form.clone()).await;
        let uri = format!("{base}/{}", posting["id"]);

        let (status, body) = app.patch(&uri, None, json!({ "title": "Hijacked" })).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{base}");
        assert_eq!(body["message"], "Unauthenticated.");

        let (status, body) = app.delete(&uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{base}");
        assert_eq!(body["message"], "Unauthenticated.");

        let (status, body) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::OK, "{base}");
        assert_eq!(body["title"], posting["title"]);
        assert!(body["deleted_at"].is_null());
    }
}

#[tokio::test]
async fn bad_filter_uses_the_error_body() {
    let app = build_test_app();

    let (status, body) = app.get("/listings?city_id=berlin", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn created_listing_has_server_defaults() {
    let app = build_test_app();
    let (me, token) = app.user("poster");
    let form = listing_form(&app);

    let (status, body) = app.post("/listings", Some(&token), form).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["posted_by"], me);
    assert_eq!(body["is_active"], true);
    assert!(body["deleted_at"].is_null());
    assert_eq!(body["slug"].as_str().map(str::len), Some(32));
}

#[tokio::test]
async fn conflicting_posted_by_is_unprocessable() {
    let app = build_test_app();
    let (_, token) = app.user("poster");
    let (other, _) = app.user("other");
    let mut form = listing_form(&app);
    form["posted_by"] = json!(other);

    let (status, _) = app.post("/listings", Some(&token), form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.count("listings"), 0);
}

#[tokio::test]
async fn unknown_city_is_unprocessable() {
    let app = build_test_app();
    let (_, token) = app.user("poster");
    let mut form = listing_form(&app);
    form["city_id"] = json!(404);

    let (status, body) = app.post("/listings", Some(&token), form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "CONSTRAINT_VIOLATION");
}

#[tokio::test]
async fn only_poster_can_edit_or_delete() {
    let app = build_test_app();
    let (_, poster) = app.user("poster");
    let (_, stranger) = app.user("stranger");
    let form = listing_form(&app);

    let (_, listing) = app.post("/listings", Some(&poster), form).await;
    let uri = format!("/listings/{}", listing["id"]);

    let (status, body) = app.patch(&uri, Some(&stranger), json!({ "title": "Hijacked" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized action.");

    let (status, body) = app.delete(&uri, Some(&stranger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized action.");

    let (status, body) = app.patch(&uri, Some(&poster), json!({ "title": "Here is a New Title" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Here is a New Title");
    assert_eq!(body["slug"], listing["slug"]);
}

#[tokio::test]
async fn deleted_listing_disappears_for_everyone_else() {
    let app = build_test_app();
    let (_, poster) = app.user("poster");
    let (_, stranger) = app.user("stranger");
    let form = listing_form(&app);

    let (_, listing) = app.post("/listings", Some(&poster), form).await;
    let uri = format!("/listings/{}", listing["id"]);

    let (status, body) = app.delete(&uri, Some(&poster)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (status, _) = app.get(&uri, Some(&stranger)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get(&uri, Some(&poster)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["deleted_at"].is_null());

    let (status, body) = app.get("/listings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    assert_eq!(app.count("listings"), 1);
}

#[tokio::test]
async fn listing_filters_apply() {
    let app = build_test_app();
    let (_, poster) = app.user("poster");
    let form = listing_form(&app);
    let hamburg = app.city("Hamburg");

    let (_, berlin_listing) = app.post("/listings", Some(&poster), form.clone()).await;
    let mut elsewhere = form;
    elsewhere["city_id"] = json!(hamburg);
    app.post("/listings", Some(&poster), elsewhere).await;

    let (status, body) = app
        .get(&format!("/listings?city_id={}", berlin_listing["city_id"]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], berlin_listing["id"]);
}

#[tokio::test]
async fn listing_skills_are_managed_by_poster() {
    let app = build_test_app();
    let (_, poster) = app.user("poster");
    let (_, stranger) = app.user("stranger");
    let form = listing_form(&app);

    let (_, skills) = app.get("/skills", None).await;
    let ids: Vec<Value> = skills.as_array().unwrap().iter().take(3).map(|s| s["id"].clone()).collect();

    let (_, listing) = app.post("/listings", Some(&poster), form).await;
    let uri = format!("/listings/{}/skills", listing["id"]);

    let (status, _) = app.post(&uri, Some(&stranger), json!({ "ids": ids })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.post(&uri, Some(&poster), json!({ "ids": ids })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["skills"].as_array().map(Vec::len), Some(3));

    let (_, detail) = app.get(&format!("/listings/{}", listing["id"]), None).await;
    assert_eq!(detail["skills"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn vacancy_closes_thirty_days_after_creation() {
    let app = build_test_app();
    let (_, poster) = app.user("poster");
    let form = listing_form(&app);

    let (status, vacancy) = app.post("/job-vacancies", Some(&poster), form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        timestamp(&vacancy["ends_at"]) - timestamp(&vacancy["created_at"]),
        Duration::days(30)
    );

    let (status, body) = app.get(&format!("/job-vacancies/{}", vacancy["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("skills").is_none());
}

#[tokio::test]
async fn listings_and_vacancies_do_not_mix() {
    let app = build_test_app();
    let (_, poster) = app.user("poster");
    let form = listing_form(&app);

    let (_, listing) = app.post("/listings", Some(&poster), form).await;

    let (status, body) = app.get(&format!("/job-vacancies/{}", listing["id"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("JobVacancy with id {} not found", listing["id"]));
}
