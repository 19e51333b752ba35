//! Integration tests for module contents: create, update, resolve and reorder.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_module, create_text, delete, get, instructor_token, post_json, post_raw,
    put_json, seed, student_token,
};
use serde_json::{json, Value};

async fn orders(app: &axum::Router, token: &str, module_id: i64) -> Vec<(i64, i64)> {
    let uri = format!("/api/v1/modules/{module_id}/contents");
    let json = body_json(get(app, &uri, Some(token)).await).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["id"].as_i64().unwrap(), c["order"].as_i64().unwrap()))
        .collect()
}

fn id_of(content: &Value) -> i64 {
    content["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: Creating content appends and resolves the payload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_content_appends_in_order() {
    let s = seed().await;
    let first = create_text(&s.app, &s.instructor, s.module_id, "Welcome").await;
    let second = create_text(&s.app, &s.instructor, s.module_id, "Dot products").await;

    assert_eq!(first["order"], 1);
    assert_eq!(second["order"], 2);
    assert_eq!(first["kind"], "text");
    assert_eq!(first["render_key"], "text");
    assert_eq!(first["item"]["text"], "Welcome");

    assert_eq!(
        orders(&s.app, &s.instructor, s.module_id).await,
        vec![(id_of(&first), 1), (id_of(&second), 2)]
    );
}

#[tokio::test]
async fn create_content_with_explicit_order() {
    let s = seed().await;
    let uri = format!("/api/v1/modules/{}/contents/video", s.module_id);
    let body = json!({ "title": "Lecture", "url": "https://videos.example.com/1", "order": 5 });

    let response = post_json(&s.app, &uri, Some(&s.instructor), body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["order"], 5);
    assert_eq!(json["data"]["render_key"], "video");
    assert_eq!(json["data"]["item"]["url"], "https://videos.example.com/1");

    let clash = post_json(&s.app, &uri, Some(&s.instructor), body).await;
    assert_eq!(clash.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn append_after_highest_order_conflicts() {
    let s = seed().await;
    let uri = format!("/api/v1/modules/{}/contents/text", s.module_id);
    let top = json!({ "title": "Last", "text": "last", "order": i32::MAX });
    let response = post_json(&s.app, &uri, Some(&s.instructor), top).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        &s.app,
        &uri,
        Some(&s.instructor),
        json!({ "title": "Next", "text": "next" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(orders(&s.app, &s.instructor, s.module_id).await.len(), 1);
}

#[tokio::test]
async fn model_name_is_accepted_as_kind() {
    let s = seed().await;
    let uri = format!("/api/v1/modules/{}/contents/filecontent", s.module_id);
    let response = post_json(
        &s.app,
        &uri,
        Some(&s.instructor),
        json!({ "title": "Slides", "file": "files/week1/slides.pdf" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "file");
    assert_eq!(json["data"]["render_data"]["filename"], "slides.pdf");
    assert_eq!(json["data"]["render_data"]["extension"], "pdf");
}

#[tokio::test]
async fn unknown_kind_returns_404() {
    let s = seed().await;
    let uri = format!("/api/v1/modules/{}/contents/audio", s.module_id);
    let response = post_json(&s.app, &uri, Some(&s.instructor), json!({ "title": "x" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Unknown content kind: audio");
}

// ---------------------------------------------------------------------------
// Test: Invalid payloads report every failing field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_payload_reports_fields() {
    let s = seed().await;

    let video = post_json(
        &s.app,
        &format!("/api/v1/modules/{}/contents/video", s.module_id),
        Some(&s.instructor),
        json!({ "title": "Broken", "url": "not a url" }),
    )
    .await;
    assert_eq!(video.status(), StatusCode::BAD_REQUEST);
    let json = body_json(video).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["url"].is_array());

    let text = post_json(
        &s.app,
        &format!("/api/v1/modules/{}/contents/text", s.module_id),
        Some(&s.instructor),
        json!({ "title": "Missing body" }),
    )
    .await;
    assert_eq!(text.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(text).await["fields"]["text"].is_array());

    assert!(orders(&s.app, &s.instructor, s.module_id).await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Content management is owner-only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_owners_cannot_manage_content() {
    let s = seed().await;
    let content = create_text(&s.app, &s.instructor, s.module_id, "Welcome").await;
    let stranger = instructor_token(2);
    let student = student_token(50);

    let create = post_json(
        &s.app,
        &format!("/api/v1/modules/{}/contents/text", s.module_id),
        Some(&stranger),
        json!({ "title": "Spam", "text": "spam" }),
    )
    .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);

    let list_uri = format!("/api/v1/modules/{}/contents", s.module_id);
    assert_eq!(get(&s.app, &list_uri, Some(&student)).await.status(), StatusCode::FORBIDDEN);

    let item_uri = format!("/api/v1/contents/{}", id_of(&content));
    assert_eq!(get(&s.app, &item_uri, Some(&stranger)).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(delete(&s.app, &item_uri, Some(&stranger)).await.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Test: Update keeps kind and module fixed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_content_in_place() {
    let s = seed().await;
    let content = create_text(&s.app, &s.instructor, s.module_id, "Welcome").await;
    let uri = format!(
        "/api/v1/modules/{}/contents/text/{}",
        s.module_id,
        id_of(&content)
    );

    let response = put_json(
        &s.app,
        &uri,
        Some(&s.instructor),
        json!({ "title": "Welcome!", "text": "Hello there" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Welcome!");
    assert_eq!(json["data"]["item"]["text"], "Hello there");
    assert_eq!(json["data"]["item_id"], content["item_id"]);
    assert_eq!(json["data"]["order"], 1);
}

#[tokio::test]
async fn update_with_other_kind_or_module_conflicts() {
    let s = seed().await;
    let content = create_text(&s.app, &s.instructor, s.module_id, "Welcome").await;
    let other_module = create_module(&s.app, &s.instructor, s.course_id, "Matrices").await;

    let as_video = put_json(
        &s.app,
        &format!("/api/v1/modules/{}/contents/video/{}", s.module_id, id_of(&content)),
        Some(&s.instructor),
        json!({ "url": "https://videos.example.com/2" }),
    )
    .await;
    assert_eq!(as_video.status(), StatusCode::CONFLICT);

    let moved = put_json(
        &s.app,
        &format!("/api/v1/modules/{other_module}/contents/text/{}", id_of(&content)),
        Some(&s.instructor),
        json!({ "text": "Moved" }),
    )
    .await;
    assert_eq!(moved.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: Fetch and delete a single content item
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_and_delete_content() {
    let s = seed().await;
    let content = create_text(&s.app, &s.instructor, s.module_id, "Welcome").await;
    let uri = format!("/api/v1/contents/{}", id_of(&content));

    let fetched = get(&s.app, &uri, Some(&s.instructor)).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["data"]["render_key"], "text");

    let removed = delete(&s.app, &uri, Some(&s.instructor)).await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    assert!(orders(&s.app, &s.instructor, s.module_id).await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Reorder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reorder_swaps_positions() {
    let s = seed().await;
    let a = id_of(&create_text(&s.app, &s.instructor, s.module_id, "A").await);
    let b = id_of(&create_text(&s.app, &s.instructor, s.module_id, "B").await);
    let uri = format!("/api/v1/modules/{}/contents/order", s.module_id);

    let response = post_json(
        &s.app,
        &uri,
        Some(&s.instructor),
        json!([{ "id": a, "order": 2 }, { "id": b, "order": 1 }]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Content order updated successfully");
    assert_eq!(
        orders(&s.app, &s.instructor, s.module_id).await,
        vec![(b, 1), (a, 2)]
    );
}

#[tokio::test]
async fn reorder_rejects_malformed_bodies() {
    let s = seed().await;
    let a = id_of(&create_text(&s.app, &s.instructor, s.module_id, "A").await);
    let uri = format!("/api/v1/modules/{}/contents/order", s.module_id);

    let garbage = post_raw(&s.app, &uri, Some(&s.instructor), "{not json").await;
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(garbage).await["error"], "Invalid JSON data");

    let missing = post_raw(&s.app, &uri, Some(&s.instructor), &format!(r#"[{{"id": {a}}}]"#)).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(missing).await["error"], "Missing ID or order in payload");

    assert_eq!(orders(&s.app, &s.instructor, s.module_id).await, vec![(a, 1)]);
}

#[tokio::test]
async fn reorder_with_foreign_content_changes_nothing() {
    let s = seed().await;
    let a = id_of(&create_text(&s.app, &s.instructor, s.module_id, "A").await);
    let b = id_of(&create_text(&s.app, &s.instructor, s.module_id, "B").await);
    let other_module = create_module(&s.app, &s.instructor, s.course_id, "Matrices").await;
    let foreign = id_of(&create_text(&s.app, &s.instructor, other_module, "C").await);

    let response = post_json(
        &s.app,
        &format!("/api/v1/modules/{}/contents/order", s.module_id),
        Some(&s.instructor),
        json!([{ "id": a, "order": 3 }, { "id": foreign, "order": 1 }]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        orders(&s.app, &s.instructor, s.module_id).await,
        vec![(a, 1), (b, 2)]
    );
    assert_eq!(
        orders(&s.app, &s.instructor, other_module).await,
        vec![(foreign, 1)]
    );
}

#[tokio::test]
async fn reorder_rejects_colliding_positions() {
    let s = seed().await;
    let a = id_of(&create_text(&s.app, &s.instructor, s.module_id, "A").await);
    let b = id_of(&create_text(&s.app, &s.instructor, s.module_id, "B").await);

    let response = post_json(
        &s.app,
        &format!("/api/v1/modules/{}/contents/order", s.module_id),
        Some(&s.instructor),
        json!([{ "id": a, "order": 2 }]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        orders(&s.app, &s.instructor, s.module_id).await,
        vec![(a, 1), (b, 2)]
    );
}

#[tokio::test]
async fn reorder_by_stranger_is_denied_before_parsing() {
    let s = seed().await;
    let stranger = instructor_token(2);
    let uri = format!("/api/v1/modules/{}/contents/order", s.module_id);

    let response = post_raw(&s.app, &uri, Some(&stranger), "{not json").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let anonymous = post_raw(&s.app, &uri, None, "[]").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}
