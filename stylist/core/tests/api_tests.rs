// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP API tests driven through `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use vibecraft_core::application::outfit_service::StandardOutfitService;
use vibecraft_core::application::wardrobe_service::StandardWardrobeService;
use vibecraft_core::application::weather_service::WeatherService;
use vibecraft_core::domain::composer::OutfitComposer;
use vibecraft_core::domain::fallback_composer::FallbackComposer;
use vibecraft_core::infrastructure::{InMemoryOutfitRepository, InMemoryWardrobeRepository, LocalImageStore};
use vibecraft_core::presentation::{app, AppState};

const BOUNDARY: &str = "vibecraft-test-boundary";
const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

fn router(uploads: &tempfile::TempDir) -> Router {
    let wardrobe_repo = Arc::new(InMemoryWardrobeRepository::new());

    app(AppState {
        wardrobe: Arc::new(StandardWardrobeService::new(
            wardrobe_repo.clone(),
            Arc::new(LocalImageStore::new(uploads.path())),
            None,
        )),
        outfits: Arc::new(StandardOutfitService::new(
            Arc::new(OutfitComposer::new(None, FallbackComposer::seeded(2))),
            Arc::new(InMemoryOutfitRepository::new()),
            wardrobe_repo,
        )),
        weather: WeatherService::new(None),
        uploads_dir: uploads.path().to_path_buf(),
        max_upload_bytes: MAX_UPLOAD_BYTES,
    })
}

fn multipart_upload(file_name: &str, mime: &str, category: Option<&str>) -> Request<Body> {
    multipart_upload_bytes(file_name, mime, category, &[0x89, 0x50, 0x4e, 0x47])
}

fn multipart_upload_bytes(
    file_name: &str,
    mime: &str,
    category: Option<&str>,
    image: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    if let Some(category) = category {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"category\"\r\n\r\n{category}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/wardrobe/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let uploads = tempfile::tempdir().unwrap();
    let (status, body) = send(&router(&uploads), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "message": "VibeCraft API running"}));
}

#[tokio::test]
async fn test_upload_then_fetch_and_serve_image() {
    let uploads = tempfile::tempdir().unwrap();
    let router = router(&uploads);

    let (status, item) = send(&router, multipart_upload("coat.png", "image/png", Some("outerwear"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["category"], "outerwear");
    assert_eq!(item["subcategory"], "unknown");
    assert_eq!(item["style"], "casual");

    let id = item["id"].as_str().unwrap().to_string();
    let (status, fetched) = send(&router, get(&format!("/api/wardrobe/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, item);

    let image_path = item["imagePath"].as_str().unwrap();
    let response = router.clone().oneshot(get(image_path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_limit_applies_to_the_image() {
    let uploads = tempfile::tempdir().unwrap();
    let router = router(&uploads);

    let at_limit = vec![0u8; MAX_UPLOAD_BYTES];
    let (status, item) = send(
        &router,
        multipart_upload_bytes("a.png", "image/png", Some("top"), &at_limit),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["category"], "top");

    let one_over = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let (status, body) = send(
        &router,
        multipart_upload_bytes("b.png", "image/png", None, &one_over),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());

    let far_over = vec![0u8; MAX_UPLOAD_BYTES * 2];
    let (status, _) = send(
        &router,
        multipart_upload_bytes("c.png", "image/png", None, &far_over),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (_, items) = send(&router, get("/api/wardrobe")).await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_rejects_bad_input() {
    let uploads = tempfile::tempdir().unwrap();
    let router = router(&uploads);

    let (status, body) = send(&router, multipart_upload("clip.gif", "image/gif", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&router, multipart_upload("hat.png", "image/png", Some("hat"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, items) = send(&router, get("/api/wardrobe")).await;
    assert_eq!(items, json!([]));
}

#[tokio::test]
async fn test_update_and_delete_item() {
    let uploads = tempfile::tempdir().unwrap();
    let router = router(&uploads);
    let (_, item) = send(&router, multipart_upload("tee.png", "image/png", None)).await;
    let uri = format!("/api/wardrobe/{}", item["id"].as_str().unwrap());

    let (status, updated) = send(
        &router,
        json_request("PUT", &uri, json!({"colors": ["red", "white"], "style": "sporty"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], item["id"]);
    assert_eq!(updated["colors"], json!(["red", "white"]));
    assert_eq!(updated["style"], "sporty");

    let delete = Request::builder().method("DELETE").uri(&uri).body(Body::empty()).unwrap();
    let (status, body) = send(&router, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Item deleted"}));

    let (status, body) = send(&router, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Item not found"}));
}

#[tokio::test]
async fn test_generate_outfits() {
    let uploads = tempfile::tempdir().unwrap();
    let router = router(&uploads);

    let (status, body) = send(
        &router,
        json_request("POST", "/api/outfits/generate", json!({"wardrobeItems": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let wardrobe = json!([
        {"id": "item-a", "category": "top", "style": "casual"},
        {"id": "item-b", "category": "bottom", "style": "casual"}
    ]);
    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/outfits/generate",
            json!({"wardrobeItems": wardrobe, "occasion": "work"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let outfits = body["outfits"].as_array().unwrap();
    assert_eq!(outfits.len(), 3);
    assert_eq!(outfits[0]["itemIds"], json!(["item-a", "item-b"]));
}

#[tokio::test]
async fn test_saved_outfit_lifecycle() {
    let uploads = tempfile::tempdir().unwrap();
    let router = router(&uploads);

    let (status, saved) = send(
        &router,
        json_request("POST", "/api/outfits/save", json!({"items": ["item-gone"], "occasion": "date"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["name"], "Outfit 1");
    let id = saved["id"].as_str().unwrap().to_string();

    let (_, listed) = send(&router, get("/api/outfits/saved")).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, resolved) = send(&router, get(&format!("/api/outfits/saved/{}/items", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved, json!([{"status": "removed", "id": "item-gone"}]));

    let uri = format!("/api/outfits/saved/{}", id);
    let delete = || Request::builder().method("DELETE").uri(&uri).body(Body::empty()).unwrap();
    let (status, body) = send(&router, delete()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Outfit deleted"}));

    let (status, _) = send(&router, delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_weather_without_provider_is_neutral() {
    let uploads = tempfile::tempdir().unwrap();
    let (status, body) = send(&router(&uploads), get("/api/weather/Berlin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "city": "Berlin",
            "temp": 22,
            "condition": "sunny",
            "humidity": 45,
            "recommendation": "light layers recommended"
        })
    );
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let uploads = tempfile::tempdir().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/outfits/save")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&router(&uploads), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
