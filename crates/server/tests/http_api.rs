use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use service::banner::{repo::InMemoryBannerRepository, repository::mock::UnavailableBannerRepository, BannerRepository};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::{routes::build_router, ServerState};

fn app_with(repo: Arc<dyn BannerRepository>) -> Router {
    build_router(ServerState::new(repo), CorsLayer::very_permissive())
}

fn app() -> Router {
    app_with(Arc::new(InMemoryBannerRepository::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

fn banner(title: &str, status: &str) -> Value {
    json!({ "title": title, "image": format!("{title}.png"), "link": format!("/{title}"), "status": status })
}

#[tokio::test]
async fn health_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn active_banner_is_null_when_nothing_is_active() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/banners/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "activeBanner": null }));

    send(&app, Method::POST, "/admin/banners", Some(banner("Draft", "Draft"))).await;
    let (_, body) = send(&app, Method::GET, "/api/banners/active", None).await;
    assert_eq!(body, json!({ "activeBanner": null }));
}

#[tokio::test]
async fn create_requires_all_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/admin/banners",
        Some(json!({ "title": "Summer", "image": "s.png", "link": "/summer" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Validation Error", "detail": "All fields are required" }));

    let (status, _) = send(&app, Method::POST, "/admin/banners", Some(banner("", "Active"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/admin/banners", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let (status, body) = send(&app(), Method::POST, "/admin/banners", Some(banner("Summer", "Archived"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
}

#[tokio::test]
async fn promoting_winter_demotes_summer() {
    let app = app();
    let (status, summer) = send(&app, Method::POST, "/admin/banners", Some(banner("Summer", "Active"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(summer["status"], "Active");
    let (_, winter) = send(&app, Method::POST, "/admin/banners", Some(banner("Winter", "Draft"))).await;

    let uri = format!("/admin/banners/{}", winter["id"].as_str().unwrap());
    let (status, updated) = send(&app, Method::PUT, &uri, Some(banner("Winter", "Active"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Active");

    let (_, active) = send(&app, Method::GET, "/api/banners/active", None).await;
    assert_eq!(active["activeBanner"]["id"], winter["id"]);
    assert_eq!(active["activeBanner"]["title"], "Winter");

    let summer_uri = format!("/admin/banners/{}", summer["id"].as_str().unwrap());
    let (_, summer_now) = send(&app, Method::GET, &summer_uri, None).await;
    assert_eq!(summer_now["status"], "Draft");

    let (_, list) = send(&app, Method::GET, "/admin/banners", None).await;
    let active_count = list.as_array().unwrap().iter().filter(|b| b["status"] == "Active").count();
    assert_eq!(active_count, 1);
}

#[tokio::test]
async fn patch_updates_only_supplied_fields() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/admin/banners", Some(banner("Spring", "Draft"))).await;
    let uri = format!("/admin/banners/{}", created["id"].as_str().unwrap());

    let (status, patched) = send(&app, Method::PATCH, &uri, Some(json!({ "link": "/spring-sale" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["link"], "/spring-sale");
    assert_eq!(patched["title"], "Spring");
    assert_eq!(patched["status"], "Draft");
}

#[tokio::test]
async fn unknown_ids_are_404() {
    let app = app();
    let uri = format!("/admin/banners/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");

    let (status, _) = send(&app, Method::PUT, &uri, Some(banner("Ghost", "Active"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/admin/banners/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_active_banner_clears_storefront() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/admin/banners", Some(banner("Flash", "Active"))).await;
    let uri = format!("/admin/banners/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, active) = send(&app, Method::GET, "/api/banners/active", None).await;
    assert_eq!(active, json!({ "activeBanner": null }));
}

#[tokio::test]
async fn storage_outage_degrades_storefront_but_fails_admin() {
    let app = app_with(Arc::new(UnavailableBannerRepository));

    let (status, body) = send(&app, Method::GET, "/api/banners/active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "activeBanner": null }));

    let (status, body) = send(&app, Method::GET, "/admin/banners", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Storage Error");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/admin/banners")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_and_openapi_are_exposed() {
    let app = app();
    send(&app, Method::GET, "/api/banners/active", None).await;

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(text.contains("checkout_banners_active_reads_total"));

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/banners/active").is_some());
    assert!(doc["paths"].get("/admin/banners/{id}").is_some());
}
