use axum::body::{self, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::ServerState;

fn app() -> Router {
    routes::build_router(ServerState::in_memory(), CorsLayer::very_permissive())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, json)
}

async fn create(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, Method::POST, "/api/v1/categories", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn create_returns_201_envelope() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/categories",
        Some(json!({ "name": "Rau củ quả", "description": "Các loại rau củ quả tươi", "displayOrder": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert!(body["timestamp"].is_string());
    assert!(body.get("path").is_none());
    assert!(body.get("errors").is_none());
    let data = &body["data"];
    assert_eq!(data["name"], "Rau củ quả");
    assert_eq!(data["displayOrder"], 2);
    assert_eq!(data["isActive"], true);
    assert_eq!(data["createdBy"], "SYSTEM");
}

#[tokio::test]
async fn validation_failure_returns_field_map() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/categories",
        Some(json!({ "name": "R", "description": "x".repeat(501) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["path"], "/api/v1/categories");
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["description"].is_string());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn malformed_json_and_ids_are_400() {
    let app = app();
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/categories")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::GET, "/api/v1/categories/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["path"], "/api/v1/categories/not-a-uuid");
}

#[tokio::test]
async fn duplicate_name_is_409() {
    let app = app();
    create(&app, "Thịt cá").await;
    let (status, body) = send(&app, Method::POST, "/api/v1/categories", Some(json!({ "name": "THỊT CÁ" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn unknown_id_is_404_with_path() {
    let app = app();
    let uri = format!("/api/v1/categories/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], uri);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn soft_delete_lifecycle() {
    let app = app();
    let data = create(&app, "Gia vị").await;
    let id = data["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());

    let (_, body) = send(&app, Method::GET, &format!("/api/v1/categories/{id}/exists"), None).await;
    assert_eq!(body["data"], true);
    let (_, body) = send(&app, Method::GET, "/api/v1/categories/exists?name=Gia%20v%E1%BB%8B", None).await;
    assert_eq!(body["data"], false);
    let (status, _) = send(&app, Method::GET, "/api/v1/categories/name/Gia%20v%E1%BB%8B", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, Method::GET, &format!("/api/v1/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, body) = send(&app, Method::PUT, &format!("/api/v1/categories/{id}/activate"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], true);
    let (_, body) = send(&app, Method::PUT, &format!("/api/v1/categories/{id}/deactivate"), None).await;
    assert_eq!(body["data"]["isActive"], false);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/v1/categories",
        Some(json!({ "name": "Sữa", "displayOrder": 5 })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/categories/{id}"),
        Some(json!({ "description": "Dairy" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Sữa");
    assert_eq!(body["data"]["displayOrder"], 5);
    assert_eq!(body["data"]["description"], "Dairy");
}

#[tokio::test]
async fn search_count_and_active_listing() {
    let app = app();
    for name in ["Rau củ quả", "Rau xanh", "Thịt cá"] {
        create(&app, name).await;
    }
    let (_, body) = send(&app, Method::GET, "/api/v1/categories/search?name=RAU", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, count) = send(&app, Method::GET, "/api/v1/categories/count/active", None).await;
    let (_, active) = send(&app, Method::GET, "/api/v1/categories/active", None).await;
    assert_eq!(count["data"], 3);
    assert_eq!(active["data"].as_array().unwrap().len(), 3);

    let (status, _) = send(&app, Method::GET, "/api/v1/categories/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_paginates_and_validates_sort() {
    let app = app();
    for name in ["Bánh", "Kẹo", "Mứt"] {
        create(&app, name).await;
    }
    let (status, body) = send(&app, Method::GET, "/api/v1/categories?page=0&size=2&sort=name,desc", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["page"], 0);
    assert_eq!(data["total"], 3);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["perPage"], 2);
    assert_eq!(data["items"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/api/v1/categories?size=1000", None).await;
    assert_eq!(body["data"]["perPage"], 100);
    assert_eq!(body["data"]["page"], 0);

    let (status, body) = send(&app, Method::GET, "/api/v1/categories?sort=price,asc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["path"], "/api/v1/categories");
}

#[tokio::test]
async fn page_zero_and_page_one_are_distinct() {
    let app = app();
    for name in ["Aa", "Bb", "Cc", "Dd"] {
        create(&app, name).await;
    }
    let names = |body: &Value| -> Vec<String> {
        body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect()
    };
    let (_, first) = send(&app, Method::GET, "/api/v1/categories?page=0&size=2", None).await;
    let (_, second) = send(&app, Method::GET, "/api/v1/categories?page=1&size=2", None).await;
    assert_eq!(names(&first), vec!["Aa", "Bb"]);
    assert_eq!(names(&second), vec!["Cc", "Dd"]);
    assert_eq!(second["data"]["page"], 1);

    let (_, default) = send(&app, Method::GET, "/api/v1/categories?size=2", None).await;
    assert_eq!(names(&default), names(&first));
}

#[tokio::test]
async fn health_metrics_and_docs_are_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/categories/{id}"].is_object());

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&text).contains("grocery_http_requests_total"));

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/nowhere");
}
